//! Titled groups of plugin items.
//!
//! A panel shows its items in titled sections ("Downloaded", "Bundled",
//! "Updates"). Selection does not care about sections: the selection model
//! sees the groups flattened in order. [`PluginGroup`] keeps a section's
//! items sorted by display name so that a plugin added later lands where a
//! reader expects it.

use super::item::{Item, PluginDescriptor};

/// A titled section of the list.
#[derive(Debug, Clone)]
pub struct PluginGroup {
    title: String,
    items: Vec<Item>,
}

impl PluginGroup {
    /// Create an empty group.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Create a group with one item per descriptor, sorted by name.
    pub fn with_descriptors(title: impl Into<String>, descriptors: impl IntoIterator<Item = PluginDescriptor>) -> Self {
        let mut group = Self::new(title);
        group.items = descriptors.into_iter().map(Item::new).collect();
        group.sort_by_name();
        group
    }

    /// The section title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sort items by display name, case-insensitively.
    pub fn sort_by_name(&mut self) {
        self.items.sort_by_cached_key(|item| item.with_descriptor(|d| d.name.to_lowercase()));
    }

    /// Position within the group where a plugin named `name` belongs.
    pub fn insertion_index(&self, name: &str) -> usize {
        let key = name.to_lowercase();
        self.items
            .partition_point(|item| item.with_descriptor(|d| d.name.to_lowercase() <= key))
    }

    /// Insert `item` at its sorted position. Returns the position in the group.
    pub fn insert_sorted(&mut self, item: Item) -> usize {
        let index = item.with_descriptor(|d| self.insertion_index(&d.name));
        self.items.insert(index, item);
        index
    }

    /// Remove the item for `plugin_id`. Returns its former position and the item.
    pub fn remove_plugin(&mut self, plugin_id: &str) -> Option<(usize, Item)> {
        let index = self.position_of(plugin_id)?;
        Some((index, self.items.remove(index)))
    }

    /// Keep only the items for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Item) -> bool) {
        self.items.retain(keep);
    }

    /// Position of the item for `plugin_id`.
    pub fn position_of(&self, plugin_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.with_descriptor(|d| d.id == plugin_id))
    }

    /// The item for `plugin_id`.
    pub fn find(&self, plugin_id: &str) -> Option<&Item> {
        self.position_of(plugin_id).map(|index| &self.items[index])
    }
}

/// Flat index of the first item of `groups[group_index]`.
pub fn flat_offset(groups: &[PluginGroup], group_index: usize) -> usize {
    groups.iter().take(group_index).map(PluginGroup::len).sum()
}
