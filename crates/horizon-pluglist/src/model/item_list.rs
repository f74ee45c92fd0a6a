//! Ordered item storage with identity lookup.

use std::collections::HashMap;

use super::item::{Item, ItemId};

/// The ordered items shown by a list panel.
///
/// Insertion order is visual order. Index-of is answered from an identity map
/// that is rebuilt from the mutation point onward, so callers must never hold
/// on to an index across a mutation.
#[derive(Debug, Default, Clone)]
pub struct ItemList {
    items: Vec<Item>,
    positions: HashMap<ItemId, usize>,
}

impl ItemList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list from `items`.
    ///
    /// Duplicate handles are dropped; the first occurrence wins.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut list = Self::new();
        for item in items {
            if !list.contains(&item) {
                list.push(item);
            }
        }
        list
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Position of `item` in the list, by identity.
    pub fn index_of(&self, item: &Item) -> Option<usize> {
        self.position_of(item.id())
    }

    /// Position of the item with `id`.
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Whether `item` is part of the list.
    pub fn contains(&self, item: &Item) -> bool {
        self.positions.contains_key(&item.id())
    }

    /// All items in order.
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Append an item. Returns its index.
    pub fn push(&mut self, item: Item) -> usize {
        let index = self.items.len();
        self.positions.insert(item.id(), index);
        self.items.push(item);
        index
    }

    /// Insert `item` at `index` (clamped to the list length). Returns the
    /// index actually used.
    pub fn insert(&mut self, index: usize, item: Item) -> usize {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.reindex_from(index);
        index
    }

    /// Remove and return the item at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.positions.remove(&item.id());
        self.reindex_from(index);
        Some(item)
    }

    /// Move the item at `from` to position `to` (clamped).
    ///
    /// Returns the final position, or `None` if `from` is out of range.
    pub fn move_item(&mut self, from: usize, to: usize) -> Option<usize> {
        if from >= self.items.len() {
            return None;
        }
        let item = self.items.remove(from);
        let to = to.min(self.items.len());
        self.items.insert(to, item);
        self.reindex_from(from.min(to));
        Some(to)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
    }

    fn reindex_from(&mut self, start: usize) {
        for (offset, item) in self.items[start..].iter().enumerate() {
            self.positions.insert(item.id(), start + offset);
        }
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
