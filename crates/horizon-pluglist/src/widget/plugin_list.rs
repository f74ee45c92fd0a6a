//! The plugin list container.
//!
//! [`PluginList`] owns the titled groups, the flattened [`SelectionModel`]
//! and the [`InputRouter`]. Group edits are mirrored into the selection
//! model at the matching flat position, so the selection always sees the
//! items in the order the panel draws them.
//!
//! ```
//! use horizon_pluglist::config::PluginListConfig;
//! use horizon_pluglist::model::{PluginDescriptor, PluginGroup};
//! use horizon_pluglist::widget::PluginList;
//!
//! let mut list = PluginList::new(PluginListConfig::default());
//! list.set_groups(vec![PluginGroup::with_descriptors(
//!     "Downloaded",
//!     [
//!         PluginDescriptor::new("vim", "IdeaVim", "2.1"),
//!         PluginDescriptor::new("rainbow", "Rainbow Brackets", "6.0"),
//!     ],
//! )]);
//!
//! list.select_plugins(&["rainbow"]);
//! assert_eq!(list.copy_text().as_deref(), Some("Rainbow Brackets (6.0)"));
//! ```

use std::collections::HashSet;

use horizon_pluglist_core::logging::targets;
use horizon_pluglist_core::{ScopedFlag, debug_assert_ui_thread};

use crate::actions::{ItemActionDispatcher, format_copy_text};
use crate::config::PluginListConfig;
use crate::model::{Item, PluginDescriptor, PluginGroup, SelectionModel, SelectionPublisher, flat_offset};

use super::accessibility::{SelectionAnnouncer, SelectionSummary};
use super::context_menu::ContextMenuProvider;
use super::events::ListEvent;
use super::input_router::{InputRouter, ListViewport};

/// A grouped, selectable list of plugins.
pub struct PluginList {
    groups: Vec<PluginGroup>,
    selection: SelectionModel,
    router: InputRouter,
    config: PluginListConfig,
    announcer: Option<Box<dyn SelectionAnnouncer + Send>>,
}

impl Default for PluginList {
    fn default() -> Self {
        Self::new(PluginListConfig::default())
    }
}

impl PluginList {
    /// Create an empty list.
    pub fn new(config: PluginListConfig) -> Self {
        Self {
            groups: Vec::new(),
            selection: SelectionModel::new(),
            router: InputRouter::new(&config),
            config,
            announcer: None,
        }
    }

    /// The settings the list was created with.
    pub fn config(&self) -> &PluginListConfig {
        &self.config
    }

    /// The groups in display order.
    pub fn groups(&self) -> &[PluginGroup] {
        &self.groups
    }

    /// The selection over all groups.
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Publisher notified after every selection change.
    pub fn selection_changed(&self) -> &SelectionPublisher {
        self.selection.selection_changed()
    }

    /// The input router.
    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    /// Flag raised while the list moves focus itself.
    pub fn focus_suppression(&self) -> ScopedFlag {
        self.router.focus_suppression()
    }

    /// Set the provider that builds context menus.
    pub fn set_menu_provider(&mut self, provider: impl ContextMenuProvider + Send + Sync + 'static) {
        self.router.set_menu_provider(provider);
    }

    /// Set the receiver of item key actions.
    pub fn set_action_dispatcher(&mut self, dispatcher: impl ItemActionDispatcher + Send + 'static) {
        self.router.set_action_dispatcher(dispatcher);
    }

    /// Set the receiver of selection announcements.
    pub fn set_announcer(&mut self, announcer: impl SelectionAnnouncer + Send + 'static) {
        self.announcer = Some(Box::new(announcer));
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Replace all groups.
    ///
    /// The selection is reset. With `select_first_on_load` the first item
    /// is selected afterwards. A plugin listed more than once keeps only
    /// its first occurrence.
    pub fn set_groups(&mut self, mut groups: Vec<PluginGroup>) {
        let before = self.selection.revision();
        let mut listed = HashSet::new();
        for group in &mut groups {
            drop_listed(group, &mut listed);
        }
        self.groups = groups;
        let items: Vec<Item> = self.groups.iter().flat_map(|g| g.items().iter().cloned()).collect();
        tracing::debug!(target: targets::CONTAINER, groups = self.groups.len(), items = items.len(), "loading plugin list");
        self.selection.set_items(items);
        if self.config.select_first_on_load && !self.selection.is_empty() {
            self.selection.select_single(0, false);
        }
        self.announce_since(before);
    }

    /// Append a group after the existing ones.
    ///
    /// Plugins that are already listed are left out of the new group.
    pub fn add_group(&mut self, mut group: PluginGroup) {
        let mut listed: HashSet<String> = self
            .groups
            .iter()
            .flat_map(|g| g.items().iter().map(Item::plugin_id))
            .collect();
        drop_listed(&mut group, &mut listed);

        let before = self.selection.revision();
        tracing::debug!(target: targets::CONTAINER, title = group.title(), items = group.len(), "adding group");
        for item in group.items() {
            self.selection.push_item(item.clone());
        }
        self.groups.push(group);
        self.announce_since(before);
    }

    /// Remove the group titled `title` together with its items.
    pub fn remove_group(&mut self, title: &str) -> Option<PluginGroup> {
        let index = self.groups.iter().position(|g| g.title() == title)?;
        let before = self.selection.revision();
        let group = self.groups.remove(index);
        tracing::debug!(target: targets::CONTAINER, title, items = group.len(), "removing group");
        for item in group.items() {
            self.selection.remove_item(item);
        }
        self.announce_since(before);
        Some(group)
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    /// Add a plugin to the group titled `group_title`, at its sorted
    /// position.
    ///
    /// Returns `None` if there is no such group. A plugin id that is
    /// already listed is not added again; the existing item is returned.
    pub fn add_plugin(&mut self, group_title: &str, descriptor: PluginDescriptor) -> Option<Item> {
        if let Some(existing) = self.find_item(&descriptor.id) {
            tracing::warn!(target: targets::CONTAINER, plugin = %descriptor.id, "plugin already listed");
            return Some(existing.clone());
        }
        let group_index = self.groups.iter().position(|g| g.title() == group_title)?;

        let before = self.selection.revision();
        let item = Item::new(descriptor);
        let position = self.groups[group_index].insert_sorted(item.clone());
        let flat = flat_offset(&self.groups, group_index) + position;
        tracing::debug!(target: targets::CONTAINER, group = group_title, position, flat, "adding plugin");
        self.selection.insert_item(flat, item.clone());
        self.announce_since(before);
        Some(item)
    }

    /// Remove the plugin `plugin_id` from whichever group lists it.
    pub fn remove_plugin(&mut self, plugin_id: &str) -> Option<Item> {
        let before = self.selection.revision();
        let (_, item) = self.groups.iter_mut().find_map(|g| g.remove_plugin(plugin_id))?;
        tracing::debug!(target: targets::CONTAINER, plugin = plugin_id, "removing plugin");
        self.selection.remove_item(&item);
        self.announce_since(before);
        Some(item)
    }

    /// The item for `plugin_id`.
    pub fn find_item(&self, plugin_id: &str) -> Option<&Item> {
        self.groups.iter().find_map(|g| g.find(plugin_id))
    }

    /// Select exactly the plugins named by `plugin_ids`.
    ///
    /// Unknown ids are ignored.
    pub fn select_plugins(&mut self, plugin_ids: &[&str]) {
        let items: Vec<Item> = plugin_ids
            .iter()
            .filter_map(|id| self.find_item(id).cloned())
            .collect();
        let before = self.selection.revision();
        self.selection.select_explicit(&items);
        self.announce_since(before);
    }

    /// Record that `plugin_id` was enabled or disabled.
    ///
    /// Returns `false` if the plugin is not listed. The selection is not
    /// affected, but when the state actually changes the selection
    /// publisher fires so that listeners refresh their enablement. Nothing
    /// is announced.
    pub fn set_plugin_enabled(&mut self, plugin_id: &str, enabled: bool) -> bool {
        let Some(item) = self.find_item(plugin_id) else {
            return false;
        };
        if item.with_descriptor(|d| d.enabled) == enabled {
            return true;
        }
        item.update_descriptor(|d| d.enabled = enabled);
        tracing::trace!(target: targets::CONTAINER, plugin = plugin_id, enabled, "plugin state updated");
        self.selection.notify_items_changed();
        true
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Route an input event.
    pub fn handle_event(&mut self, event: &ListEvent, viewport: &mut dyn ListViewport) -> bool {
        debug_assert_ui_thread!();
        let before = self.selection.revision();
        let handled = self.router.handle_event(&mut self.selection, viewport, event);
        self.announce_since(before);
        handled
    }

    /// Run a selection operation and announce the outcome.
    ///
    /// Structural changes belong to the group methods; inserting or
    /// removing items here would leave the groups out of step.
    pub fn update_selection<R>(&mut self, f: impl FnOnce(&mut SelectionModel) -> R) -> R {
        let before = self.selection.revision();
        let result = f(&mut self.selection);
        self.announce_since(before);
        result
    }

    /// Clipboard text for the current selection.
    pub fn copy_text(&self) -> Option<String> {
        format_copy_text(&self.selection.selected_items())
    }

    fn announce_since(&mut self, revision: u64) {
        if self.selection.revision() == revision {
            return;
        }
        if let Some(announcer) = self.announcer.as_mut() {
            announcer.announce(&SelectionSummary::of(&self.selection));
        }
    }
}

/// Remove the items of `group` whose plugin id is in `listed`, and record
/// the rest.
fn drop_listed(group: &mut PluginGroup, listed: &mut HashSet<String>) {
    let title = group.title().to_owned();
    group.retain(|item| {
        let plugin_id = item.plugin_id();
        let fresh = !listed.contains(&plugin_id);
        if fresh {
            listed.insert(plugin_id);
        } else {
            tracing::warn!(target: targets::CONTAINER, group = %title, plugin = %plugin_id, "plugin already listed, skipped");
        }
        fresh
    });
}

impl std::fmt::Debug for PluginList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginList")
            .field("groups", &self.groups.len())
            .field("items", &self.selection.len())
            .field("selection", &self.selection.kind())
            .field("router", &self.router)
            .finish()
    }
}

static_assertions::assert_impl_all!(PluginList: Send);
