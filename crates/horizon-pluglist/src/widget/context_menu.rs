//! Context menus for the selection.
//!
//! The list itself knows nothing about what an action means. On a context
//! click it asks a [`ContextMenuProvider`] to build a menu for the selected
//! items and passes the result to the viewport for display.
//! [`PluginActionMenu`] is the stock provider for bulk plugin actions.

use std::fmt;

use crate::model::Item;

/// Bulk actions offered for selected plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginAction {
    /// Enable disabled plugins.
    Enable,
    /// Disable enabled plugins.
    Disable,
    /// Uninstall non-bundled plugins.
    Uninstall,
    /// Install available updates.
    Update,
}

impl PluginAction {
    /// All actions in menu order.
    pub const ALL: [PluginAction; 4] = [Self::Enable, Self::Disable, Self::Update, Self::Uninstall];

    /// Menu text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Enable => "Enable",
            Self::Disable => "Disable",
            Self::Uninstall => "Uninstall",
            Self::Update => "Update",
        }
    }
}

impl fmt::Display for PluginAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of a context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// The action run when the entry is chosen.
    pub action: PluginAction,
    /// Display text.
    pub text: String,
    /// Whether the entry can be chosen.
    pub enabled: bool,
}

/// A menu built for the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextMenu {
    entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Create an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry labelled with the action's default text.
    pub fn with_action(mut self, action: PluginAction, enabled: bool) -> Self {
        self.add_entry(MenuEntry {
            action,
            text: action.label().to_string(),
            enabled,
        });
        self
    }

    /// Append an entry.
    pub fn add_entry(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// The entry for `action`.
    pub fn entry(&self, action: PluginAction) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.action == action)
    }

    /// Whether `action` is present and enabled.
    pub fn is_enabled(&self, action: PluginAction) -> bool {
        self.entry(action).is_some_and(|entry| entry.enabled)
    }

    /// Whether the menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the context menu for a selection.
pub trait ContextMenuProvider {
    /// Build a menu for `selection` (never empty, in list order).
    ///
    /// Returning `None` shows nothing.
    fn build(&self, selection: &[Item]) -> Option<ContextMenu>;
}

impl<F> ContextMenuProvider for F
where
    F: Fn(&[Item]) -> Option<ContextMenu>,
{
    fn build(&self, selection: &[Item]) -> Option<ContextMenu> {
        self(selection)
    }
}

/// Stock provider offering Enable, Disable, Update and Uninstall.
///
/// An entry is enabled when at least one selected plugin can take it:
/// Enable for disabled plugins, Disable for enabled ones, Update for plugins
/// with an update, Uninstall for plugins that are not bundled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginActionMenu;

impl PluginActionMenu {
    /// Whether `action` applies to at least one of `selection`.
    pub fn applies(action: PluginAction, selection: &[Item]) -> bool {
        selection.iter().any(|item| {
            item.with_descriptor(|d| match action {
                PluginAction::Enable => !d.enabled,
                PluginAction::Disable => d.enabled,
                PluginAction::Uninstall => !d.bundled,
                PluginAction::Update => d.update_available,
            })
        })
    }
}

impl ContextMenuProvider for PluginActionMenu {
    fn build(&self, selection: &[Item]) -> Option<ContextMenu> {
        if selection.is_empty() {
            return None;
        }
        let menu = PluginAction::ALL
            .into_iter()
            .fold(ContextMenu::new(), |menu, action| {
                menu.with_action(action, Self::applies(action, selection))
            });
        Some(menu)
    }
}
