//! Item-level actions triggered from the keyboard.
//!
//! Space, Enter, Delete and the copy shortcut do not change the selection.
//! The router hands them, together with the selected items, to an
//! [`ItemActionDispatcher`] supplied by the application.

use std::fmt;

use crate::model::Item;

/// An action the keyboard requests for the selected items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKeyAction {
    /// Space: flip the enabled state of the selected plugins.
    Toggle,
    /// Enter: open the selected plugin.
    Activate,
    /// Delete (or Backspace where mapped): uninstall.
    Delete,
    /// Primary+C: copy the selection as text.
    Copy,
}

impl fmt::Display for ItemKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Toggle => "toggle",
            Self::Activate => "activate",
            Self::Delete => "delete",
            Self::Copy => "copy",
        };
        f.write_str(name)
    }
}

/// Receives keyboard actions for the selection.
///
/// Only called with a non-empty selection.
pub trait ItemActionDispatcher {
    /// Perform `action` on `selection` (in list order).
    fn dispatch(&mut self, action: ItemKeyAction, selection: &[Item]);
}

impl<F> ItemActionDispatcher for F
where
    F: FnMut(ItemKeyAction, &[Item]),
{
    fn dispatch(&mut self, action: ItemKeyAction, selection: &[Item]) {
        self(action, selection)
    }
}

/// Clipboard text for a selection: one `Name (version)` line per item.
///
/// Returns `None` for an empty selection, which leaves the clipboard alone.
pub fn format_copy_text(selection: &[Item]) -> Option<String> {
    if selection.is_empty() {
        return None;
    }
    let lines: Vec<String> = selection
        .iter()
        .map(|item| item.with_descriptor(|d| format!("{} ({})", d.name, d.version)))
        .collect();
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PluginDescriptor;

    #[test]
    fn test_format_copy_text() {
        let items = [
            Item::new(PluginDescriptor::new("rust", "Rust", "0.4.200")),
            Item::new(PluginDescriptor::new("toml", "TOML", "1.2")),
        ];
        assert_eq!(format_copy_text(&items).as_deref(), Some("Rust (0.4.200)\nTOML (1.2)"));
        assert_eq!(format_copy_text(&items[..1]).as_deref(), Some("Rust (0.4.200)"));
        assert_eq!(format_copy_text(&[]), None);
    }

    #[test]
    fn test_closure_dispatcher() {
        let mut seen = Vec::new();
        {
            let mut dispatcher = |action: ItemKeyAction, selection: &[Item]| {
                seen.push((action, selection.len()));
            };
            dispatcher.dispatch(ItemKeyAction::Delete, &[]);
        }
        assert_eq!(seen, vec![(ItemKeyAction::Delete, 0)]);
        assert_eq!(ItemKeyAction::Activate.to_string(), "activate");
    }
}
