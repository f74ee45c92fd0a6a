//! Platform key bindings of the list.
//!
//! A [`Keymap`] turns a key press into a [`KeyCommand`] and decides which
//! mouse presses are selection toggles or context-menu requests. The
//! platform differences live here and nowhere else:
//!
//! | Concern | macOS | Other |
//! |---|---|---|
//! | Primary modifier (toggle-click, select all, copy) | Cmd | Ctrl |
//! | Context menu | right click, Ctrl+click | right click |
//! | Delete request | Delete, Backspace | Delete |

use crate::actions::ItemKeyAction;
use crate::config::{DeleteKeyMapping, PluginListConfig};
use crate::model::Direction;

use super::events::{Key, KeyPressEvent, KeyboardModifiers, MouseButton};

/// How far a navigation key moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationStep {
    /// One row (arrow keys).
    Row,
    /// One visible page (PageUp/PageDown).
    Page,
    /// To the first or last item (Home/End).
    Edge,
}

/// What a key press asks the list to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Move the selection, or extend it when `extend` is set.
    Navigate {
        /// Direction of travel.
        direction: Direction,
        /// Distance.
        step: NavigationStep,
        /// Whether Shift is held.
        extend: bool,
    },
    /// Select every item.
    SelectAll,
    /// Hand an action for the selection to the dispatcher.
    Action(ItemKeyAction),
}

/// Key and mouse bindings for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    mac: bool,
    backspace_deletes: bool,
    shift_extends: bool,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&PluginListConfig::default())
    }
}

impl Keymap {
    /// Bindings following macOS conventions.
    pub fn mac() -> Self {
        Self {
            mac: true,
            backspace_deletes: true,
            shift_extends: true,
        }
    }

    /// Bindings following Windows/Linux conventions.
    pub fn other() -> Self {
        Self {
            mac: false,
            backspace_deletes: false,
            shift_extends: true,
        }
    }

    /// Bindings described by `config`.
    pub fn from_config(config: &PluginListConfig) -> Self {
        let mac = config.is_mac();
        let backspace_deletes = match config.delete_keys {
            DeleteKeyMapping::Platform => mac,
            DeleteKeyMapping::DeleteOnly => false,
            DeleteKeyMapping::DeleteAndBackspace => true,
        };
        Self {
            mac,
            backspace_deletes,
            shift_extends: config.navigation.shift_extends,
        }
    }

    /// Whether macOS conventions apply.
    pub fn is_mac(&self) -> bool {
        self.mac
    }

    /// Whether the platform's primary modifier (Cmd or Ctrl) is held.
    pub fn is_primary(&self, modifiers: KeyboardModifiers) -> bool {
        if self.mac { modifiers.meta } else { modifiers.control }
    }

    /// Whether `key` requests deletion.
    pub fn is_delete_key(&self, key: Key) -> bool {
        key == Key::Delete || (self.backspace_deletes && key == Key::Backspace)
    }

    /// Whether a press opens the context menu instead of selecting.
    pub fn is_context_click(&self, button: MouseButton, modifiers: KeyboardModifiers) -> bool {
        button == MouseButton::Right || (self.mac && button == MouseButton::Left && modifiers.control)
    }

    /// Interpret a key press. Unbound keys yield `None`.
    pub fn command_for(&self, event: &KeyPressEvent) -> Option<KeyCommand> {
        let modifiers = event.modifiers;
        let primary = self.is_primary(modifiers);
        let extend = self.shift_extends && modifiers.shift;

        let navigate = |direction, step| KeyCommand::Navigate {
            direction,
            step,
            extend,
        };

        let command = match event.key {
            Key::ArrowUp => navigate(Direction::Up, NavigationStep::Row),
            Key::ArrowDown => navigate(Direction::Down, NavigationStep::Row),
            Key::PageUp => navigate(Direction::Up, NavigationStep::Page),
            Key::PageDown => navigate(Direction::Down, NavigationStep::Page),
            Key::Home => navigate(Direction::Up, NavigationStep::Edge),
            Key::End => navigate(Direction::Down, NavigationStep::Edge),
            Key::A if primary => KeyCommand::SelectAll,
            Key::C if primary => KeyCommand::Action(ItemKeyAction::Copy),
            Key::Space if !primary => KeyCommand::Action(ItemKeyAction::Toggle),
            Key::Enter | Key::NumpadEnter => KeyCommand::Action(ItemKeyAction::Activate),
            key if self.is_delete_key(key) => KeyCommand::Action(ItemKeyAction::Delete),
            _ => return None,
        };
        Some(command)
    }
}
