//! Input event types consumed by the plugin list.
//!
//! These are the platform-neutral events the [`InputRouter`](super::InputRouter)
//! understands. With the `winit-input` feature, [`keyboard`](super::keyboard)
//! converts raw winit keyboard and mouse input into them.

use std::fmt;

use crate::model::Item;

/// A position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// Nothing held.
    pub const NONE: Self = Self::new(false, false, false, false);
    /// Shift alone.
    pub const SHIFT: Self = Self::new(true, false, false, false);
    /// Ctrl alone.
    pub const CTRL: Self = Self::new(false, true, false, false);
    /// Cmd (macOS) or Super alone.
    pub const META: Self = Self::new(false, false, false, true);

    /// Modifier state from individual flags.
    pub const fn new(shift: bool, control: bool, alt: bool, meta: bool) -> Self {
        Self {
            shift,
            control,
            alt,
            meta,
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
    /// Additional button 1 (e.g., browser back).
    Button4 = 3,
    /// Additional button 2 (e.g., browser forward).
    Button5 = 4,
}

impl MouseButton {
    /// Bit of this button in a [`MouseMoveEvent::buttons`] mask.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Keys the list reacts to.
///
/// Letters are kept for shortcuts (select all, copy). Anything else arrives
/// as [`Key::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Enter, NumpadEnter, Tab, Space, Escape,

    // Menu key
    ContextMenu,

    // Modifiers (also tracked via KeyboardModifiers)
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    MetaLeft, MetaRight,

    // Unknown/unmapped key
    Unknown(u16),
}

impl Key {
    /// Whether this is a bare modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Key::ShiftLeft
                | Key::ShiftRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::AltLeft
                | Key::AltRight
                | Key::MetaLeft
                | Key::MetaRight
        )
    }

    /// The letter key for an ASCII letter, in either case.
    #[rustfmt::skip]
    pub fn from_ascii_letter(c: char) -> Option<Key> {
        const LETTERS: [Key; 26] = [
            Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
            Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
            Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        ];
        if c.is_ascii_alphabetic() {
            Some(LETTERS[(c.to_ascii_lowercase() as u8 - b'a') as usize])
        } else {
            None
        }
    }
}

/// Key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            key,
            modifiers,
            is_repeat: false,
        }
    }

    /// Mark the event as generated by key repeat.
    pub fn repeated(mut self) -> Self {
        self.is_repeat = true;
        self
    }
}

/// Mouse press event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MousePressEvent {
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in list-local coordinates.
    pub local_pos: Point,
    /// Position in global screen coordinates.
    pub global_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    /// Create a new mouse press event.
    pub fn new(button: MouseButton, local_pos: Point, global_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            button,
            local_pos,
            global_pos,
            modifiers,
        }
    }
}

/// Mouse move event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    /// Position in list-local coordinates.
    pub local_pos: Point,
    /// Position in global screen coordinates.
    pub global_pos: Point,
    /// Mouse buttons currently held, as a mask of [`MouseButton::mask`] bits.
    pub buttons: u8,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseMoveEvent {
    /// Create a move event with no buttons held.
    pub fn new(local_pos: Point, global_pos: Point) -> Self {
        Self {
            local_pos,
            global_pos,
            buttons: 0,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Set the held button mask.
    pub fn with_buttons(mut self, buttons: u8) -> Self {
        self.buttons = buttons;
        self
    }

    /// Check if a specific button is pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        (self.buttons & button.mask()) != 0
    }

    /// Check if any button is pressed.
    pub fn any_button_pressed(&self) -> bool {
        self.buttons != 0
    }
}

/// Reason for focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed due to mouse click.
    Mouse,
    /// Focus changed due to Tab key.
    Tab,
    /// Focus changed due to Shift+Tab (backtab).
    Backtab,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// An item card gained keyboard focus.
#[derive(Debug, Clone)]
pub struct FocusInEvent {
    /// The card that gained focus.
    pub item: Item,
    /// The reason focus was gained.
    pub reason: FocusReason,
}

impl FocusInEvent {
    /// Create a new focus in event.
    pub fn new(item: Item, reason: FocusReason) -> Self {
        Self { item, reason }
    }
}

/// Reason a context menu was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextMenuReason {
    /// Triggered by mouse (right-click, or Ctrl+click on macOS).
    #[default]
    Mouse,
    /// Triggered by keyboard (Menu key).
    Keyboard,
}

/// A request for the selection's context menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenuEvent {
    /// Position in list-local coordinates.
    pub local_pos: Point,
    /// Position in global screen coordinates, where the menu appears.
    pub global_pos: Point,
    /// The reason the context menu was requested.
    pub reason: ContextMenuReason,
}

impl ContextMenuEvent {
    /// Create a context menu request from a mouse position.
    pub fn from_mouse(local_pos: Point, global_pos: Point) -> Self {
        Self {
            local_pos,
            global_pos,
            reason: ContextMenuReason::Mouse,
        }
    }

    /// Create a context menu request from the keyboard.
    ///
    /// The position is typically the lead item's on-screen location.
    pub fn from_keyboard(global_pos: Point) -> Self {
        Self {
            local_pos: Point::ZERO,
            global_pos,
            reason: ContextMenuReason::Keyboard,
        }
    }
}

/// Enumeration of all input events the list handles.
#[derive(Debug, Clone)]
pub enum ListEvent {
    /// A mouse button went down.
    MousePress(MousePressEvent),
    /// The pointer moved.
    MouseMove(MouseMoveEvent),
    /// The pointer left the list.
    MouseLeave,
    /// A key went down.
    KeyPress(KeyPressEvent),
    /// A card gained focus.
    FocusIn(FocusInEvent),
    /// The context menu was requested.
    ContextMenu(ContextMenuEvent),
}
