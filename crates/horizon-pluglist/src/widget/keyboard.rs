//! Conversion from winit input into list events.
//!
//! [`WinitInputTranslator`] keeps the little state winit does not repeat on
//! every event (held modifiers, held buttons, cursor position) and turns
//! window events into [`ListEvent`]s for the router.
//!
//! ```ignore
//! use horizon_pluglist::widget::keyboard::WinitInputTranslator;
//!
//! let mut translator = WinitInputTranslator::new();
//!
//! // In the winit event loop:
//! if let Some(event) = translator.translate(&window_event) {
//!     plugin_list.handle_event(&event, &mut viewport);
//! }
//! ```

use winit::event::{ElementState, Modifiers, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{Key as WinitKey, KeyCode, NamedKey, PhysicalKey};

use super::events::{
    ContextMenuEvent, Key, KeyPressEvent, KeyboardModifiers, ListEvent, MouseButton, MouseMoveEvent,
    MousePressEvent, Point,
};

/// Converts a winit logical key to a list Key.
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_winit_named_key(named),
        WinitKey::Character(c) => from_character(c),
        WinitKey::Unidentified(_) | WinitKey::Dead(_) => Key::Unknown(0),
    }
}

fn from_winit_named_key(key: &NamedKey) -> Key {
    match key {
        // Navigation
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,

        // Editing
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Space => Key::Space,
        NamedKey::Escape => Key::Escape,
        NamedKey::ContextMenu => Key::ContextMenu,

        // Modifiers
        NamedKey::Shift => Key::ShiftLeft,
        NamedKey::Control => Key::ControlLeft,
        NamedKey::Alt => Key::AltLeft,
        NamedKey::Super => Key::MetaLeft,

        _ => Key::Unknown(0),
    }
}

fn from_character(c: &str) -> Key {
    let mut chars = c.chars();
    match (chars.next(), chars.next()) {
        (Some(' '), None) => Key::Space,
        (Some(ch), None) => Key::from_ascii_letter(ch)
            .unwrap_or_else(|| Key::Unknown(u16::try_from(u32::from(ch)).unwrap_or(0))),
        _ => Key::Unknown(0),
    }
}

/// Converts a winit physical key to a list Key.
///
/// Letters are resolved by position, so shortcuts keep working on
/// non-Latin layouts.
pub fn from_winit_physical_key(physical: &PhysicalKey) -> Key {
    match physical {
        PhysicalKey::Code(code) => from_winit_key_code(code),
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[rustfmt::skip]
fn from_winit_key_code(code: &KeyCode) -> Key {
    match code {
        KeyCode::KeyA => Key::A, KeyCode::KeyB => Key::B, KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D, KeyCode::KeyE => Key::E, KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G, KeyCode::KeyH => Key::H, KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J, KeyCode::KeyK => Key::K, KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M, KeyCode::KeyN => Key::N, KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P, KeyCode::KeyQ => Key::Q, KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S, KeyCode::KeyT => Key::T, KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V, KeyCode::KeyW => Key::W, KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y, KeyCode::KeyZ => Key::Z,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Enter => Key::Enter,
        KeyCode::NumpadEnter => Key::NumpadEnter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        KeyCode::ContextMenu => Key::ContextMenu,

        KeyCode::ShiftLeft => Key::ShiftLeft,
        KeyCode::ShiftRight => Key::ShiftRight,
        KeyCode::ControlLeft => Key::ControlLeft,
        KeyCode::ControlRight => Key::ControlRight,
        KeyCode::AltLeft => Key::AltLeft,
        KeyCode::AltRight => Key::AltRight,
        KeyCode::SuperLeft => Key::MetaLeft,
        KeyCode::SuperRight => Key::MetaRight,

        _ => Key::Unknown(0),
    }
}

/// Converts winit modifiers to KeyboardModifiers.
pub fn from_winit_modifiers(modifiers: &Modifiers) -> KeyboardModifiers {
    let state = modifiers.state();
    KeyboardModifiers::new(state.shift_key(), state.control_key(), state.alt_key(), state.super_key())
}

/// Converts a winit mouse button. Buttons beyond the fifth are dropped.
pub fn from_winit_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back => Some(MouseButton::Button4),
        WinitMouseButton::Forward => Some(MouseButton::Button5),
        WinitMouseButton::Other(_) => None,
    }
}

/// Stateful translator from winit window events to list events.
#[derive(Debug)]
pub struct WinitInputTranslator {
    modifiers: KeyboardModifiers,
    buttons: u8,
    cursor: Point,
    /// Screen position of the window's top-left corner, in logical pixels.
    window_origin: Point,
    scale_factor: f64,
}

impl Default for WinitInputTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl WinitInputTranslator {
    /// Creates a translator with no modifiers or buttons held.
    pub fn new() -> Self {
        Self {
            modifiers: KeyboardModifiers::NONE,
            buttons: 0,
            cursor: Point::ZERO,
            window_origin: Point::ZERO,
            scale_factor: 1.0,
        }
    }

    /// Current modifier key state.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Last cursor position, in logical window coordinates.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Set the window's screen position, used for global coordinates.
    pub fn set_window_origin(&mut self, origin: Point) {
        self.window_origin = origin;
    }

    /// Set the window's scale factor.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Record a cursor move in physical pixels and build the move event.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> MouseMoveEvent {
        self.cursor = Point::new((x / self.scale_factor) as f32, (y / self.scale_factor) as f32);
        MouseMoveEvent {
            local_pos: self.cursor,
            global_pos: self.global(self.cursor),
            buttons: self.buttons,
            modifiers: self.modifiers,
        }
    }

    /// Record a button change. Returns a press event for presses.
    pub fn button_changed(&mut self, button: MouseButton, pressed: bool) -> Option<MousePressEvent> {
        if pressed {
            self.buttons |= button.mask();
            Some(MousePressEvent::new(
                button,
                self.cursor,
                self.global(self.cursor),
                self.modifiers,
            ))
        } else {
            self.buttons &= !button.mask();
            None
        }
    }

    /// Translate a window event. Events the list does not handle yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<ListEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = from_winit_modifiers(modifiers);
                None
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
                None
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let key = match from_winit_physical_key(&event.physical_key) {
                    Key::Unknown(_) => from_winit_key(&event.logical_key),
                    key => key,
                };
                if key.is_modifier() {
                    return None;
                }
                if key == Key::ContextMenu {
                    return Some(ListEvent::ContextMenu(ContextMenuEvent::from_keyboard(
                        self.global(self.cursor),
                    )));
                }
                let press = KeyPressEvent::new(key, self.modifiers);
                Some(ListEvent::KeyPress(if event.repeat { press.repeated() } else { press }))
            }
            WindowEvent::CursorMoved { position, .. } => {
                Some(ListEvent::MouseMove(self.cursor_moved(position.x, position.y)))
            }
            WindowEvent::CursorLeft { .. } => {
                self.buttons = 0;
                Some(ListEvent::MouseLeave)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = from_winit_mouse_button(*button)?;
                self.button_changed(button, *state == ElementState::Pressed)
                    .map(ListEvent::MousePress)
            }
            _ => None,
        }
    }

    fn global(&self, local: Point) -> Point {
        Point::new(local.x + self.window_origin.x, local.y + self.window_origin.y)
    }
}
