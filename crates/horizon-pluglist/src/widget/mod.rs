//! Input handling and the list container.
//!
//! This module connects the selection model to the outside world:
//!
//! - [`events`]: toolkit-neutral input events ([`ListEvent`])
//! - [`keymap`]: platform key and mouse bindings
//! - [`InputRouter`]: turns events into selection operations
//! - [`PluginList`]: the grouped container that owns model and router
//! - [`context_menu`] and [`accessibility`]: extension points for bulk
//!   actions and screen reader output
//!
//! With the `winit-input` feature, `keyboard` converts winit window events
//! into [`ListEvent`]s.
//!
//! # Event Flow
//!
//! ```text
//! window event ──► WinitInputTranslator ──► ListEvent
//!                                               │
//!                                               ▼
//!                  PluginList::handle_event ──► InputRouter ──► SelectionModel
//!                                                    │                │
//!                                                    ▼                ▼
//!                                              ListViewport   SelectionPublisher
//! ```

pub mod accessibility;
pub mod context_menu;
pub mod events;
mod input_router;
#[cfg(feature = "winit-input")]
pub mod keyboard;
pub mod keymap;
mod plugin_list;

pub use accessibility::{SelectionAnnouncer, SelectionSummary};
pub use context_menu::{ContextMenu, ContextMenuProvider, MenuEntry, PluginAction, PluginActionMenu};
pub use events::{
    ContextMenuEvent, ContextMenuReason, FocusInEvent, FocusReason, Key, KeyPressEvent, KeyboardModifiers,
    ListEvent, MouseButton, MouseMoveEvent, MousePressEvent, Point,
};
pub use input_router::{InputRouter, ListViewport};
#[cfg(feature = "winit-input")]
pub use keyboard::WinitInputTranslator;
pub use keymap::{KeyCommand, Keymap, NavigationStep};
pub use plugin_list::PluginList;
