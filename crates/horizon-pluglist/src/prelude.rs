//! Prelude module for Horizon Pluglist.
//!
//! ```
//! use horizon_pluglist::prelude::*;
//! ```
//!
//! Brings in the selection model, the container and its input types.

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    Direction, Item, ItemId, PluginDescriptor, PluginGroup, SelectionKind, SelectionMarker, SelectionModel,
    SelectionPublisher,
};

// ============================================================================
// Container and Input
// ============================================================================

pub use crate::widget::{
    InputRouter, Key, KeyPressEvent, KeyboardModifiers, ListEvent, ListViewport, MouseButton, MousePressEvent,
    PluginList, Point,
};

// ============================================================================
// Actions and Settings
// ============================================================================

pub use crate::actions::{ItemActionDispatcher, ItemKeyAction};
pub use crate::config::PluginListConfig;
