//! Items and selection state for the plugin list.
//!
//! # Core Types
//!
//! - [`Item`]: handle for one plugin card, carrying a [`SelectionMarker`]
//! - [`ItemList`]: ordered items with identity lookup
//! - [`SelectionModel`]: the selection state machine over an item list
//! - [`PluginGroup`]: a titled, name-sorted section of items
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌────────────────┐     ┌──────────────────────┐
//! │ InputRouter │────>│ SelectionModel │────>│ SelectionPublisher   │
//! │             │     │  (ItemList)    │     │ (details, toolbar)   │
//! └─────────────┘     └────────────────┘     └──────────────────────┘
//!                             │
//!                             v
//!                     Item markers (None / Hover / Selected)
//! ```

mod group;
mod item;
mod item_list;
mod selection;

pub use group::{PluginGroup, flat_offset};
pub use item::{Item, ItemId, PluginDescriptor, SelectionMarker};
pub use item_list::ItemList;
pub use selection::{
    Direction, RangeSelection, SelectionKind, SelectionModel, SelectionPublisher, SelectionState,
};
