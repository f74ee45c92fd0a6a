//! Horizon Pluglist - the selection and input layer of a plugin list panel.
//!
//! A panel shows plugins as cards in titled groups. This crate keeps track
//! of which cards are selected and turns mouse and keyboard input into
//! selection changes:
//!
//! - [`model`]: items, the range-encoded [`SelectionModel`](model::SelectionModel)
//!   and plugin groups
//! - [`widget`]: input events, key bindings, the [`InputRouter`](widget::InputRouter)
//!   and the [`PluginList`](widget::PluginList) container
//! - [`actions`]: keyboard actions on the selection and copy text
//! - [`config`]: TOML settings
//!
//! Drawing, scrolling and menus are left to the embedding toolkit through
//! the [`ListViewport`](widget::ListViewport) trait.
//!
//! # Example
//!
//! ```
//! use horizon_pluglist::prelude::*;
//!
//! let mut model = SelectionModel::with_items(
//!     ["a", "b", "c", "d"].map(|id| Item::new(PluginDescriptor::new(id, id.to_uppercase(), "1.0"))),
//! );
//! model.select_single(1, false);
//! model.extend_or_move_range(Direction::Down, true, 2);
//! assert_eq!(model.selected_indices(), vec![1, 2, 3]);
//! ```

pub use horizon_pluglist_core::{InvariantViolation, Publisher, ScopedFlag, ThreadAffinity};

pub mod actions;
pub mod config;
pub mod model;
pub mod prelude;
pub mod widget;
