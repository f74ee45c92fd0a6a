//! Mouse, keyboard and focus routing for the plugin list.
//!
//! The [`InputRouter`] is the only place where raw input becomes selection
//! changes. It reads positions and page sizes from a [`ListViewport`],
//! mutates the [`SelectionModel`], and carries out the model's reveal
//! requests (scroll into view, then focus) on the viewport.
//!
//! # Bindings
//!
//! | Input | Effect |
//! |---|---|
//! | Click | select the item |
//! | Shift+click | range from the anchor to the item |
//! | Primary+click | toggle the item |
//! | Right click (Ctrl+click on macOS) | context menu for the selection |
//! | Up/Down, PageUp/PageDown, Home/End | move; with Shift, extend |
//! | Primary+A | select all |
//! | Space, Enter, Delete, Primary+C | item action for the selection |
//!
//! Handlers return `true` when the event was consumed.

use horizon_pluglist_core::ScopedFlag;
use horizon_pluglist_core::logging::{span_names, targets};

use crate::actions::{ItemActionDispatcher, ItemKeyAction};
use crate::config::PluginListConfig;
use crate::model::{Direction, Item, SelectionKind, SelectionModel};

use super::context_menu::{ContextMenu, ContextMenuProvider};
use super::events::{
    ContextMenuEvent, ContextMenuReason, FocusInEvent, KeyPressEvent, ListEvent, MouseButton,
    MouseMoveEvent, MousePressEvent, Point,
};
use super::keymap::{KeyCommand, Keymap, NavigationStep};

/// What the router needs from the visual container.
pub trait ListViewport {
    /// Index of the item under `point` (list-local coordinates).
    fn item_at(&self, point: Point) -> Option<usize>;

    /// Number of rows that fit in the visible area.
    fn visible_row_count(&self) -> usize;

    /// Scroll so that `item` is visible.
    fn scroll_to_item(&mut self, item: &Item);

    /// Give `item` keyboard focus.
    fn focus_item(&mut self, item: &Item);

    /// Show `menu` at `global_pos`.
    fn show_context_menu(&mut self, menu: ContextMenu, global_pos: Point);
}

/// Translates input events into selection operations.
pub struct InputRouter {
    keymap: Keymap,
    hover_tracking: bool,
    fallback_page_rows: usize,
    /// Raised while the router moves focus itself.
    focus_suppression: ScopedFlag,
    menu_provider: Option<Box<dyn ContextMenuProvider + Send + Sync>>,
    dispatcher: Option<Box<dyn ItemActionDispatcher + Send>>,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(&PluginListConfig::default())
    }
}

impl InputRouter {
    /// Create a router configured by `config`.
    pub fn new(config: &PluginListConfig) -> Self {
        Self {
            keymap: Keymap::from_config(config),
            hover_tracking: config.hover_tracking,
            fallback_page_rows: config.navigation.fallback_page_rows.max(1),
            focus_suppression: ScopedFlag::new(),
            menu_provider: None,
            dispatcher: None,
        }
    }

    /// Replace the key bindings.
    pub fn set_keymap(&mut self, keymap: Keymap) {
        self.keymap = keymap;
    }

    /// The key bindings in use.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Set the provider that builds context menus.
    pub fn set_menu_provider(&mut self, provider: impl ContextMenuProvider + Send + Sync + 'static) {
        self.menu_provider = Some(Box::new(provider));
    }

    /// Set the receiver of item key actions.
    pub fn set_action_dispatcher(&mut self, dispatcher: impl ItemActionDispatcher + Send + 'static) {
        self.dispatcher = Some(Box::new(dispatcher));
    }

    /// Flag raised while the router scrolls and focuses an item.
    ///
    /// Containers that deliver focus events synchronously can hold a clone
    /// and drop focus events while it is raised.
    pub fn focus_suppression(&self) -> ScopedFlag {
        self.focus_suppression.clone()
    }

    /// Route any list event.
    pub fn handle_event(
        &mut self,
        model: &mut SelectionModel,
        viewport: &mut dyn ListViewport,
        event: &ListEvent,
    ) -> bool {
        let _span = tracing::trace_span!(target: targets::INPUT, "route", name = span_names::INPUT).entered();
        match event {
            ListEvent::MousePress(e) => self.handle_mouse_press(model, viewport, e),
            ListEvent::MouseMove(e) => self.handle_mouse_move(model, viewport, e),
            ListEvent::MouseLeave => self.handle_mouse_leave(model),
            ListEvent::KeyPress(e) => self.handle_key_press(model, viewport, e),
            ListEvent::FocusIn(e) => self.handle_focus_in(model, e),
            ListEvent::ContextMenu(e) => self.handle_context_menu(model, viewport, e),
        }
    }

    // =========================================================================
    // Mouse
    // =========================================================================

    /// Handle a mouse press.
    pub fn handle_mouse_press(
        &mut self,
        model: &mut SelectionModel,
        viewport: &mut dyn ListViewport,
        event: &MousePressEvent,
    ) -> bool {
        let Some(index) = viewport.item_at(event.local_pos).filter(|&i| i < model.len()) else {
            return false;
        };

        if self.keymap.is_context_click(event.button, event.modifiers) {
            return self.open_context_menu(model, viewport, Some(index), event.global_pos);
        }
        if event.button != MouseButton::Left {
            return false;
        }

        if self.keymap.is_primary(event.modifiers) {
            tracing::trace!(target: targets::INPUT, index, "toggle click");
            model.toggle_at(index);
        } else if event.modifiers.shift {
            tracing::trace!(target: targets::INPUT, index, "range click");
            model.select_range_to(index);
        } else {
            tracing::trace!(target: targets::INPUT, index, "click");
            model.select_single(index, true);
        }
        self.reveal(model, viewport);
        true
    }

    /// Track the hovered item.
    pub fn handle_mouse_move(
        &mut self,
        model: &mut SelectionModel,
        viewport: &dyn ListViewport,
        event: &MouseMoveEvent,
    ) -> bool {
        if !self.hover_tracking || event.any_button_pressed() {
            return false;
        }
        model.set_hovered(viewport.item_at(event.local_pos));
        true
    }

    /// Clear the hover marker when the pointer leaves the list.
    pub fn handle_mouse_leave(&mut self, model: &mut SelectionModel) -> bool {
        if !self.hover_tracking {
            return false;
        }
        model.set_hovered(None);
        true
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press.
    pub fn handle_key_press(
        &mut self,
        model: &mut SelectionModel,
        viewport: &mut dyn ListViewport,
        event: &KeyPressEvent,
    ) -> bool {
        let Some(command) = self.keymap.command_for(event) else {
            return false;
        };
        if model.is_empty() {
            tracing::trace!(target: targets::INPUT, ?command, "key on empty list ignored");
            return false;
        }

        match command {
            KeyCommand::Navigate {
                direction,
                step,
                extend,
            } => {
                self.navigate(model, viewport, direction, step, extend);
                true
            }
            KeyCommand::SelectAll => {
                model.select_all();
                true
            }
            KeyCommand::Action(action) => self.dispatch_action(model, action),
        }
    }

    fn navigate(
        &mut self,
        model: &mut SelectionModel,
        viewport: &mut dyn ListViewport,
        direction: Direction,
        step: NavigationStep,
        extend: bool,
    ) {
        let item_count = model.len();
        if !model.has_selection() {
            // Entering the list: End lands on the last item, everything else on the first.
            let target = match (direction, step) {
                (Direction::Down, NavigationStep::Edge) => item_count - 1,
                _ => 0,
            };
            model.select_single(target, true);
        } else {
            let count = match step {
                NavigationStep::Row => 1,
                NavigationStep::Page => match viewport.visible_row_count() {
                    0 => self.fallback_page_rows,
                    rows => rows,
                },
                NavigationStep::Edge => item_count,
            };
            tracing::trace!(target: targets::INPUT, ?direction, count, extend, "navigate");
            model.extend_or_move_range(direction, extend, count);
        }
        self.reveal(model, viewport);
    }

    fn dispatch_action(&mut self, model: &SelectionModel, action: ItemKeyAction) -> bool {
        let selection = model.selected_items();
        if selection.is_empty() {
            return false;
        }
        let Some(dispatcher) = self.dispatcher.as_mut() else {
            tracing::debug!(target: targets::INPUT, %action, "no action dispatcher registered");
            return false;
        };
        tracing::trace!(target: targets::INPUT, %action, count = selection.len(), "dispatch item action");
        dispatcher.dispatch(action, &selection);
        true
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Follow keyboard focus entering an item from outside the list.
    ///
    /// A single selection (or none) moves to the focused item. Ranges and
    /// mixed selections are left alone, and focus moved by the router
    /// itself is ignored.
    pub fn handle_focus_in(&mut self, model: &mut SelectionModel, event: &FocusInEvent) -> bool {
        if self.focus_suppression.is_raised() {
            tracing::trace!(target: targets::INPUT, "programmatic focus ignored");
            return false;
        }
        let Some(index) = model.index_of(&event.item) else {
            return false;
        };
        let resync = match model.kind() {
            SelectionKind::Empty => true,
            SelectionKind::Single => !model.is_selected(index),
            SelectionKind::Range | SelectionKind::Mixed | SelectionKind::All => false,
        };
        if resync {
            tracing::trace!(target: targets::INPUT, index, reason = ?event.reason, "selection follows focus");
            model.select_single(index, false);
        }
        resync
    }

    // =========================================================================
    // Context menu
    // =========================================================================

    /// Handle an explicit context menu request.
    pub fn handle_context_menu(
        &mut self,
        model: &mut SelectionModel,
        viewport: &mut dyn ListViewport,
        event: &ContextMenuEvent,
    ) -> bool {
        let index = match event.reason {
            ContextMenuReason::Mouse => viewport.item_at(event.local_pos).filter(|&i| i < model.len()),
            ContextMenuReason::Keyboard => None,
        };
        self.open_context_menu(model, viewport, index, event.global_pos)
    }

    fn open_context_menu(
        &mut self,
        model: &mut SelectionModel,
        viewport: &mut dyn ListViewport,
        clicked: Option<usize>,
        global_pos: Point,
    ) -> bool {
        if let Some(index) = clicked {
            let already_single = model.kind() == SelectionKind::Single && model.is_selected(index);
            if model.selected_count() <= 1 && !already_single {
                model.select_single(index, true);
                self.reveal(model, viewport);
            }
        }

        let selection = model.selected_items();
        if selection.is_empty() {
            return false;
        }
        let Some(menu) = self.menu_provider.as_ref().and_then(|p| p.build(&selection)) else {
            return false;
        };
        tracing::trace!(target: targets::INPUT, count = selection.len(), %global_pos, "show context menu");
        viewport.show_context_menu(menu, global_pos);
        true
    }

    /// Carry out the model's pending reveal request, if any.
    fn reveal(&self, model: &mut SelectionModel, viewport: &mut dyn ListViewport) {
        if let Some(item) = model.take_reveal_request() {
            let _guard = self.focus_suppression.raise();
            viewport.scroll_to_item(&item);
            viewport.focus_item(&item);
        }
    }
}

impl std::fmt::Debug for InputRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputRouter")
            .field("keymap", &self.keymap)
            .field("hover_tracking", &self.hover_tracking)
            .field("has_menu_provider", &self.menu_provider.is_some())
            .field("has_dispatcher", &self.dispatcher.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(InputRouter: Send);
