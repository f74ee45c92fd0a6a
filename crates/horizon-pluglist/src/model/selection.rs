//! Selection model for the plugin list.
//!
//! This module provides [`SelectionModel`], which owns the ordered items of a
//! panel together with a compact encoding of what is selected, and keeps each
//! item's [`SelectionMarker`] in sync with that encoding.
//!
//! The encoding is a [`SelectionState`]:
//!
//! - `Empty`: nothing is selected.
//! - `Range`: a contiguous run described by an anchor and a signed length
//!   (see [`RangeSelection`]). The sign records which end is the live edge,
//!   which is what Shift+Arrow, Shift+Home and Shift+PageDown need.
//! - `Mixed`: an arbitrary subset built by modifier-clicking.
//! - `All`: every item, including items inserted later.
//!
//! # Example
//!
//! ```
//! use horizon_pluglist::model::{Direction, Item, PluginDescriptor, SelectionKind, SelectionModel};
//!
//! let items: Vec<Item> = (0..10)
//!     .map(|i| Item::new(PluginDescriptor::new(format!("p{i}"), format!("Plugin {i}"), "1.0")))
//!     .collect();
//! let mut selection = SelectionModel::with_items(items);
//!
//! selection.select_single(3, false);
//! selection.extend_or_move_range(Direction::Down, true, 2);
//! assert_eq!(selection.selected_indices(), vec![3, 4, 5]);
//!
//! selection.toggle_at(8);
//! assert_eq!(selection.kind(), SelectionKind::Mixed);
//!
//! // Listen for changes
//! selection.selection_changed().set_listener(|model: &SelectionModel| {
//!     println!("{} selected", model.selected_count());
//! });
//! ```

use std::collections::HashSet;
use std::fmt;

use horizon_pluglist_core::logging::{span_names, targets};
use horizon_pluglist_core::{InvariantViolation, PerfSpan, Publisher, ThreadAffinity, fatal};

use super::item::{Item, ItemId, SelectionMarker};
use super::item_list::ItemList;

/// Publisher notified after every selection change.
///
/// The listener receives the model and re-queries what it needs.
pub type SelectionPublisher = Publisher<SelectionModel>;

// ============================================================================
// Range encoding
// ============================================================================

/// A contiguous selection measured from a fixed anchor.
///
/// `length` is never zero. A positive length covers
/// `[anchor, anchor + length - 1]`, a negative one covers
/// `[anchor + length + 1, anchor]`. A length of one (either sign) is a
/// single selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeSelection {
    anchor: usize,
    length: isize,
}

impl RangeSelection {
    /// Create a range.
    ///
    /// # Panics
    ///
    /// A zero `length` is an invariant violation.
    #[track_caller]
    pub fn new(anchor: usize, length: isize) -> Self {
        if length == 0 {
            fatal(InvariantViolation::ZeroLengthRange { anchor });
        }
        Self { anchor, length }
    }

    /// A single selected item.
    pub fn single(index: usize) -> Self {
        Self {
            anchor: index,
            length: 1,
        }
    }

    /// The range from `anchor` through `lead`, inclusive.
    pub fn spanning(anchor: usize, lead: usize) -> Self {
        let length = if lead >= anchor {
            (lead - anchor + 1) as isize
        } else {
            -((anchor - lead + 1) as isize)
        };
        Self { anchor, length }
    }

    /// The fixed end.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// The signed length.
    pub fn length(&self) -> isize {
        self.length
    }

    /// Number of covered items.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.length.unsigned_abs()
    }

    /// Lowest covered index.
    pub fn start(&self) -> usize {
        if self.length > 0 {
            self.anchor
        } else {
            self.anchor + 1 - self.len()
        }
    }

    /// Highest covered index.
    pub fn end(&self) -> usize {
        if self.length > 0 {
            self.anchor + self.len() - 1
        } else {
            self.anchor
        }
    }

    /// The movable edge, opposite the anchor.
    pub fn lead(&self) -> usize {
        if self.length > 0 { self.end() } else { self.start() }
    }

    /// Whether the range grows downward from its anchor.
    pub fn is_forward(&self) -> bool {
        self.length > 0
    }

    /// Whether exactly one item is covered.
    pub fn is_single(&self) -> bool {
        self.len() == 1
    }

    /// Whether `index` is covered.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start() && index <= self.end()
    }

    /// The covered indices in ascending order.
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start()..=self.end()
    }

    /// Move the lead edge `count` steps in `direction` within a list of
    /// `item_count` items.
    ///
    /// Shrinking stops at the anchor. Budget left over after reaching the
    /// anchor re-enters on the other side and grows from there, so the
    /// length never passes through zero. A single-item result is always
    /// reported with a length of `+1`.
    pub fn resized(self, direction: Direction, count: usize, item_count: usize) -> Self {
        let step = direction.step();
        let mut range = self;
        let mut budget = count;

        if range.length.signum() != step && range.len() > 1 {
            let shrink = budget.min(range.len() - 1);
            range.length += step * shrink as isize;
            budget -= shrink;
            if budget == 0 {
                return range.normalized();
            }
        }

        if range.is_single() {
            // Re-enter from the anchor on the side the lead is moving to.
            range.length = step;
        }

        let max = match direction {
            Direction::Down => item_count - range.anchor,
            Direction::Up => range.anchor + 1,
        };
        let grown = range.len().saturating_add(budget).min(max);
        range.length = step * grown as isize;
        range.normalized()
    }

    fn normalized(self) -> Self {
        if self.length == -1 {
            Self::single(self.anchor)
        } else {
            self
        }
    }
}

impl fmt::Display for RangeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}] (anchor {})", self.start(), self.end(), self.anchor)
    }
}

// ============================================================================
// State
// ============================================================================

/// What is currently selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing is selected.
    #[default]
    Empty,
    /// A contiguous run.
    Range(RangeSelection),
    /// An arbitrary subset, with the last toggled item as anchor.
    Mixed {
        /// The selected items.
        selected: HashSet<ItemId>,
        /// Where keyboard navigation continues from.
        anchor: Option<ItemId>,
    },
    /// Every item.
    All,
}

/// The observable state of the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// Nothing selected.
    Empty,
    /// Exactly one item, as a range of length one.
    Single,
    /// A contiguous run of two or more items.
    Range,
    /// A toggled subset.
    Mixed,
    /// Everything.
    All,
}

/// Direction of keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward index zero.
    Up,
    /// Toward the last index.
    Down,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

// ============================================================================
// SelectionModel
// ============================================================================

/// Items of a panel plus what is selected among them.
///
/// All mutation happens on the thread that created the model. After every
/// transition the markers of the affected items are repainted before the
/// [`selection_changed`](Self::selection_changed) publisher fires, so a
/// listener never observes a half-updated selection.
#[derive(Debug, Default)]
pub struct SelectionModel {
    items: ItemList,
    state: SelectionState,
    /// Item under the pointer, if any.
    hovered: Option<ItemId>,
    /// Item that keyboard focus follows.
    lead: Option<ItemId>,
    /// Item that asked to be scrolled into view and focused.
    reveal: Option<ItemId>,
    /// Resize steps swallowed at the list boundary, in the direction they
    /// were requested. Retraction the other way spends them first.
    overshoot: Option<(Direction, usize)>,
    /// Bumped on every published change.
    revision: u64,
    selection_changed: SelectionPublisher,
    affinity: ThreadAffinity,
}

impl SelectionModel {
    /// Create an empty model bound to the current thread.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model holding `items`, with nothing selected.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut model = Self::new();
        model.items = ItemList::from_items(items);
        model.refresh_all_markers();
        model
    }

    /// Publisher fired after every change.
    pub fn selection_changed(&self) -> &SelectionPublisher {
        &self.selection_changed
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in order.
    pub fn items(&self) -> &[Item] {
        self.items.as_slice()
    }

    /// The item at `index`.
    pub fn item_at(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Position of `item`, by identity.
    pub fn index_of(&self, item: &Item) -> Option<usize> {
        self.items.index_of(item)
    }

    /// The current encoding.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The current state machine state.
    pub fn kind(&self) -> SelectionKind {
        match &self.state {
            SelectionState::Empty => SelectionKind::Empty,
            SelectionState::Range(range) if range.is_single() => SelectionKind::Single,
            SelectionState::Range(_) => SelectionKind::Range,
            SelectionState::Mixed { .. } => SelectionKind::Mixed,
            SelectionState::All => SelectionKind::All,
        }
    }

    /// Whether anything is selected.
    pub fn has_selection(&self) -> bool {
        self.state != SelectionState::Empty
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        match &self.state {
            SelectionState::Empty => 0,
            SelectionState::Range(range) => range.len(),
            SelectionState::Mixed { selected, .. } => selected.len(),
            SelectionState::All => self.items.len(),
        }
    }

    /// Whether the item at `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        match &self.state {
            SelectionState::Empty => false,
            SelectionState::Range(range) => range.contains(index),
            SelectionState::Mixed { selected, .. } => self
                .items
                .get(index)
                .is_some_and(|item| selected.contains(&item.id())),
            SelectionState::All => index < self.items.len(),
        }
    }

    /// Whether `item` is part of the list and selected.
    pub fn is_item_selected(&self, item: &Item) -> bool {
        self.index_of(item).is_some_and(|index| self.is_selected(index))
    }

    /// Selected items in list order.
    pub fn selected_items(&self) -> Vec<Item> {
        match &self.state {
            SelectionState::Empty => Vec::new(),
            SelectionState::Range(range) => self.items.as_slice()[range.start()..=range.end()].to_vec(),
            SelectionState::Mixed { selected, .. } => self
                .items
                .iter()
                .filter(|item| selected.contains(&item.id()))
                .cloned()
                .collect(),
            SelectionState::All => self.items.as_slice().to_vec(),
        }
    }

    /// Selected indices in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        match &self.state {
            SelectionState::Empty => Vec::new(),
            SelectionState::Range(range) => range.indices().collect(),
            SelectionState::Mixed { .. } | SelectionState::All => {
                (0..self.items.len()).filter(|&i| self.is_selected(i)).collect()
            }
        }
    }

    /// Index keyboard navigation is anchored at.
    pub fn anchor_index(&self) -> Option<usize> {
        match &self.state {
            SelectionState::Empty => None,
            SelectionState::Range(range) => Some(range.anchor()),
            SelectionState::Mixed { anchor, .. } => anchor.and_then(|id| self.items.position_of(id)),
            SelectionState::All => self.lead.and_then(|id| self.items.position_of(id)),
        }
    }

    /// The item keyboard focus follows.
    pub fn lead_item(&self) -> Option<&Item> {
        self.item_for(self.lead)
    }

    /// The item under the pointer.
    pub fn hovered_item(&self) -> Option<&Item> {
        self.item_for(self.hovered)
    }

    /// Counter bumped on every change, whether or not a listener is set.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take the pending scroll-into-view and focus request, if any.
    ///
    /// Requests for items removed since are dropped.
    pub fn take_reveal_request(&mut self) -> Option<Item> {
        let id = self.reveal.take()?;
        self.item_for(Some(id)).cloned()
    }

    // =========================================================================
    // Selection operations
    // =========================================================================

    /// Drop the whole selection.
    pub fn clear(&mut self) {
        self.affinity.debug_assert_same_thread();
        self.lead = None;
        self.reveal = None;
        self.transition(SelectionState::Empty);
        tracing::trace!(target: targets::SELECTION, "selection cleared");
        self.publish();
    }

    /// Select exactly one item.
    ///
    /// `index` is clamped to the list. On an empty list this clears the
    /// selection. With `focus_and_scroll` a reveal request is recorded for
    /// the item (see [`take_reveal_request`](Self::take_reveal_request)).
    pub fn select_single(&mut self, index: usize, focus_and_scroll: bool) {
        self.affinity.debug_assert_same_thread();
        let Some(index) = self.clamp(index) else {
            self.clear();
            return;
        };

        let id = self.id_at(index);
        self.lead = Some(id);
        if focus_and_scroll {
            self.reveal = Some(id);
        }
        self.transition(SelectionState::Range(RangeSelection::single(index)));
        tracing::trace!(target: targets::SELECTION, index, focus_and_scroll, "selected single item");
        self.publish();
    }

    /// Select every item.
    ///
    /// Does nothing (and publishes nothing) if everything is already
    /// selected or the list is empty.
    pub fn select_all(&mut self) {
        self.affinity.debug_assert_same_thread();
        if self.state == SelectionState::All || self.items.is_empty() {
            return;
        }
        self.transition(SelectionState::All);
        tracing::trace!(target: targets::SELECTION, count = self.items.len(), "selected all");
        self.publish();
    }

    /// Select exactly `items`.
    ///
    /// The lowest selected index becomes the anchor. A contiguous set is
    /// stored as a range, anything else as a mixed selection. Items that
    /// are not part of the list are skipped.
    pub fn select_explicit(&mut self, items: &[Item]) {
        self.affinity.debug_assert_same_thread();
        let mut selected = HashSet::with_capacity(items.len());
        for item in items {
            if self.items.contains(item) {
                selected.insert(item.id());
            } else {
                tracing::warn!(target: targets::SELECTION, ?item, "explicit selection names an item outside the list");
            }
        }

        let state = self.state_from_ids(selected, None);
        self.lead = self.anchor_id_of(&state);
        self.reveal = None;
        self.transition(state);
        tracing::trace!(target: targets::SELECTION, count = self.selected_count(), "explicit selection");
        self.publish();
    }

    /// Flip the item at `index` (clamped) without touching the others.
    ///
    /// The result is always a mixed selection anchored at the toggled item,
    /// even when the selected items happen to be adjacent. Toggling off the
    /// last selected item clears the selection.
    pub fn toggle_at(&mut self, index: usize) {
        self.affinity.debug_assert_same_thread();
        let Some(index) = self.clamp(index) else {
            return;
        };

        let id = self.id_at(index);
        let mut selected = self.selected_ids();
        if !selected.remove(&id) {
            selected.insert(id);
        }

        self.lead = Some(id);
        let state = if selected.is_empty() {
            SelectionState::Empty
        } else {
            SelectionState::Mixed {
                selected,
                anchor: Some(id),
            }
        };
        self.transition(state);
        tracing::trace!(target: targets::SELECTION, index, selected = self.is_selected(index), "toggled item");
        self.publish();
    }

    /// The keyboard navigation primitive.
    ///
    /// Without `resize`, the selection collapses to the single item `count`
    /// steps beyond its far edge in `direction` (clamped). With `resize`,
    /// the lead edge moves `count` steps; see [`RangeSelection::resized`].
    ///
    /// Mixed and all-selections first collapse to the anchor (or lead) item.
    /// The new lead item is recorded as a reveal request. Does nothing on an
    /// empty list.
    ///
    /// Resize steps clamped away at the first or last item are remembered
    /// until the next change. Resizing back in the opposite direction uses
    /// them up before the lead edge moves, so `k` steps down followed by `k`
    /// steps up always return to the starting range.
    ///
    /// # Panics
    ///
    /// Calling this with items present but nothing selected is an invariant
    /// violation; the input layer seeds a selection first.
    pub fn extend_or_move_range(&mut self, direction: Direction, resize: bool, count: usize) {
        self.affinity.debug_assert_same_thread();
        let item_count = self.items.len();
        if item_count == 0 {
            tracing::trace!(target: targets::SELECTION, "navigation on empty list ignored");
            return;
        }

        let current = match &self.state {
            SelectionState::Empty => fatal(InvariantViolation::empty_selection("extend_or_move_range")),
            SelectionState::Range(range) => *range,
            SelectionState::Mixed { .. } | SelectionState::All => RangeSelection::single(self.resolve_anchor()),
        };

        let mut overshoot = None;
        let next = if resize {
            let (count, carried) = match self.overshoot.take() {
                Some((pending, steps)) if pending != direction => {
                    let spent = count.min(steps);
                    if spent == count {
                        self.overshoot = Some((pending, steps - spent)).filter(|&(_, left)| left > 0);
                        tracing::trace!(target: targets::SELECTION, ?direction, spent, "retraction absorbed at boundary");
                        return;
                    }
                    (count - spent, 0)
                }
                Some((_, steps)) => (count, steps),
                None => (count, 0),
            };
            let next = current.resized(direction, count, item_count);
            let swallowed = carried + (count - next.lead().abs_diff(current.lead()));
            if swallowed > 0 {
                overshoot = Some((direction, swallowed));
            }
            next
        } else {
            let target = match direction {
                Direction::Up => current.start().saturating_sub(count),
                Direction::Down => current.end().saturating_add(count).min(item_count - 1),
            };
            RangeSelection::single(target)
        };

        let lead = self.id_at(next.lead());
        self.lead = Some(lead);
        self.reveal = Some(lead);
        self.transition(SelectionState::Range(next));
        tracing::trace!(target: targets::SELECTION, ?direction, resize, count, range = %next, "navigated");
        self.publish();
        self.overshoot = overshoot;
    }

    /// Extend from the current anchor straight to `index` (Shift+click).
    ///
    /// With nothing selected this is [`select_single`](Self::select_single).
    pub fn select_range_to(&mut self, index: usize) {
        self.affinity.debug_assert_same_thread();
        let Some(index) = self.clamp(index) else {
            return;
        };

        let anchor = match &self.state {
            SelectionState::Empty => {
                self.select_single(index, true);
                return;
            }
            SelectionState::Range(range) => range.anchor(),
            SelectionState::Mixed { .. } | SelectionState::All => self.resolve_anchor(),
        };

        let range = RangeSelection::spanning(anchor, index);
        let lead = self.id_at(index);
        self.lead = Some(lead);
        self.reveal = Some(lead);
        self.transition(SelectionState::Range(range));
        tracing::trace!(target: targets::SELECTION, range = %range, "range selection");
        self.publish();
    }

    /// Move the hover marker to the item at `index`, or clear it.
    ///
    /// Hover is not a selection change and is not published.
    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.affinity.debug_assert_same_thread();
        let next = index.and_then(|i| self.items.get(i)).map(Item::id);
        if next == self.hovered {
            return;
        }
        let previous = std::mem::replace(&mut self.hovered, next);
        for id in [previous, next].into_iter().flatten() {
            if let Some(position) = self.items.position_of(id) {
                self.repaint(position);
            }
        }
        self.verify_markers();
    }

    /// Publish without changing the selection.
    ///
    /// Used after the data of listed items changed, so listeners re-query
    /// what they derive from it (toolbar enablement, for instance).
    pub fn notify_items_changed(&mut self) {
        self.affinity.debug_assert_same_thread();
        tracing::trace!(target: targets::SELECTION, "item data changed");
        self.publish();
    }

    // =========================================================================
    // Structural changes
    // =========================================================================

    /// Append `item`. Returns its index.
    pub fn push_item(&mut self, item: Item) -> usize {
        let index = self.items.len();
        self.insert_item(index, item)
    }

    /// Insert `item` at `index` (clamped). Returns the index used.
    ///
    /// A range that the insertion point splits becomes a mixed selection in
    /// which the new item is not selected. Under an all-selection the new
    /// item is selected.
    pub fn insert_item(&mut self, index: usize, item: Item) -> usize {
        self.affinity.debug_assert_same_thread();
        if let Some(existing) = self.items.index_of(&item) {
            tracing::warn!(target: targets::SELECTION, ?item, existing, "item already in list");
            return existing;
        }

        let position = self.items.insert(index, item);
        if let SelectionState::Range(range) = self.state {
            if position <= range.start() {
                self.state = SelectionState::Range(RangeSelection::new(range.anchor() + 1, range.length()));
            } else if position <= range.end() {
                let selected = range
                    .indices()
                    .map(|i| if i < position { i } else { i + 1 })
                    .map(|i| self.id_at(i))
                    .collect();
                let anchor_at = if range.anchor() < position {
                    range.anchor()
                } else {
                    range.anchor() + 1
                };
                self.state = SelectionState::Mixed {
                    selected,
                    anchor: Some(self.id_at(anchor_at)),
                };
            }
        }

        self.repaint(position);
        self.verify_markers();
        tracing::trace!(target: targets::SELECTION, position, count = self.items.len(), "item inserted");
        self.publish();
        position
    }

    /// Remove `item` from the list.
    ///
    /// # Panics
    ///
    /// `item` must be part of the list.
    #[track_caller]
    pub fn remove_item(&mut self, item: &Item) -> Item {
        let Some(index) = self.items.index_of(item) else {
            fatal(InvariantViolation::item_not_found("remove_item", item));
        };
        match self.remove_at(index) {
            Some(removed) => removed,
            None => fatal(InvariantViolation::item_not_found("remove_item", item)),
        }
    }

    /// Remove the item at `index`. Out-of-range indices are ignored.
    ///
    /// The selection keeps covering the same remaining items. The removed
    /// item's marker is reset.
    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        self.affinity.debug_assert_same_thread();
        let removed = self.items.remove(index)?;
        let id = removed.id();

        self.state = match std::mem::take(&mut self.state) {
            SelectionState::Empty => SelectionState::Empty,
            SelectionState::Range(range) => Self::range_after_removal(range, index),
            SelectionState::Mixed { mut selected, anchor } => {
                selected.remove(&id);
                if selected.is_empty() {
                    SelectionState::Empty
                } else {
                    SelectionState::Mixed {
                        selected,
                        anchor: anchor.filter(|&a| a != id),
                    }
                }
            }
            SelectionState::All if self.items.is_empty() => SelectionState::Empty,
            SelectionState::All => SelectionState::All,
        };
        for slot in [&mut self.hovered, &mut self.lead, &mut self.reveal] {
            if *slot == Some(id) {
                *slot = None;
            }
        }

        removed.set_marker(SelectionMarker::None);
        self.verify_markers();
        tracing::trace!(target: targets::SELECTION, index, count = self.items.len(), "item removed");
        self.publish();
        Some(removed)
    }

    /// Move the item at `from` to `to` (clamped).
    ///
    /// The same items stay selected. A range whose items are no longer
    /// adjacent, or whose anchor ends up inside, becomes a mixed selection.
    pub fn move_item(&mut self, from: usize, to: usize) -> Option<usize> {
        self.affinity.debug_assert_same_thread();
        let previous = match &self.state {
            SelectionState::Range(range) => {
                Some((self.ids_in(range.indices()), self.id_at(range.anchor())))
            }
            _ => None,
        };

        let position = self.items.move_item(from, to)?;
        if let Some((selected, anchor)) = previous {
            self.state = self.state_from_ids(selected, Some(anchor));
        }

        self.verify_markers();
        tracing::trace!(target: targets::SELECTION, from, to = position, "item moved");
        self.publish();
        Some(position)
    }

    /// Replace every item, dropping the selection.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.affinity.debug_assert_same_thread();
        for item in self.items.iter() {
            item.set_marker(SelectionMarker::None);
        }

        self.items = ItemList::from_items(items);
        let _span = PerfSpan::with_count(span_names::SET_ITEMS, self.items.len());
        self.state = SelectionState::Empty;
        self.hovered = None;
        self.lead = None;
        self.reveal = None;
        self.refresh_all_markers();
        tracing::debug!(target: targets::SELECTION, count = self.items.len(), "items replaced");
        self.publish();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn publish(&mut self) {
        self.overshoot = None;
        self.revision += 1;
        self.selection_changed.publish(self);
    }

    fn clamp(&self, index: usize) -> Option<usize> {
        let last = self.items.len().checked_sub(1)?;
        if index > last {
            tracing::trace!(target: targets::SELECTION, index, last, "index clamped");
        }
        Some(index.min(last))
    }

    fn id_at(&self, index: usize) -> ItemId {
        match self.items.get(index) {
            Some(item) => item.id(),
            None => fatal(InvariantViolation::item_not_found("id_at", index)),
        }
    }

    fn item_for(&self, id: Option<ItemId>) -> Option<&Item> {
        id.and_then(|id| self.items.position_of(id))
            .and_then(|index| self.items.get(index))
    }

    fn ids_in(&self, indices: impl IntoIterator<Item = usize>) -> HashSet<ItemId> {
        indices.into_iter().map(|i| self.id_at(i)).collect()
    }

    fn selected_ids(&self) -> HashSet<ItemId> {
        match &self.state {
            SelectionState::Empty => HashSet::new(),
            SelectionState::Range(range) => self.ids_in(range.indices()),
            SelectionState::Mixed { selected, .. } => selected.clone(),
            SelectionState::All => self.items.iter().map(Item::id).collect(),
        }
    }

    fn anchor_id_of(&self, state: &SelectionState) -> Option<ItemId> {
        match state {
            SelectionState::Range(range) => Some(self.id_at(range.anchor())),
            SelectionState::Mixed { anchor, .. } => *anchor,
            SelectionState::Empty | SelectionState::All => None,
        }
    }

    /// Build the encoding for a set of selected items.
    ///
    /// The anchor defaults to the lowest selected index. A contiguous set
    /// with its anchor at either end becomes a range.
    fn state_from_ids(&self, selected: HashSet<ItemId>, anchor: Option<ItemId>) -> SelectionState {
        let mut indices: Vec<usize> = selected
            .iter()
            .filter_map(|&id| self.items.position_of(id))
            .collect();
        indices.sort_unstable();
        let (Some(&low), Some(&high)) = (indices.first(), indices.last()) else {
            return SelectionState::Empty;
        };

        let anchor_index = anchor
            .and_then(|id| self.items.position_of(id))
            .filter(|i| selected.contains(&self.id_at(*i)))
            .unwrap_or(low);
        let contiguous = high - low + 1 == indices.len();

        if contiguous && anchor_index == low {
            SelectionState::Range(RangeSelection::spanning(low, high))
        } else if contiguous && anchor_index == high {
            SelectionState::Range(RangeSelection::spanning(high, low))
        } else {
            SelectionState::Mixed {
                selected,
                anchor: Some(self.id_at(anchor_index)),
            }
        }
    }

    /// The index a mixed or all-selection collapses to before navigation.
    fn resolve_anchor(&self) -> usize {
        let candidate = match &self.state {
            SelectionState::Mixed { anchor, .. } => anchor.or(self.lead),
            _ => self.lead,
        };
        if let Some(index) = candidate
            .and_then(|id| self.items.position_of(id))
            .filter(|&i| self.is_selected(i))
        {
            return index;
        }
        match (0..self.items.len()).find(|&i| self.is_selected(i)) {
            Some(index) => index,
            None => fatal(InvariantViolation::empty_selection("resolve_anchor")),
        }
    }

    fn range_after_removal(range: RangeSelection, removed: usize) -> SelectionState {
        if removed < range.start() {
            return SelectionState::Range(RangeSelection::new(range.anchor() - 1, range.length()));
        }
        if removed > range.end() {
            return SelectionState::Range(range);
        }
        if range.is_single() {
            return SelectionState::Empty;
        }

        // The removed item was covered: the run loses one item toward the anchor.
        let shorter = range.length() - range.length().signum();
        let anchor = if removed < range.anchor() || (removed == range.anchor() && !range.is_forward()) {
            range.anchor() - 1
        } else {
            range.anchor()
        };
        SelectionState::Range(RangeSelection::new(anchor, shorter))
    }

    /// Switch to `next`, repainting every item whose marker may change.
    fn transition(&mut self, next: SelectionState) {
        let before = self.covered_indices();
        self.state = next;
        for index in before.into_iter().chain(self.covered_indices()) {
            self.repaint(index);
        }
        self.verify_markers();
    }

    /// Indices whose marker is not `None` under the current state.
    fn covered_indices(&self) -> Vec<usize> {
        let mut indices = match &self.state {
            SelectionState::Empty => Vec::new(),
            SelectionState::Range(range) => range.indices().collect(),
            SelectionState::Mixed { selected, .. } => selected
                .iter()
                .filter_map(|&id| self.items.position_of(id))
                .collect(),
            SelectionState::All => (0..self.items.len()).collect(),
        };
        if let Some(hovered) = self.hovered.and_then(|id| self.items.position_of(id)) {
            indices.push(hovered);
        }
        indices
    }

    fn expected_marker(&self, index: usize) -> SelectionMarker {
        if self.is_selected(index) {
            SelectionMarker::Selected
        } else if self.hovered.is_some() && self.hovered == self.items.get(index).map(Item::id) {
            SelectionMarker::Hover
        } else {
            SelectionMarker::None
        }
    }

    fn repaint(&self, index: usize) {
        if let Some(item) = self.items.get(index) {
            item.set_marker(self.expected_marker(index));
        }
    }

    fn refresh_all_markers(&self) {
        for index in 0..self.items.len() {
            self.repaint(index);
        }
        self.verify_markers();
    }

    /// Check every marker against the encoding (debug builds only).
    fn verify_markers(&self) {
        #[cfg(debug_assertions)]
        for (index, item) in self.items.iter().enumerate() {
            let expected = self.expected_marker(index);
            let actual = item.marker();
            if actual != expected {
                fatal(InvariantViolation::MarkerDesync {
                    index,
                    actual: actual.to_string(),
                    expected: expected.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PluginDescriptor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(PluginDescriptor::new(format!("p{i}"), format!("Plugin {i}"), "1.0")))
            .collect()
    }

    fn model(n: usize) -> SelectionModel {
        SelectionModel::with_items(items(n))
    }

    fn marked(model: &SelectionModel) -> Vec<usize> {
        model
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    fn counting_listener(model: &SelectionModel) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        model.selection_changed().set_listener(move |_: &SelectionModel| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    // =========================================================================
    // RangeSelection
    // =========================================================================

    #[test]
    fn test_range_accessors() {
        let forward = RangeSelection::new(3, 3);
        assert_eq!((forward.start(), forward.end(), forward.lead()), (3, 5, 5));
        assert!(forward.is_forward());

        let backward = RangeSelection::new(5, -3);
        assert_eq!((backward.start(), backward.end(), backward.lead()), (3, 5, 3));
        assert!(backward.contains(4));
        assert!(!backward.contains(6));
        assert_eq!(backward.len(), 3);
    }

    #[test]
    fn test_range_spanning() {
        assert_eq!(RangeSelection::spanning(2, 2), RangeSelection::single(2));
        assert_eq!(RangeSelection::spanning(2, 4).length(), 3);
        assert_eq!(RangeSelection::spanning(4, 2).length(), -3);
    }

    #[test]
    #[should_panic(expected = "zero length")]
    fn test_zero_length_range_is_fatal() {
        let _ = RangeSelection::new(2, 0);
    }

    #[test]
    fn test_resize_shrinks_then_reenters() {
        // [3..=5] anchored at 3, lead moves up 3: shrink to {3}, then one more above.
        let range = RangeSelection::new(3, 3).resized(Direction::Up, 3, 10);
        assert_eq!(range, RangeSelection::new(3, -2));
        assert_eq!((range.start(), range.end()), (2, 3));
    }

    #[test]
    fn test_resize_crossing_with_no_budget_left_is_single() {
        let range = RangeSelection::new(5, -3).resized(Direction::Down, 2, 10);
        assert_eq!(range, RangeSelection::single(5));
    }

    #[test]
    fn test_resize_clamps_to_list() {
        assert_eq!(RangeSelection::single(7).resized(Direction::Down, 100, 10), RangeSelection::new(7, 3));
        assert_eq!(RangeSelection::single(2).resized(Direction::Up, 100, 10), RangeSelection::new(2, -3));
        assert_eq!(RangeSelection::single(0).resized(Direction::Up, 1, 10), RangeSelection::single(0));
    }

    // =========================================================================
    // Operations
    // =========================================================================

    #[test]
    fn test_select_single_marks_exactly_one() {
        let mut model = model(6);
        for index in [2, 0, 5, 99, 3] {
            model.select_single(index, false);
            assert_eq!(marked(&model), vec![index.min(5)]);
            assert_eq!(model.kind(), SelectionKind::Single);
        }
    }

    #[test]
    fn test_select_single_is_idempotent() {
        let mut model = model(5);
        model.select_single(2, false);
        let once = model.state().clone();
        model.select_single(2, false);
        assert_eq!(model.state(), &once);
        assert_eq!(marked(&model), vec![2]);
    }

    #[test]
    fn test_clear() {
        let mut model = model(3);
        model.select_single(1, true);
        model.clear();
        assert_eq!(model.kind(), SelectionKind::Empty);
        assert!(marked(&model).is_empty());
        assert!(model.lead_item().is_none());
        assert!(model.take_reveal_request().is_none());
    }

    #[test]
    fn test_select_single_on_empty_list() {
        let mut model = SelectionModel::new();
        model.select_single(0, true);
        assert_eq!(model.kind(), SelectionKind::Empty);
        assert!(model.take_reveal_request().is_none());
    }

    #[test]
    fn test_focus_and_scroll_records_reveal_request() {
        let mut model = model(4);
        model.select_single(2, true);
        let revealed = model.take_reveal_request();
        assert_eq!(revealed.as_ref(), model.item_at(2));
        assert!(model.take_reveal_request().is_none());

        model.select_single(1, false);
        assert!(model.take_reveal_request().is_none());
    }

    #[test]
    fn test_select_all_then_single() {
        let mut model = model(5);
        model.select_all();
        assert_eq!(marked(&model), vec![0, 1, 2, 3, 4]);
        model.select_single(3, false);
        assert_eq!(marked(&model), vec![3]);
        assert_eq!(model.selected_count(), 1);
        assert_eq!(model.kind(), SelectionKind::Single);
    }

    #[test]
    fn test_select_all_when_all_does_not_publish() {
        let mut model = model(3);
        let count = counting_listener(&model);
        model.select_all();
        model.select_all();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_toggle_sequence_leaves_other_item() {
        let mut model = model(5);
        model.toggle_at(1);
        model.toggle_at(2);
        model.toggle_at(1);
        assert_eq!(marked(&model), vec![2]);
        assert_eq!(model.kind(), SelectionKind::Mixed);
    }

    #[test]
    fn test_toggle_adjacent_stays_mixed() {
        let mut model = model(5);
        model.select_single(1, false);
        model.toggle_at(2);
        assert_eq!(marked(&model), vec![1, 2]);
        assert_eq!(model.kind(), SelectionKind::Mixed);
        assert_eq!(model.anchor_index(), Some(2));
    }

    #[test]
    fn test_toggle_last_item_off_clears() {
        let mut model = model(3);
        model.toggle_at(1);
        model.toggle_at(1);
        assert_eq!(model.kind(), SelectionKind::Empty);
    }

    #[test]
    fn test_toggle_from_all() {
        let mut model = model(4);
        model.select_all();
        model.toggle_at(0);
        assert_eq!(marked(&model), vec![1, 2, 3]);
        assert_eq!(model.kind(), SelectionKind::Mixed);
    }

    #[test]
    fn test_extend_then_retract_round_trip() {
        for start in 0..6 {
            for k in 0..9 {
                let mut model = model(6);
                model.select_single(start, false);
                let single = model.state().clone();
                for _ in 0..k {
                    model.extend_or_move_range(Direction::Down, true, 1);
                }
                let expected: Vec<usize> = (start..=(start + k).min(5)).collect();
                assert_eq!(marked(&model), expected);
                for _ in 0..k {
                    model.extend_or_move_range(Direction::Up, true, 1);
                }
                assert_eq!(model.state(), &single, "start {start}, k {k}");
                assert_eq!(marked(&model), vec![start]);
            }
        }
    }

    #[test]
    fn test_retract_spends_clamped_steps_first() {
        let mut model = model(5);
        model.select_single(3, false);
        model.extend_or_move_range(Direction::Down, true, 4);
        assert_eq!(marked(&model), vec![3, 4]);
        let revision = model.revision();

        // Three of the four steps were clamped away at the last item.
        model.extend_or_move_range(Direction::Up, true, 2);
        assert_eq!(marked(&model), vec![3, 4]);
        assert_eq!(model.revision(), revision);

        model.extend_or_move_range(Direction::Up, true, 2);
        assert_eq!(marked(&model), vec![3]);
        model.extend_or_move_range(Direction::Up, true, 1);
        assert_eq!(marked(&model), vec![2, 3]);
    }

    #[test]
    fn test_retract_upward_overshoot() {
        let mut model = model(5);
        model.select_single(1, false);
        model.extend_or_move_range(Direction::Up, true, 3);
        assert_eq!(marked(&model), vec![0, 1]);
        model.extend_or_move_range(Direction::Down, true, 3);
        assert_eq!(model.state(), &SelectionState::Range(RangeSelection::single(1)));
    }

    #[test]
    fn test_clamped_steps_forgotten_after_other_change() {
        let mut model = model(5);
        model.select_single(3, false);
        model.extend_or_move_range(Direction::Down, true, 4);
        model.set_hovered(Some(0));
        model.toggle_at(0);
        model.toggle_at(0);
        model.select_single(3, false);
        model.extend_or_move_range(Direction::Down, true, 1);
        model.extend_or_move_range(Direction::Up, true, 1);
        assert_eq!(marked(&model), vec![3]);

        model.extend_or_move_range(Direction::Down, true, 4);
        model.push_item(Item::new(PluginDescriptor::new("n", "N", "1.0")));
        model.extend_or_move_range(Direction::Up, true, 1);
        assert_eq!(marked(&model), vec![3]);
    }

    #[test]
    fn test_shift_navigation_scenario() {
        let mut model = model(10);
        model.select_single(3, false);
        model.extend_or_move_range(Direction::Down, true, 1);
        model.extend_or_move_range(Direction::Down, true, 1);
        model.extend_or_move_range(Direction::Up, true, 1);
        assert_eq!(marked(&model), vec![3, 4]);

        model.select_single(7, true);
        assert_eq!(marked(&model), vec![7]);
        assert_eq!(model.state(), &SelectionState::Range(RangeSelection::single(7)));
    }

    #[test]
    fn test_extend_past_anchor_reverses() {
        let mut model = model(10);
        model.select_single(5, false);
        model.extend_or_move_range(Direction::Down, true, 2);
        model.extend_or_move_range(Direction::Up, true, 4);
        assert_eq!(marked(&model), vec![3, 4, 5]);
        assert_eq!(model.anchor_index(), Some(5));
    }

    #[test]
    fn test_move_clamps_to_bounds() {
        for start in 0..7 {
            let mut model = model(7);
            model.select_single(start, false);
            model.extend_or_move_range(Direction::Up, false, 1_000_000);
            assert_eq!(model.state(), &SelectionState::Range(RangeSelection::single(0)));

            model.select_single(start, false);
            model.extend_or_move_range(Direction::Down, false, 1_000_000);
            assert_eq!(model.state(), &SelectionState::Range(RangeSelection::single(6)));
        }
    }

    #[test]
    fn test_move_goes_from_far_edge() {
        let mut model = model(10);
        model.select_range_to(0);
        model.select_single(2, false);
        model.select_range_to(4);
        model.extend_or_move_range(Direction::Down, false, 1);
        assert_eq!(marked(&model), vec![5]);

        model.select_range_to(3);
        model.extend_or_move_range(Direction::Up, false, 1);
        assert_eq!(marked(&model), vec![2]);
    }

    #[test]
    fn test_navigation_from_mixed_continues_at_anchor() {
        let mut model = model(10);
        model.toggle_at(2);
        model.toggle_at(6);
        model.extend_or_move_range(Direction::Down, false, 1);
        assert_eq!(marked(&model), vec![7]);
    }

    #[test]
    fn test_navigation_from_all_uses_lead() {
        let mut model = model(10);
        model.select_single(4, false);
        model.select_all();
        model.extend_or_move_range(Direction::Down, true, 1);
        assert_eq!(marked(&model), vec![4, 5]);
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let mut model = SelectionModel::new();
        let count = counting_listener(&model);
        for direction in [Direction::Up, Direction::Down] {
            model.extend_or_move_range(direction, true, 1);
            model.extend_or_move_range(direction, false, usize::MAX);
        }
        assert_eq!(model.kind(), SelectionKind::Empty);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    #[should_panic(expected = "non-empty selection")]
    fn test_navigation_without_selection_is_fatal() {
        let mut model = model(3);
        model.extend_or_move_range(Direction::Down, true, 1);
    }

    #[test]
    fn test_select_range_to() {
        let mut model = model(10);
        model.select_single(4, false);
        model.select_range_to(1);
        assert_eq!(marked(&model), vec![1, 2, 3, 4]);
        assert_eq!(model.anchor_index(), Some(4));
        model.select_range_to(6);
        assert_eq!(marked(&model), vec![4, 5, 6]);
        assert_eq!(model.kind(), SelectionKind::Range);
    }

    #[test]
    fn test_select_range_to_from_empty_selects_single() {
        let mut model = model(5);
        model.select_range_to(3);
        assert_eq!(marked(&model), vec![3]);
    }

    #[test]
    fn test_select_explicit() {
        let mut model = model(8);
        let items = model.items().to_vec();

        model.select_explicit(&[items[4].clone(), items[2].clone(), items[3].clone()]);
        assert_eq!(model.state(), &SelectionState::Range(RangeSelection::new(2, 3)));

        model.select_explicit(&[items[6].clone(), items[1].clone()]);
        assert_eq!(model.kind(), SelectionKind::Mixed);
        assert_eq!(model.anchor_index(), Some(1));
        assert_eq!(marked(&model), vec![1, 6]);

        let stranger = Item::new(PluginDescriptor::new("x", "X", "1.0"));
        model.select_explicit(&[stranger]);
        assert_eq!(model.kind(), SelectionKind::Empty);
    }

    #[test]
    fn test_hover_is_not_selection() {
        let mut model = model(4);
        let count = counting_listener(&model);
        model.select_single(1, false);
        model.set_hovered(Some(2));
        assert_eq!(model.item_at(2).map(Item::marker), Some(SelectionMarker::Hover));

        // Hover over a selected item keeps it selected
        model.set_hovered(Some(1));
        assert_eq!(model.item_at(1).map(Item::marker), Some(SelectionMarker::Selected));
        assert_eq!(model.item_at(2).map(Item::marker), Some(SelectionMarker::None));

        model.select_single(3, false);
        assert_eq!(model.item_at(1).map(Item::marker), Some(SelectionMarker::Hover));

        model.set_hovered(None);
        assert!(model.hovered_item().is_none());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_every_operation_publishes() {
        let mut model = model(6);
        let count = counting_listener(&model);
        model.select_single(0, false);
        model.extend_or_move_range(Direction::Down, true, 1);
        model.toggle_at(4);
        model.select_range_to(2);
        model.select_all();
        model.clear();
        assert_eq!(count.load(Ordering::SeqCst), 6);
        assert_eq!(model.revision(), 6);
    }

    #[test]
    fn test_listener_sees_consistent_markers() {
        let mut model = model(6);
        model.selection_changed().set_listener(|model: &SelectionModel| {
            let flagged = model.items().iter().filter(|item| item.is_selected()).count();
            assert_eq!(flagged, model.selected_count());
        });
        model.select_single(1, false);
        model.extend_or_move_range(Direction::Down, true, 3);
        model.select_all();
        model.toggle_at(2);
    }

    #[test]
    fn test_notify_items_changed_keeps_selection() {
        let mut model = model(4);
        model.select_single(1, false);
        model.select_range_to(2);
        let state = model.state().clone();
        let count = counting_listener(&model);
        model.notify_items_changed();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(model.state(), &state);
        assert_eq!(marked(&model), vec![1, 2]);
    }

    // =========================================================================
    // Structural changes
    // =========================================================================

    #[test]
    fn test_remove_under_all_keeps_rest_selected() {
        let mut model = model(5);
        model.select_all();
        let removed = model.remove_at(2);
        assert_eq!(removed.map(|item| item.marker()), Some(SelectionMarker::None));
        assert_eq!(model.selected_items().len(), 4);
        assert!(model.items().iter().all(Item::is_selected));
        assert_eq!(model.kind(), SelectionKind::All);
    }

    #[test]
    fn test_remove_before_range_shifts_anchor() {
        let mut model = model(8);
        model.select_single(3, false);
        model.extend_or_move_range(Direction::Down, true, 2);
        let selected = model.selected_items();
        model.remove_at(0);
        assert_eq!(model.selected_items(), selected);
        assert_eq!(model.anchor_index(), Some(2));
    }

    #[test]
    fn test_remove_inside_range() {
        let mut model = model(8);
        model.select_single(5, false);
        model.extend_or_move_range(Direction::Up, true, 2);
        let items = model.items().to_vec();

        // Removing the anchor of a backward range moves the anchor up.
        model.remove_item(&items[5]);
        assert_eq!(model.selected_items(), vec![items[3].clone(), items[4].clone()]);
        assert_eq!(model.anchor_index(), Some(4));

        model.remove_item(&items[3]);
        assert_eq!(model.selected_items(), vec![items[4].clone()]);
        model.remove_item(&items[4]);
        assert_eq!(model.kind(), SelectionKind::Empty);
    }

    #[test]
    fn test_remove_forward_anchor() {
        let mut model = model(8);
        model.select_single(2, false);
        model.select_range_to(4);
        let items = model.items().to_vec();
        model.remove_at(2);
        assert_eq!(model.selected_items(), vec![items[3].clone(), items[4].clone()]);
        assert_eq!(model.anchor_index(), Some(2));
    }

    #[test]
    fn test_remove_mixed_member() {
        let mut model = model(6);
        model.toggle_at(1);
        model.toggle_at(4);
        let items = model.items().to_vec();
        model.remove_at(4);
        assert_eq!(model.selected_items(), vec![items[1].clone()]);
        assert_eq!(model.anchor_index(), None);
        model.remove_at(1);
        assert_eq!(model.kind(), SelectionKind::Empty);
    }

    #[test]
    fn test_remove_clears_hover_and_reveal() {
        let mut model = model(4);
        model.select_single(2, true);
        model.set_hovered(Some(2));
        model.remove_at(2);
        assert!(model.hovered_item().is_none());
        assert!(model.take_reveal_request().is_none());
        assert!(model.lead_item().is_none());
    }

    #[test]
    #[should_panic(expected = "not part of the item list")]
    fn test_remove_unknown_item_is_fatal() {
        let mut model = model(2);
        let stranger = Item::new(PluginDescriptor::new("x", "X", "1.0"));
        model.remove_item(&stranger);
    }

    #[test]
    fn test_insert_around_range() {
        let mut model = model(6);
        model.select_single(2, false);
        model.select_range_to(3);
        let selected = model.selected_items();

        let before = Item::new(PluginDescriptor::new("a", "A", "1.0"));
        model.insert_item(0, before.clone());
        assert_eq!(model.selected_items(), selected);
        assert!(!before.is_selected());

        let after = Item::new(PluginDescriptor::new("b", "B", "1.0"));
        model.push_item(after.clone());
        assert_eq!(model.selected_items(), selected);
        assert_eq!(model.kind(), SelectionKind::Range);
    }

    #[test]
    fn test_insert_inside_range_becomes_mixed() {
        let mut model = model(6);
        model.select_single(1, false);
        model.select_range_to(3);
        let selected = model.selected_items();

        let inside = Item::new(PluginDescriptor::new("n", "N", "1.0"));
        model.insert_item(2, inside.clone());
        assert_eq!(model.kind(), SelectionKind::Mixed);
        assert_eq!(model.selected_items(), selected);
        assert!(!inside.is_selected());
        assert_eq!(model.anchor_index(), Some(1));
    }

    #[test]
    fn test_insert_under_all_selects_new_item() {
        let mut model = model(3);
        model.select_all();
        let item = Item::new(PluginDescriptor::new("n", "N", "1.0"));
        model.insert_item(1, item.clone());
        assert!(item.is_selected());
        assert_eq!(model.selected_count(), 4);
    }

    #[test]
    fn test_move_item_keeps_selection() {
        let mut model = model(6);
        model.select_single(1, false);
        model.select_range_to(2);
        let selected = model.selected_items();

        model.move_item(5, 0);
        assert_eq!(model.selected_items(), selected);
        assert_eq!(model.kind(), SelectionKind::Range);
        assert_eq!(model.anchor_index(), Some(2));

        model.move_item(2, 5);
        assert_eq!(model.kind(), SelectionKind::Mixed);
        assert_eq!(model.selected_count(), 2);
    }

    #[test]
    fn test_set_items_clears() {
        let mut model = model(4);
        let old = model.items().to_vec();
        model.select_all();
        model.set_items(items(2));
        assert_eq!(model.kind(), SelectionKind::Empty);
        assert!(old.iter().all(|item| !item.is_selected()));
        assert_eq!(model.len(), 2);
    }

    static_assertions::assert_impl_all!(SelectionModel: Send, Sync);
}
