//! Error types for Horizon Pluglist.
//!
//! The selection subsystem never hands a recoverable error back to its
//! caller. Out-of-range indices coming from user navigation are clamped, and
//! everything else that can go wrong is a broken precondition inside the
//! program. Those are described by [`InvariantViolation`] and raised through
//! [`fatal`], which logs the violation and panics.

use crate::logging::targets;

/// A broken precondition of the selection state machine.
///
/// Continuing after one of these would silently desynchronize the visible
/// selection from keyboard focus, so they are never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// An operation that continues an existing selection found none.
    #[error("'{operation}' requires a non-empty selection, but the selection is empty")]
    EmptySelection {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// An item that had to be part of the list was not found in it.
    #[error("'{operation}': item {item} is not part of the item list")]
    ItemNotFound {
        /// The operation that was attempted.
        operation: &'static str,
        /// Debug rendering of the missing item.
        item: String,
    },

    /// An item's selection marker disagrees with the selection encoding.
    #[error("selection marker of item at index {index} is {actual}, expected {expected}")]
    MarkerDesync {
        /// Position of the offending item.
        index: usize,
        /// Marker found on the item.
        actual: String,
        /// Marker implied by the selection encoding.
        expected: String,
    },

    /// A range selection was constructed with a zero length.
    #[error("range selection anchored at {anchor} has zero length")]
    ZeroLengthRange {
        /// Anchor of the invalid range.
        anchor: usize,
    },
}

impl InvariantViolation {
    /// Create an empty-selection violation.
    pub fn empty_selection(operation: &'static str) -> Self {
        Self::EmptySelection { operation }
    }

    /// Create an item-not-found violation.
    pub fn item_not_found(operation: &'static str, item: impl std::fmt::Debug) -> Self {
        Self::ItemNotFound {
            operation,
            item: format!("{item:?}"),
        }
    }
}

/// Report an invariant violation and abort the current operation.
///
/// The violation is logged at error level before panicking so that it shows
/// up in traces even when the panic is caught further up.
#[cold]
#[inline(never)]
#[track_caller]
pub fn fatal(violation: InvariantViolation) -> ! {
    let location = std::panic::Location::caller();
    tracing::error!(
        target: targets::INVARIANT,
        %violation,
        file = location.file(),
        line = location.line(),
        "selection invariant violated"
    );
    panic!(
        "\n\
        ══════════════════════════════════════════════════════════════════════\n\
        SELECTION INVARIANT VIOLATION\n\
        ══════════════════════════════════════════════════════════════════════\n\
        \n\
        {violation}\n\
        \n\
        Location: {location}\n\
        \n\
        The selection state machine was driven outside its preconditions.\n\
        Continuing would leave item markers out of sync with the selection.\n\
        \n\
        ══════════════════════════════════════════════════════════════════════"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let err = InvariantViolation::empty_selection("extend_or_move_range");
        assert_eq!(
            err.to_string(),
            "'extend_or_move_range' requires a non-empty selection, but the selection is empty"
        );
    }

    #[test]
    fn test_item_not_found_uses_debug() {
        let err = InvariantViolation::item_not_found("focus", 42u64);
        assert_eq!(err.to_string(), "'focus': item 42 is not part of the item list");
    }

    #[test]
    #[should_panic(expected = "SELECTION INVARIANT VIOLATION")]
    fn test_fatal_panics() {
        fatal(InvariantViolation::ZeroLengthRange { anchor: 3 });
    }
}
