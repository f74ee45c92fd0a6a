//! Scoped boolean flags.
//!
//! A [`ScopedFlag`] is raised for the lifetime of a [`ScopedFlagGuard`] and
//! lowered again when the guard is dropped, including during unwinding. It
//! replaces process-wide "suppress" booleans: each owner gets its own flag,
//! and forgetting to reset it is impossible.
//!
//! ```
//! use horizon_pluglist_core::ScopedFlag;
//!
//! let suppress = ScopedFlag::new();
//! {
//!     let _guard = suppress.raise();
//!     assert!(suppress.is_raised());
//! }
//! assert!(!suppress.is_raised());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A flag that is set only while at least one guard is alive.
///
/// Cloning a `ScopedFlag` shares the underlying state, so a clone handed to
/// a collaborator observes guards raised through the original.
#[derive(Debug, Clone, Default)]
pub struct ScopedFlag {
    depth: Arc<AtomicUsize>,
}

impl ScopedFlag {
    /// Create a lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag until the returned guard is dropped.
    ///
    /// Guards nest: the flag stays raised until the last one is dropped.
    pub fn raise(&self) -> ScopedFlagGuard {
        self.depth.fetch_add(1, Ordering::SeqCst);
        ScopedFlagGuard {
            depth: Arc::clone(&self.depth),
        }
    }

    /// Check whether any guard is currently alive.
    pub fn is_raised(&self) -> bool {
        self.depth.load(Ordering::SeqCst) > 0
    }
}

/// Guard returned by [`ScopedFlag::raise`].
#[derive(Debug)]
#[must_use = "the flag is lowered as soon as the guard is dropped"]
pub struct ScopedFlagGuard {
    depth: Arc<AtomicUsize>,
}

impl Drop for ScopedFlagGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards_nest() {
        let flag = ScopedFlag::new();
        let outer = flag.raise();
        let inner = flag.raise();
        drop(outer);
        assert!(flag.is_raised());
        drop(inner);
        assert!(!flag.is_raised());
    }

    #[test]
    fn test_clone_shares_state() {
        let flag = ScopedFlag::new();
        let observer = flag.clone();
        let _guard = flag.raise();
        assert!(observer.is_raised());
    }

    #[test]
    fn test_lowered_on_unwind() {
        let flag = ScopedFlag::new();
        let flag_clone = flag.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = flag_clone.raise();
            panic!("programmatic focus failed");
        });
        assert!(result.is_err());
        assert!(!flag.is_raised());
    }
}
