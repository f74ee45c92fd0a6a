//! Single-slot change publisher.
//!
//! A [`Publisher`] holds at most one listener. Registering a listener
//! replaces whatever was registered before, which matches views that have
//! exactly one dependent pane to refresh (a details panel, a toolbar).
//!
//! Listeners receive a reference to the publishing object and re-query
//! whatever state they need. No diff is passed along.
//!
//! # Example
//!
//! ```
//! use horizon_pluglist_core::Publisher;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let publisher = Publisher::<Vec<u32>>::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let seen_clone = seen.clone();
//!
//! publisher.set_listener(move |values: &Vec<u32>| {
//!     seen_clone.store(values.len(), Ordering::SeqCst);
//! });
//!
//! publisher.publish(&vec![1, 2, 3]);
//! assert_eq!(seen.load(Ordering::SeqCst), 3);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// A publisher with a single replaceable listener slot.
///
/// # Type Parameter
///
/// - `T`: The type handed to the listener by reference. May be unsized.
///
/// # Thread Safety
///
/// `Publisher<T>` is `Send + Sync`; the listener is always invoked directly on
/// the thread that calls [`publish`](Self::publish).
pub struct Publisher<T: ?Sized> {
    /// The registered listener, if any.
    listener: Mutex<Option<Arc<dyn Fn(&T) + Send + Sync>>>,
    /// Whether publishing is temporarily blocked.
    blocked: AtomicBool,
    /// Number of publications delivered to a listener.
    delivered: AtomicU64,
}

impl<T: ?Sized> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Publisher<T> {
    /// Create a publisher with an empty slot.
    pub fn new() -> Self {
        Self {
            listener: Mutex::new(None),
            blocked: AtomicBool::new(false),
            delivered: AtomicU64::new(0),
        }
    }

    /// Register `listener`, replacing any previously registered one.
    ///
    /// Returns `true` if a previous listener was replaced.
    pub fn set_listener<F>(&self, listener: F) -> bool
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let replaced = self.listener.lock().replace(Arc::new(listener)).is_some();
        if replaced {
            tracing::debug!(target: targets::PUBLISHER, "replaced selection listener");
        }
        replaced
    }

    /// Remove the registered listener.
    ///
    /// Returns `true` if there was one.
    pub fn clear_listener(&self) -> bool {
        self.listener.lock().take().is_some()
    }

    /// Check whether a listener is registered.
    pub fn has_listener(&self) -> bool {
        self.listener.lock().is_some()
    }

    /// Block publishing temporarily.
    ///
    /// While blocked, calls to [`publish`](Self::publish) do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if publishing is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Block publishing until the returned guard is dropped.
    ///
    /// The previous blocked state is restored on drop, so guards nest.
    pub fn block(&self) -> BlockGuard<'_, T> {
        let previous = self.blocked.swap(true, Ordering::SeqCst);
        BlockGuard {
            publisher: self,
            previous,
        }
    }

    /// Number of publications that reached a listener so far.
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Invoke the listener with `value`.
    ///
    /// The slot lock is released before the listener runs, so a listener may
    /// replace itself.
    #[tracing::instrument(skip_all, target = "horizon_pluglist::publisher", level = "trace")]
    pub fn publish(&self, value: &T) {
        if self.is_blocked() {
            tracing::trace!(target: targets::PUBLISHER, "publisher blocked, skipping");
            return;
        }

        let listener = self.listener.lock().clone();
        if let Some(listener) = listener {
            self.delivered.fetch_add(1, Ordering::Relaxed);
            listener(value);
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("has_listener", &self.has_listener())
            .field("blocked", &self.is_blocked())
            .field("delivered", &self.delivered_count())
            .finish()
    }
}

/// RAII guard returned by [`Publisher::block`].
#[must_use = "publishing is unblocked as soon as the guard is dropped"]
pub struct BlockGuard<'a, T: ?Sized> {
    publisher: &'a Publisher<T>,
    previous: bool,
}

impl<T: ?Sized> Drop for BlockGuard<'_, T> {
    fn drop(&mut self) {
        self.publisher.set_blocked(self.previous);
    }
}

static_assertions::assert_impl_all!(Publisher<str>: Send, Sync);
