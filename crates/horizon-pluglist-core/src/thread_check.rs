//! UI-thread verification for the selection subsystem.
//!
//! Selection state is mutated only from the UI (event-dispatch) thread.
//! Background work such as lazy paging of search results must hand its
//! results back to the UI thread before touching a selection model. Nothing
//! in this workspace takes a lock to protect selection state; the checks
//! here catch the mistake instead.
//!
//! Two levels of checking are provided:
//!
//! - **Debug assertions** (`debug_assert_ui_thread!`, [`ThreadAffinity::debug_assert_same_thread`]):
//!   only active in debug builds.
//! - **Runtime assertions** (`assert_ui_thread!`, [`ThreadAffinity::assert_same_thread`]):
//!   always active.
//!
//! ```
//! use horizon_pluglist_core::thread_check::ThreadAffinity;
//!
//! struct Panel {
//!     affinity: ThreadAffinity,
//!     rows: std::cell::Cell<usize>,
//! }
//!
//! impl Panel {
//!     fn set_rows(&self, rows: usize) {
//!         self.affinity.debug_assert_same_thread();
//!         self.rows.set(rows);
//!     }
//! }
//!
//! let panel = Panel { affinity: ThreadAffinity::current(), rows: std::cell::Cell::new(0) };
//! panel.set_rows(4);
//! ```

use std::sync::OnceLock;
use std::thread::ThreadId;

/// Global storage for the UI thread ID.
static UI_THREAD_ID: OnceLock<ThreadId> = OnceLock::new();

/// Register the calling thread as the UI thread.
///
/// Call once at startup, before any panel is created. Calling it again from
/// the same thread is harmless.
///
/// # Panics
///
/// Panics if a different thread was registered before.
pub fn set_ui_thread() {
    let current = std::thread::current().id();
    if UI_THREAD_ID.set(current).is_err() && UI_THREAD_ID.get() != Some(&current) {
        panic!(
            "set_ui_thread() called from different thread than original. \
             The UI thread ID can only be set once."
        );
    }
}

/// Get the UI thread ID if it has been registered.
#[inline]
pub fn ui_thread_id() -> Option<ThreadId> {
    UI_THREAD_ID.get().copied()
}

/// Check if the current thread is the UI thread.
///
/// Returns `true` when no UI thread has been registered yet, so that tests
/// and early initialization are not affected.
#[inline]
pub fn is_ui_thread() -> bool {
    match UI_THREAD_ID.get() {
        Some(&ui_id) => std::thread::current().id() == ui_id,
        None => true,
    }
}

/// Panics if the current thread is not the UI thread.
///
/// Active in both debug and release builds.
#[macro_export]
macro_rules! assert_ui_thread {
    () => {
        $crate::assert_ui_thread!("operation must be performed on the UI thread")
    };
    ($msg:expr) => {
        if !$crate::thread_check::is_ui_thread() {
            $crate::thread_check::panic_not_ui_thread($msg, file!(), line!());
        }
    };
}

/// Debug-only assertion that panics if not on the UI thread.
#[macro_export]
macro_rules! debug_assert_ui_thread {
    () => {
        #[cfg(debug_assertions)]
        $crate::assert_ui_thread!()
    };
    ($msg:expr) => {
        #[cfg(debug_assertions)]
        $crate::assert_ui_thread!($msg)
    };
}

/// Generate the panic message for UI-thread violations.
#[cold]
#[inline(never)]
#[doc(hidden)]
pub fn panic_not_ui_thread(msg: &str, file: &str, line: u32) -> ! {
    let current = std::thread::current();
    let current_name = current.name().unwrap_or("<unnamed>");
    let current_id = current.id();

    let ui_info = match ui_thread_id() {
        Some(id) => format!("UI thread ID: {id:?}"),
        None => "UI thread not yet registered".to_string(),
    };

    panic!(
        "\n\
        ══════════════════════════════════════════════════════════════════════\n\
        THREAD SAFETY VIOLATION\n\
        ══════════════════════════════════════════════════════════════════════\n\
        \n\
        {msg}\n\
        \n\
        Location: {file}:{line}\n\
        Current thread: \"{current_name}\" (ID: {current_id:?})\n\
        {ui_info}\n\
        \n\
        Selection models and input routers live on the UI thread. Deliver\n\
        background results to the UI thread before inserting or removing\n\
        items.\n\
        \n\
        ══════════════════════════════════════════════════════════════════════"
    )
}

/// The thread a selection model was created on.
///
/// Mutating methods call [`debug_assert_same_thread`](Self::debug_assert_same_thread)
/// so that a model touched from a loader thread fails at the call site.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: std::thread::current().id(),
        }
    }

    /// The owning thread.
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    /// Whether the calling thread is the owner.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.owner
    }

    /// Panics unless called from the owning thread.
    #[track_caller]
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            let location = std::panic::Location::caller();
            panic_not_ui_thread(
                &format!("selection state owned by thread {:?} was touched from another thread", self.owner),
                location.file(),
                location.line(),
            );
        }
    }

    /// [`assert_same_thread`](Self::assert_same_thread) in debug builds only.
    #[inline]
    #[track_caller]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }
}
