//! Logging facilities for Horizon Pluglist.
//!
//! Horizon Pluglist uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_pluglist::selection=trace")
//!         .init();
//! }
//! ```
//!
//! Every event emitted by the workspace uses one of the [`targets`] below so
//! that a single subsystem can be traced in isolation.

/// Span names used throughout Horizon Pluglist for tracing.
pub mod span_names {
    /// Bulk item replacement span.
    pub const SET_ITEMS: &str = "horizon_pluglist::set_items";
    /// Input event dispatch span.
    pub const INPUT: &str = "horizon_pluglist::input";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Selection state transitions.
    pub const SELECTION: &str = "horizon_pluglist::selection";
    /// Mouse, keyboard and focus routing.
    pub const INPUT: &str = "horizon_pluglist::input";
    /// Listener notification.
    pub const PUBLISHER: &str = "horizon_pluglist::publisher";
    /// Container structure (groups, insertion, removal).
    pub const CONTAINER: &str = "horizon_pluglist::container";
    /// Invariant violations.
    pub const INVARIANT: &str = "horizon_pluglist::invariant";
    /// Configuration loading.
    pub const CONFIG: &str = "horizon_pluglist::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of bulk operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_pluglist::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }

    /// Create a performance span that records an item count.
    pub fn with_count(name: &'static str, count: usize) -> Self {
        let span = tracing::info_span!(
            target: "horizon_pluglist::perf",
            "perf",
            operation = name,
            count
        );
        Self {
            span: span.entered(),
        }
    }
}
