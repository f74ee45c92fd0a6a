//! Core systems for Horizon Pluglist.
//!
//! This crate provides the infrastructure shared by the plugin list panel:
//!
//! - **Publisher**: a single-slot listener registry for change notification
//! - **Thread checks**: UI-thread affinity assertions
//! - **Scoped flags**: RAII-managed suppression flags
//! - **Invariants**: the fatal error taxonomy of the selection state machine
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Publisher Example
//!
//! ```
//! use horizon_pluglist_core::Publisher;
//!
//! let selection_changed = Publisher::<[usize]>::new();
//! selection_changed.set_listener(|rows: &[usize]| {
//!     println!("{} rows selected", rows.len());
//! });
//! selection_changed.publish(&[1, 2, 3]);
//! ```

mod error;
pub mod logging;
pub mod publisher;
pub mod scoped;
pub mod thread_check;

pub use error::{InvariantViolation, fatal};
pub use logging::PerfSpan;
pub use publisher::{BlockGuard, Publisher};
pub use scoped::{ScopedFlag, ScopedFlagGuard};
pub use thread_check::ThreadAffinity;
