//! # fundgraph-observability
//!
//! Tracing subscriber setup, span macros and structured event helpers used
//! by every engine crate, plus a tracker for degradation events.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use tracing_setup::events;
