//! Degradation tracking: which components are running on a fallback.

mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation};
