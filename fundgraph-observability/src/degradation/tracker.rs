//! Record every degradation event: component, failure mode, fallback used, timestamp, recovery status.

use chrono::{DateTime, Utc};
use fundgraph_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

/// A tracked degradation event with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Bounded log of degradation events.
#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
    max_events: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            max_events: 1_000,
        }
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new degradation event. Oldest events are dropped past capacity.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        if self.events.len() >= self.max_events {
            self.events.remove(0);
        }
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark the latest active event of a component as recovered.
    pub fn mark_recovered(&mut self, component: &str) {
        let now = Utc::now();
        if let Some(tracked) = self.events.iter_mut().rev().find(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        }) {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
        }
    }

    /// Components currently degraded.
    pub fn active_components(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for t in &self.events {
            if t.recovery_status == RecoveryStatus::Active
                && !out.contains(&t.event.component.as_str())
            {
                out.push(&t.event.component);
            }
        }
        out
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
