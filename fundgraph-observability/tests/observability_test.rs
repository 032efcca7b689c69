use fundgraph_core::config::ObservabilityConfig;
use fundgraph_core::models::DegradationEvent;
use fundgraph_observability::tracing_setup::{init_tracing, init_tracing_with_filter};
use fundgraph_observability::{events, DegradationTracker, RecoveryStatus};

// ── Degradation tracker ──────────────────────────────────────────────────

#[test]
fn tracker_records_and_recovers() {
    let mut tracker = DegradationTracker::new();
    tracker.record(DegradationEvent::now("dense", "timeout", "sparse-only"));
    tracker.record(DegradationEvent::now("reranker", "model missing", "fused order"));
    assert_eq!(tracker.len(), 2);
    assert_eq!(tracker.active_components(), vec!["dense", "reranker"]);

    tracker.mark_recovered("dense");
    assert_eq!(tracker.active_components(), vec!["reranker"]);
    assert_eq!(tracker.events()[0].recovery_status, RecoveryStatus::Recovered);
    assert!(tracker.events()[0].recovered_at.is_some());
}

#[test]
fn recovering_unknown_component_is_a_no_op() {
    let mut tracker = DegradationTracker::new();
    tracker.record(DegradationEvent::now("dense", "timeout", "sparse-only"));
    tracker.mark_recovered("crawler");
    assert_eq!(tracker.active_components(), vec!["dense"]);
}

// ── Tracing setup and events ─────────────────────────────────────────────

#[test]
fn second_subscriber_install_is_refused_without_panicking() {
    let _ = init_tracing_with_filter("debug");
    assert!(!init_tracing(&ObservabilityConfig::default()));
}

#[test]
fn event_helpers_do_not_panic_without_subscriber() {
    events::graph_loaded("memory", 3, 2, 1);
    events::graph_missing("data/kg.json");
    events::citation_excluded("NKBF 98", 2);
    events::on_demand_import_started("ATG");
    events::on_demand_import_succeeded("ATG", "law_ATG", 4);
    events::on_demand_import_failed("XYZ", "404");
    events::invariant_violated("c1", "no HAS_CHUNK parent");
    events::search_completed("Reisekosten", 10, 10, 5);
    events::compliance_mapped("ctx_0000abcd", 2, 1);
}
