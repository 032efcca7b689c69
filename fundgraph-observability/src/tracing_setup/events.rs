//! Structured log events for key system operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a successful graph load.
pub fn graph_loaded(location: &str, nodes: usize, edges: usize, generation: u64) {
    tracing::info!(
        event = "graph_loaded",
        location = %location,
        nodes = nodes,
        edges = edges,
        generation = generation,
        "graph loaded"
    );
}

/// Log a missing persisted graph; the system continues with an empty graph.
pub fn graph_missing(location: &str) {
    tracing::warn!(
        event = "graph_missing",
        location = %location,
        "graph store not found, starting with an empty graph"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a citation dropped because a negation phrase surrounds it.
pub fn citation_excluded(target: &str, family_size: usize) {
    tracing::info!(
        event = "citation_excluded",
        target = %target,
        family_size = family_size,
        "citation excluded by negation"
    );
}

pub fn on_demand_import_started(abbreviation: &str) {
    tracing::info!(
        event = "on_demand_import_started",
        abbreviation = %abbreviation,
        "on-demand import started"
    );
}

pub fn on_demand_import_succeeded(abbreviation: &str, node_id: &str, sections: usize) {
    tracing::info!(
        event = "on_demand_import_succeeded",
        abbreviation = %abbreviation,
        node_id = %node_id,
        sections = sections,
        "on-demand import succeeded"
    );
}

pub fn on_demand_import_failed(abbreviation: &str, reason: &str) {
    tracing::warn!(
        event = "on_demand_import_failed",
        abbreviation = %abbreviation,
        reason = %reason,
        "on-demand import failed, abbreviation cached as unavailable"
    );
}

/// Log a graph invariant violation (data corruption).
pub fn invariant_violated(node_id: &str, detail: &str) {
    tracing::error!(
        event = "invariant_violated",
        node_id = %node_id,
        detail = %detail,
        "graph invariant violated"
    );
}

/// Log search completion.
pub fn search_completed(query: &str, dense: usize, sparse: usize, results: usize) {
    tracing::info!(
        event = "search_completed",
        query = %query,
        dense_candidates = dense,
        sparse_candidates = sparse,
        results = results,
        "search completed"
    );
}

/// Log a finished compliance mapping.
pub fn compliance_mapped(context_id: &str, chunks: usize, regulations: usize) {
    tracing::info!(
        event = "compliance_mapped",
        context_id = %context_id,
        chunks = chunks,
        regulations = regulations,
        "compliance context expanded"
    );
}
