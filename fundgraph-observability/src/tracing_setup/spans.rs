//! Span definitions per operation: search, compliance mapping, on-demand import, graph reload.

/// Create a search span.
#[macro_export]
macro_rules! search_span {
    ($query:expr) => {
        tracing::info_span!("fundgraph.search", query = %$query)
    };
}

/// Create a compliance-mapping span.
#[macro_export]
macro_rules! compliance_span {
    ($context_id:expr, $chunks:expr) => {
        tracing::info_span!("fundgraph.compliance", context_id = %$context_id, chunks = $chunks)
    };
}

/// Create an on-demand import span.
#[macro_export]
macro_rules! import_span {
    ($abbreviation:expr) => {
        tracing::info_span!("fundgraph.import", abbreviation = %$abbreviation)
    };
}

/// Create a graph reload span.
#[macro_export]
macro_rules! reload_span {
    ($generation:expr) => {
        tracing::debug_span!("fundgraph.reload", generation = $generation)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SEARCH: &str = "fundgraph.search";
    pub const COMPLIANCE: &str = "fundgraph.compliance";
    pub const IMPORT: &str = "fundgraph.import";
    pub const RELOAD: &str = "fundgraph.reload";
}
