/// Compliance mapping and on-demand enrichment errors.
#[derive(Debug, thiserror::Error)]
pub enum ComplianceError {
    #[error("concept map could not be loaded from {path}: {reason}")]
    ConceptMapUnreadable { path: String, reason: String },

    #[error("law fetch failed for {abbreviation}: {reason}")]
    FetchFailed {
        abbreviation: String,
        reason: String,
    },

    #[error("law fetch for {abbreviation} returned no sections")]
    EmptyFetch { abbreviation: String },

    #[error("writing imported law {abbreviation} failed: {reason}")]
    GraphWriteFailed {
        abbreviation: String,
        reason: String,
    },

    #[error("re-indexing {count} chunks failed: {reason}")]
    ReindexFailed { count: usize, reason: String },
}
