/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding backend failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("vector index query failed: {reason}")]
    VectorQueryFailed { reason: String },

    #[error("sparse index unavailable: {reason}")]
    SparseUnavailable { reason: String },

    #[error("rerank failed: {reason}")]
    RerankFailed { reason: String },

    #[error("cannot start worker for {operation}: {reason}")]
    WorkerUnavailable { operation: String, reason: String },

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },
}
