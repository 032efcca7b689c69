/// Errors reading or writing the persisted node-link graph.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("graph store not found at {path}")]
    NotFound { path: String },

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("malformed node-link document: {reason}")]
    Malformed { reason: String },
}
