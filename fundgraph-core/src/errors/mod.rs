mod compliance_error;
mod config_error;
mod graph_error;
mod persistence_error;
mod retrieval_error;

pub use compliance_error::ComplianceError;
pub use config_error::ConfigError;
pub use graph_error::GraphError;
pub use persistence_error::PersistenceError;
pub use retrieval_error::RetrievalError;

/// Top-level error aggregating every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum FundGraphError {
    #[error("graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("persistence error: {0}")]
    PersistenceError(#[from] PersistenceError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("compliance error: {0}")]
    ComplianceError(#[from] ComplianceError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("degraded mode: {component} using fallback {fallback}")]
    DegradedMode { component: String, fallback: String },
}

pub type FundGraphResult<T> = Result<T, FundGraphError>;
