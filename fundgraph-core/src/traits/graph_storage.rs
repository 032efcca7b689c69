use crate::errors::PersistenceError;
use crate::models::GraphDocument;

/// Persistence backend for the node-link graph document.
pub trait IGraphStorage: Send + Sync {
    /// Read the persisted document. `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<GraphDocument>, PersistenceError>;

    /// Replace the persisted document.
    fn save(&self, document: &GraphDocument) -> Result<(), PersistenceError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}
