use crate::errors::RetrievalError;
use crate::models::Node;

/// Hook that pushes freshly imported chunks into the dense backend.
pub trait IChunkIndexer: Send + Sync {
    /// Index the given chunk nodes; returns how many were written.
    fn index_chunks(&self, chunks: &[Node]) -> Result<usize, RetrievalError>;
}
