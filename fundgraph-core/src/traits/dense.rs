use crate::errors::RetrievalError;
use crate::models::{VectorFilter, VectorQueryResult, VectorRecord};

/// External embedding service.
pub trait IEmbedder: Send + Sync {
    /// Embed a batch of texts; one vector per input, in order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError>;

    /// Model or endpoint name.
    fn name(&self) -> &str;
}

/// External vector index with cosine distance.
pub trait IVectorIndex: Send + Sync {
    fn query(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&VectorFilter>,
    ) -> Result<VectorQueryResult, RetrievalError>;

    /// Insert or replace records by id.
    fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), RetrievalError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
