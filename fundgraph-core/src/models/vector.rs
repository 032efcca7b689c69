use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata attached to a vector record.
pub type VectorMetadata = HashMap<String, Value>;

/// Column-oriented answer of a vector index query, ordered by distance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorQueryResult {
    pub ids: Vec<String>,
    /// Cosine distances in `[0, 2]`.
    pub distances: Vec<f64>,
    pub documents: Vec<Option<String>>,
    pub metadatas: Vec<VectorMetadata>,
}

impl VectorQueryResult {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A record to be written into a vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub embedding: Vec<f32>,
    pub document: String,
    #[serde(default)]
    pub metadata: VectorMetadata,
}

/// Optional equality filter on metadata keys.
pub type VectorFilter = HashMap<String, Value>;
