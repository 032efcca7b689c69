//! Dense retrieval through an external embedder and vector index.

mod http_embedder;
mod memory_index;
mod query_cache;

use std::sync::Arc;
use std::time::Duration;

use fundgraph_core::config::RetrievalConfig;
use fundgraph_core::deadline::DeadlineGuard;
use fundgraph_core::errors::RetrievalError;
use fundgraph_core::models::{Node, VectorFilter, VectorMetadata, VectorRecord};
use fundgraph_core::traits::{IChunkIndexer, IEmbedder, IVectorIndex};
use serde_json::Value;

pub use http_embedder::HttpEmbedder;
pub use memory_index::{cosine_distance, InMemoryVectorIndex};
pub use query_cache::QueryEmbeddingCache;

/// One dense hit.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseHit {
    pub chunk_id: String,
    /// `1 - distance / 2`, in `[0, 1]` for cosine distance.
    pub similarity: f64,
    /// Stored text, when the backend returns it.
    pub document: Option<String>,
    pub metadata: VectorMetadata,
}

/// Similarity derived from a cosine distance in `[0, 2]`.
pub fn similarity_from_distance(distance: f64) -> f64 {
    1.0 - distance / 2.0
}

/// Embeds queries (cached) and queries the vector index, each call under
/// the backend deadline.
pub struct DenseRetriever {
    embedder: Arc<dyn IEmbedder>,
    index: Arc<dyn IVectorIndex>,
    cache: QueryEmbeddingCache,
    embed_guard: DeadlineGuard,
    index_guard: DeadlineGuard,
}

impl DenseRetriever {
    pub fn new(
        embedder: Arc<dyn IEmbedder>,
        index: Arc<dyn IVectorIndex>,
        config: &RetrievalConfig,
    ) -> Self {
        let timeout = Duration::from_millis(config.backend_timeout_ms);
        Self {
            embedder,
            index,
            cache: QueryEmbeddingCache::new(config.query_cache_size),
            embed_guard: DeadlineGuard::new(timeout),
            index_guard: DeadlineGuard::new(timeout),
        }
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    pub fn cache(&self) -> &QueryEmbeddingCache {
        &self.cache
    }

    pub fn index(&self) -> &Arc<dyn IVectorIndex> {
        &self.index
    }

    /// Guard around embedder calls; open while a timed-out embedding is
    /// still running.
    pub fn embed_guard(&self) -> &DeadlineGuard {
        &self.embed_guard
    }

    /// Query embedding, served from the cache when present.
    pub fn embed_query(&self, query: &str) -> Result<Vec<f32>, RetrievalError> {
        if let Some(hit) = self.cache.get(query) {
            return Ok(hit);
        }
        let embedder = Arc::clone(&self.embedder);
        let texts = vec![query.to_string()];
        let vectors = self.embed_guard.run("embed", move || embedder.embed(&texts))??;
        let vector = vectors
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RetrievalError::EmbeddingFailed {
                reason: "embedder returned no vector for the query".to_string(),
            })?;
        self.cache.insert(query, vector.clone());
        Ok(vector)
    }

    /// Top-`k` chunks by cosine similarity. Hits the index returns without
    /// a finite distance are skipped.
    pub fn search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&VectorFilter>,
    ) -> Result<Vec<DenseHit>, RetrievalError> {
        let vector = self.embed_query(query)?;
        let index = Arc::clone(&self.index);
        let filter = filter.cloned();
        let result = self.index_guard.run("vector_query", move || {
            index.query(&vector, k, filter.as_ref())
        })??;

        // A hit without a usable distance cannot be ranked; drop it.
        let hits: Vec<DenseHit> = result
            .ids
            .iter()
            .enumerate()
            .filter_map(|(i, id)| {
                let distance = result.distances.get(i).copied().filter(|d| d.is_finite())?;
                Some(DenseHit {
                    chunk_id: id.clone(),
                    similarity: similarity_from_distance(distance),
                    document: result.documents.get(i).cloned().flatten(),
                    metadata: result.metadatas.get(i).cloned().unwrap_or_default(),
                })
            })
            .collect();
        if hits.len() < result.ids.len() {
            tracing::warn!(
                returned = result.ids.len(),
                kept = hits.len(),
                "vector index returned hits without a distance"
            );
        }
        Ok(hits)
    }
}

fn chunk_metadata(node: &Node) -> VectorMetadata {
    let mut metadata = VectorMetadata::new();
    if let Some(chunk) = node.as_chunk() {
        if let Some(context) = &chunk.context {
            metadata.insert("context".to_string(), Value::String(context.clone()));
        }
        if let Some(section_type) = &chunk.section_type {
            metadata.insert(
                "section_type".to_string(),
                Value::String(section_type.clone()),
            );
        }
        if let Some(paragraph) = &chunk.paragraph {
            metadata.insert("paragraph".to_string(), Value::String(paragraph.clone()));
        }
    }
    metadata
}

impl IChunkIndexer for DenseRetriever {
    fn index_chunks(&self, chunks: &[Node]) -> Result<usize, RetrievalError> {
        let chunks: Vec<&Node> = chunks
            .iter()
            .filter(|n| n.is_chunk() && !n.text().is_empty())
            .collect();
        if chunks.is_empty() {
            return Ok(0);
        }
        let embedder = Arc::clone(&self.embedder);
        let texts: Vec<String> = chunks.iter().map(|n| n.text().to_string()).collect();
        let batch = texts.clone();
        let vectors = self.embed_guard.run("embed_chunks", move || {
            embedder.embed(&batch)
        })??;
        if vectors.len() != chunks.len() {
            return Err(RetrievalError::EmbeddingFailed {
                reason: format!(
                    "expected {} embeddings, got {}",
                    chunks.len(),
                    vectors.len()
                ),
            });
        }

        let records: Vec<VectorRecord> = chunks
            .iter()
            .zip(texts)
            .zip(vectors)
            .map(|((node, document), embedding)| VectorRecord {
                id: node.id.clone(),
                embedding,
                document,
                metadata: chunk_metadata(node),
            })
            .collect();
        let written = records.len();
        self.index.upsert(records)?;
        tracing::info!(chunks = written, "chunks indexed");
        Ok(written)
    }
}
