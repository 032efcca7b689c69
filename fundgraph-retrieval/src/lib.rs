//! # fundgraph-retrieval
//!
//! The query engine over the regulation graph. Candidates come from a BM25
//! index and an external dense backend, are fused with Reciprocal Rank
//! Fusion, collapsed to the newest document versions, re-ranked by an
//! optional cross encoder, and enriched with graph context.
//!
//! ## Architecture
//!
//! ```text
//! HybridSearchEngine
//! ├── DenseRetriever
//! │   ├── IEmbedder (HttpEmbedder, or any backend)
//! │   ├── IVectorIndex (InMemoryVectorIndex, or any backend)
//! │   └── QueryEmbeddingCache (moka, blake3 keys)
//! ├── SparseIndex (BM25-Okapi, German tokenizer, rebuilt per generation)
//! ├── FusionEngine (RRF, k = 60)
//! ├── Reranker (ICrossEncoder, fastembed behind `reranker`)
//! └── Enrichment
//!     ├── Document metadata + breadcrumbs
//!     ├── Neighbor context (PPR subgraph or k-hop)
//!     └── Result filters
//! ```

pub mod dense;
pub mod fusion;
pub mod ranking;
pub mod search;
pub mod sparse;

pub use dense::{DenseHit, DenseRetriever, HttpEmbedder, InMemoryVectorIndex};
pub use fusion::{rrf, FusedCandidate, FusionEngine};
pub use ranking::{RerankCandidate, Reranker};
pub use search::HybridSearchEngine;
pub use sparse::{SparseIndex, SparseIndexHandle};
