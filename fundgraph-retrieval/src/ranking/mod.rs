//! Re-ranking stage: cross-encoder scoring of the fused candidates.

#[cfg(feature = "reranker")]
mod cross_encoder;
mod reranker;

#[cfg(feature = "reranker")]
pub use cross_encoder::FastEmbedCrossEncoder;
pub use reranker::{RerankCandidate, Reranker};
