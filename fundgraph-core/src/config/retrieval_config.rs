use serde::{Deserialize, Serialize};

use super::defaults;

/// How graph context is expanded around the final search hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionStrategy {
    /// Personalized PageRank subgraph rooted at the hits.
    Ppr,
    /// Bounded breadth-first expansion over typed edges.
    KHop,
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Candidates fetched from each retrieval source.
    pub retrieval_candidates: usize,
    /// Fused candidates passed to the reranker.
    pub rerank_top_k: usize,
    /// Final number of results.
    pub limit: usize,
    /// Run BM25 retrieval alongside dense retrieval.
    pub enable_sparse: bool,
    /// Run cross-encoder reranking.
    pub enable_rerank: bool,
    /// Attach graph neighbor context to results.
    pub enable_multi_hop: bool,
    pub expansion_strategy: ExpansionStrategy,
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    pub k_hop_depth: usize,
    pub k_hop_max_nodes: usize,
    pub subgraph_top_k: usize,
    pub subgraph_threshold: f64,
    /// Deadline for each embedding, vector-index, or rerank call.
    pub backend_timeout_ms: u64,
    /// Capacity of the query-embedding cache.
    pub query_cache_size: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            retrieval_candidates: defaults::DEFAULT_RETRIEVAL_CANDIDATES,
            rerank_top_k: defaults::DEFAULT_RERANK_TOP_K,
            limit: defaults::DEFAULT_RESULT_LIMIT,
            enable_sparse: defaults::DEFAULT_ENABLE_SPARSE,
            enable_rerank: defaults::DEFAULT_ENABLE_RERANK,
            enable_multi_hop: defaults::DEFAULT_ENABLE_MULTI_HOP,
            expansion_strategy: ExpansionStrategy::Ppr,
            rrf_k: defaults::DEFAULT_RRF_K,
            k_hop_depth: defaults::DEFAULT_K_HOP_DEPTH,
            k_hop_max_nodes: defaults::DEFAULT_K_HOP_MAX_NODES,
            subgraph_top_k: defaults::DEFAULT_SUBGRAPH_TOP_K,
            subgraph_threshold: defaults::DEFAULT_SUBGRAPH_THRESHOLD,
            backend_timeout_ms: defaults::DEFAULT_BACKEND_TIMEOUT_MS,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}
