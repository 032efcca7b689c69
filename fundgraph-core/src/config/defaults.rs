// Single source of truth for all default values.

// --- Graph ---
pub const DEFAULT_GRAPH_PATH: &str = "data/knowledge_graph.json";
pub const DEFAULT_PAGERANK_TTL_SECS: u64 = 3600; // 1 hour

// --- Retrieval ---
pub const DEFAULT_RETRIEVAL_CANDIDATES: usize = 20;
pub const DEFAULT_RERANK_TOP_K: usize = 10;
pub const DEFAULT_RESULT_LIMIT: usize = 5;
pub const DEFAULT_ENABLE_SPARSE: bool = true;
pub const DEFAULT_ENABLE_RERANK: bool = true;
pub const DEFAULT_ENABLE_MULTI_HOP: bool = true;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_K_HOP_DEPTH: usize = 2;
pub const DEFAULT_K_HOP_MAX_NODES: usize = 100;
pub const DEFAULT_SUBGRAPH_TOP_K: usize = 50;
pub const DEFAULT_SUBGRAPH_THRESHOLD: f64 = 0.0001;
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_000;

// --- Sparse ---
pub const DEFAULT_TOKENIZER: &str = "german";
pub const DEFAULT_BM25_K1: f64 = 1.5;
pub const DEFAULT_BM25_B: f64 = 0.75;
pub const DEFAULT_BM25_EPSILON: f64 = 0.25;

// --- Compliance ---
pub const DEFAULT_ENABLE_ON_DEMAND: bool = true;
pub const DEFAULT_CONCEPTS_PATH: &str = "config/compliance_concepts.json";
pub const DEFAULT_CRAWL_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_RULES_PER_DOCUMENT: usize = 50;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
