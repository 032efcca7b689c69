/// fundgraph version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// PageRank damping factor (alpha).
pub const PAGERANK_DAMPING: f64 = 0.85;

/// Maximum power iterations for PageRank.
pub const PAGERANK_MAX_ITER: usize = 100;

/// Per-node L1 convergence tolerance for PageRank.
pub const PAGERANK_TOLERANCE: f64 = 1.0e-6;

/// Centrality blend: `0.7 * (pagerank * 1000) + 0.3 * normalized_degree`.
pub const CENTRALITY_PAGERANK_WEIGHT: f64 = 0.7;
pub const CENTRALITY_DEGREE_WEIGHT: f64 = 0.3;
pub const CENTRALITY_PAGERANK_SCALE: f64 = 1000.0;

/// Centrality assigned to ids that are not in the graph.
pub const CENTRALITY_UNKNOWN_NODE: f64 = 0.5;

/// Final search score blend: `0.7 * max(rerank, rrf) + 0.3 * centrality`.
pub const SEARCH_RELEVANCE_WEIGHT: f64 = 0.7;
pub const SEARCH_CENTRALITY_WEIGHT: f64 = 0.3;

/// Characters scanned on each side of a citation for negation phrases.
pub const NEGATION_WINDOW_CHARS: usize = 40;

/// Law-section chunks attached per referenced law in neighbor context.
pub const MAX_LAW_SECTIONS_PER_REFERENCE: usize = 2;

/// Characters of chunk text kept in neighbor-context snippets.
pub const NEIGHBOR_SNIPPET_CHARS: usize = 300;

/// Minimum chunk text length (chars) for a chunk to count as a rule candidate.
pub const RULE_MIN_TEXT_CHARS: usize = 100;

/// Characters of chunk text kept as rule content.
pub const RULE_SNIPPET_CHARS: usize = 300;

/// Characters of chunk text used when a pre-extracted rule has no text.
pub const RULE_FALLBACK_CHARS: usize = 200;

/// Lower-cased keywords that mark a long chunk as carrying a legal obligation.
pub const LEGAL_SIGNAL_KEYWORDS: [&str; 5] = ["euro", "§", "frist", "nachweis", "pflicht"];

/// Priority of an explicit (cited) match.
pub const PRIORITY_EXPLICIT: u8 = 10;

/// Priority of an implicit (concept-map) match.
pub const PRIORITY_IMPLICIT: u8 = 1;
