//! HybridSearchEngine coordinating dense + BM25 + RRF + rerank + graph
//! enrichment.

pub mod enrichment;
pub mod filters;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use fundgraph_core::config::{ExpansionStrategy, FundGraphConfig, RetrievalConfig};
use fundgraph_core::constants::{SEARCH_CENTRALITY_WEIGHT, SEARCH_RELEVANCE_WEIGHT};
use fundgraph_core::errors::RetrievalError;
use fundgraph_core::models::{
    DegradationEvent, Relation, ScoreBreakdown, SearchRequest, SearchResult,
};
use fundgraph_graph::{GraphAlgorithms, GraphManager, GraphStore, KHopConfig};
use fundgraph_observability::{events, search_span, DegradationTracker, TrackedDegradation};

use crate::dense::{DenseHit, DenseRetriever};
use crate::fusion::{FusedCandidate, FusionEngine};
use crate::ranking::{RerankCandidate, Reranker};
use crate::sparse::{SparseIndex, SparseIndexHandle};

/// Degradation component names.
pub const DENSE_COMPONENT: &str = "dense_retrieval";
pub const RERANK_COMPONENT: &str = "reranker";

/// A fused candidate after version collapsing. `origin` is the id the
/// retrievers returned; `id` is the chunk that represents it.
struct Candidate {
    id: String,
    origin: String,
    rrf_score: f64,
}

/// Hybrid search over the current graph snapshot.
pub struct HybridSearchEngine {
    graph: Arc<GraphManager>,
    dense: Option<DenseRetriever>,
    sparse: SparseIndexHandle,
    reranker: Reranker,
    fusion: FusionEngine,
    config: RetrievalConfig,
    degradation: Mutex<DegradationTracker>,
}

impl HybridSearchEngine {
    /// Sparse-only engine without reranking; add backends with
    /// [`Self::with_dense`] and [`Self::with_reranker`].
    pub fn new(graph: Arc<GraphManager>, config: &FundGraphConfig) -> Self {
        Self {
            graph,
            dense: None,
            sparse: SparseIndexHandle::new(config.sparse.clone()),
            reranker: Reranker::disabled(),
            fusion: FusionEngine::new(config.retrieval.rrf_k),
            config: config.retrieval.clone(),
            degradation: Mutex::new(DegradationTracker::new()),
        }
    }

    pub fn with_dense(mut self, dense: DenseRetriever) -> Self {
        self.dense = Some(dense);
        self
    }

    pub fn with_reranker(mut self, reranker: Reranker) -> Self {
        self.reranker = reranker;
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn graph(&self) -> &Arc<GraphManager> {
        &self.graph
    }

    pub fn dense(&self) -> Option<&DenseRetriever> {
        self.dense.as_ref()
    }

    /// BM25 index for the current graph generation.
    pub fn sparse_index(&self) -> Arc<SparseIndex> {
        self.sparse.get_or_build(&self.graph.snapshot())
    }

    /// Degradation events recorded so far.
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.degradation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events()
            .to_vec()
    }

    /// Search with the configured limit and no filters.
    pub fn search_text(&self, query: &str) -> Vec<SearchResult> {
        self.search(&SearchRequest::new(query))
    }

    /// Run the full pipeline. Backend failures degrade; an empty list means
    /// no source produced a candidate.
    pub fn search(&self, request: &SearchRequest) -> Vec<SearchResult> {
        let query = request.query.trim();
        let _span = search_span!(query).entered();
        if query.is_empty() {
            return Vec::new();
        }

        let snapshot = self.graph.snapshot();
        let store = snapshot.store();
        let algorithms = snapshot.algorithms();
        let limit = request.limit.unwrap_or(self.config.limit).max(1);
        // Over-fetch so filtering can still fill the page.
        let fetch = if request.filters.is_empty() {
            limit
        } else {
            limit.saturating_mul(2)
        };
        let n = self.config.retrieval_candidates;

        // Stage 1: candidate retrieval.
        let dense_hits = self.dense_candidates(query, n);
        let sparse_hits = if self.config.enable_sparse {
            self.sparse.get_or_build(&snapshot).search(query, n)
        } else {
            Vec::new()
        };
        if dense_hits.is_empty() && sparse_hits.is_empty() {
            events::search_completed(query, 0, 0, 0);
            return Vec::new();
        }

        // Stage 2: RRF fusion.
        let mut lists: Vec<Vec<&str>> = Vec::new();
        if !dense_hits.is_empty() {
            lists.push(dense_hits.iter().map(|h| h.chunk_id.as_str()).collect());
        }
        if !sparse_hits.is_empty() {
            lists.push(sparse_hits.iter().map(|(id, _)| id.as_str()).collect());
        }
        let fused = self.fusion.fuse(&lists);

        // Stage 3: collapse superseded versions.
        let candidates = collapse_versions(store, algorithms, fused);

        // Stage 4: rerank the head of the list.
        let dense_by_id: HashMap<&str, &DenseHit> = dense_hits
            .iter()
            .map(|h| (h.chunk_id.as_str(), h))
            .collect();
        let sparse_by_id: HashMap<&str, f64> = sparse_hits
            .iter()
            .map(|(id, s)| (id.as_str(), *s))
            .collect();
        let origins: HashMap<String, String> = candidates
            .iter()
            .map(|c| (c.id.clone(), c.origin.clone()))
            .collect();
        let pool: Vec<RerankCandidate> = candidates
            .into_iter()
            .take(self.config.rerank_top_k)
            .map(|c| {
                let text = candidate_text(store, &dense_by_id, &c);
                RerankCandidate::new(c.id, text, c.rrf_score)
            })
            .collect();
        let reranked = self.rerank(query, pool);

        // Stage 5: final head and graph expansion around it.
        let top: Vec<RerankCandidate> = reranked.into_iter().take(fetch).collect();
        let ids: Vec<&str> = top.iter().map(|c| c.id.as_str()).collect();
        let expanded: HashSet<String> = if self.config.enable_multi_hop {
            self.expand(algorithms, &ids)
        } else {
            HashSet::new()
        };
        let centrality = algorithms.centrality_scores(&ids);

        // Stages 6-7: score blend and enrichment.
        let mut results: Vec<SearchResult> = top
            .iter()
            .map(|c| {
                let origin = origins.get(&c.id).map_or(c.id.as_str(), String::as_str);
                let centrality = centrality.get(&c.id).copied().unwrap_or(0.0);
                let relevance = c.reranker_score.map_or(c.rrf_score, |r| r.max(c.rrf_score));
                let scores = ScoreBreakdown {
                    rrf: c.rrf_score,
                    reranker: c.reranker_score,
                    dense: dense_by_id
                        .get(c.id.as_str())
                        .or_else(|| dense_by_id.get(origin))
                        .map(|h| h.similarity),
                    sparse: sparse_by_id
                        .get(c.id.as_str())
                        .or_else(|| sparse_by_id.get(origin))
                        .copied(),
                    centrality,
                };
                let score =
                    SEARCH_RELEVANCE_WEIGHT * relevance + SEARCH_CENTRALITY_WEIGHT * centrality;
                self.enrich(store, c, score, scores, &expanded)
            })
            .collect();
        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        if !request.filters.is_empty() {
            results.retain(|r| filters::matches(&request.filters, &r.metadata));
        }
        results.truncate(limit);

        events::search_completed(query, dense_hits.len(), sparse_hits.len(), results.len());
        results
    }

    fn dense_candidates(&self, query: &str, n: usize) -> Vec<DenseHit> {
        let Some(dense) = &self.dense else {
            return Vec::new();
        };
        match dense.search(query, n, None) {
            Ok(hits) => {
                self.recovered(DENSE_COMPONENT);
                hits
            }
            Err(e) => {
                self.degrade(DENSE_COMPONENT, &e, "sparse_only");
                Vec::new()
            }
        }
    }

    fn rerank(&self, query: &str, pool: Vec<RerankCandidate>) -> Vec<RerankCandidate> {
        if !self.config.enable_rerank || !self.reranker.is_active() {
            return pool;
        }
        match self
            .reranker
            .try_rerank(query, pool.clone(), self.config.rerank_top_k)
        {
            Ok(reranked) => {
                self.recovered(RERANK_COMPONENT);
                reranked
            }
            Err(e) => {
                self.degrade(RERANK_COMPONENT, &e, "fused_order");
                pool
            }
        }
    }

    fn expand(&self, algorithms: &GraphAlgorithms, ids: &[&str]) -> HashSet<String> {
        let expanded = match self.config.expansion_strategy {
            ExpansionStrategy::Ppr => algorithms.subgraph_ids(
                ids,
                self.config.subgraph_top_k,
                self.config.subgraph_threshold,
            ),
            ExpansionStrategy::KHop => {
                algorithms.k_hop_expansion(ids, &KHopConfig::from_retrieval(&self.config))
            }
        };
        expanded.into_iter().collect()
    }

    fn enrich(
        &self,
        store: &GraphStore,
        candidate: &RerankCandidate,
        score: f64,
        scores: ScoreBreakdown,
        expanded: &HashSet<String>,
    ) -> SearchResult {
        let node = store.node(&candidate.id).filter(|n| n.is_chunk());
        let parent = node.and_then(|_| enrichment::parent_document(store, &candidate.id));
        let chunk = node.and_then(|n| n.as_chunk());
        let neighbor_context = if self.config.enable_multi_hop && node.is_some() {
            enrichment::neighbor_context(store, &candidate.id, parent, expanded)
        } else {
            Vec::new()
        };
        SearchResult {
            chunk_id: candidate.id.clone(),
            text: candidate.text.clone(),
            score,
            breadcrumbs: chunk.and_then(|c| c.context.clone()),
            metadata: enrichment::document_metadata(parent),
            neighbor_context,
            rules: chunk
                .map(|c| c.rules.iter().filter(|r| r.is_structured()).cloned().collect())
                .unwrap_or_default(),
            scores,
        }
    }

    fn degrade(&self, component: &str, error: &RetrievalError, fallback: &str) {
        self.degradation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(DegradationEvent::now(component, error.to_string(), fallback));
    }

    fn recovered(&self, component: &str) {
        self.degradation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .mark_recovered(component);
    }
}

/// Resolve fused ids to the newest version of their document, keeping the
/// fused order and the first (best) score of each representative.
///
/// A chunk of a superseded document is represented by the matching chunk
/// of the newest version: one the retrievers returned as well, else the
/// same section (an `EQUIVALENT_TO` edge or the same paragraph or section
/// heading). Without a match the superseded chunk stays and enrichment
/// attaches a version warning.
fn collapse_versions(
    store: &GraphStore,
    algorithms: &GraphAlgorithms,
    fused: Vec<FusedCandidate>,
) -> Vec<Candidate> {
    let fused_ids: Vec<String> = fused.iter().map(|c| c.id.clone()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(fused.len());
    for candidate in fused {
        let resolved = algorithms
            .temporal_filter(&[candidate.id.as_str()])
            .into_iter()
            .next()
            .unwrap_or_else(|| candidate.id.clone());
        let id = if resolved == candidate.id {
            resolved
        } else {
            match store.node(&resolved) {
                Some(doc) if doc.is_document_like() => {
                    newer_counterpart(store, &candidate.id, &resolved, &fused_ids)
                        .unwrap_or_else(|| candidate.id.clone())
                }
                _ => resolved,
            }
        };
        if seen.insert(id.clone()) {
            out.push(Candidate {
                id,
                origin: candidate.id,
                rrf_score: candidate.rrf_score,
            });
        }
    }
    out
}

/// The chunk of `newest` that stands for `chunk_id` of an older version.
fn newer_counterpart(
    store: &GraphStore,
    chunk_id: &str,
    newest: &str,
    fused_ids: &[String],
) -> Option<String> {
    let chunks: Vec<&str> = store
        .chunks_of(newest)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    if chunks.is_empty() {
        return None;
    }
    if let Some(hit) = fused_ids.iter().find(|id| chunks.contains(&id.as_str())) {
        return Some(hit.clone());
    }

    let equivalent = store
        .edges(chunk_id)
        .filter(|e| e.relation == Relation::EquivalentTo)
        .map(|e| if e.source == chunk_id { &e.target } else { &e.source })
        .find(|other| chunks.contains(&other.as_str()));
    if let Some(other) = equivalent {
        return Some(other.clone());
    }

    let key = section_key(store, chunk_id)?;
    chunks
        .into_iter()
        .find(|c| section_key(store, c).as_deref() == Some(key.as_str()))
        .map(str::to_string)
}

/// Paragraph of a chunk, else its breadcrumb without the document part
/// (`BNBest-P 2019 > Nr. 1 Zwischennachweis` → `Nr. 1 Zwischennachweis`).
fn section_key(store: &GraphStore, chunk_id: &str) -> Option<String> {
    let attrs = store.node(chunk_id)?.as_chunk()?;
    if let Some(paragraph) = attrs.paragraph.as_deref().map(str::trim) {
        if !paragraph.is_empty() {
            return Some(paragraph.to_string());
        }
    }
    let (_, section) = attrs.context.as_deref()?.split_once(" > ")?;
    let section = section.trim();
    (!section.is_empty()).then(|| section.to_string())
}

/// Chunk text from the graph, else the text the vector backend stored.
fn candidate_text(
    store: &GraphStore,
    dense_by_id: &HashMap<&str, &DenseHit>,
    candidate: &Candidate,
) -> String {
    if let Some(node) = store.node(&candidate.id) {
        if !node.text().is_empty() {
            return node.text().to_string();
        }
    }
    [candidate.id.as_str(), candidate.origin.as_str()]
        .iter()
        .find_map(|id| dense_by_id.get(id).and_then(|h| h.document.clone()))
        .unwrap_or_default()
}
