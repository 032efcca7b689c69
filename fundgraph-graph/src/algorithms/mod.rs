//! Ranking and expansion algorithms bound to one immutable graph.

mod centrality;
mod expansion;
mod pagerank;
mod temporal;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use fundgraph_core::constants::{PAGERANK_DAMPING, PAGERANK_MAX_ITER, PAGERANK_TOLERANCE};

use crate::store::GraphStore;

pub use expansion::KHopConfig;
pub use pagerank::PageRankCache;

/// Algorithms over a shared [`GraphStore`], owning the global-PageRank cache.
pub struct GraphAlgorithms {
    store: Arc<GraphStore>,
    pagerank: PageRankCache,
}

impl GraphAlgorithms {
    pub fn new(store: Arc<GraphStore>, pagerank_ttl: Duration) -> Self {
        Self {
            store,
            pagerank: PageRankCache::new(pagerank_ttl),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn pagerank_cache(&self) -> &PageRankCache {
        &self.pagerank
    }

    /// Global PageRank (damping 0.85), cached for the configured TTL.
    pub fn global_pagerank(&self) -> Arc<HashMap<String, f64>> {
        self.pagerank
            .get_or_compute(|| pagerank::global(&self.store))
    }

    /// PageRank restarting uniformly from the seeds found in the graph.
    /// Empty when no seed is known.
    pub fn personalized_pagerank<S: AsRef<str>>(&self, seeds: &[S]) -> HashMap<String, f64> {
        let valid: HashSet<usize> = seeds
            .iter()
            .filter_map(|s| self.store.slot_of(s.as_ref()))
            .collect();
        if valid.is_empty() {
            if !seeds.is_empty() {
                tracing::warn!(seeds = seeds.len(), "none of the PPR seeds are in the graph");
            }
            return HashMap::new();
        }
        let weight = 1.0 / valid.len() as f64;
        let personalization: HashMap<usize, f64> = valid.into_iter().map(|s| (s, weight)).collect();
        pagerank::pagerank(
            &self.store,
            Some(&personalization),
            PAGERANK_DAMPING,
            PAGERANK_MAX_ITER,
            PAGERANK_TOLERANCE,
        )
    }

    /// Ids of the subgraph [`Self::extract_subgraph`] would induce: the
    /// top-`top_k` PPR ids scoring at least `threshold`, plus known seeds.
    pub fn subgraph_ids<S: AsRef<str>>(
        &self,
        seeds: &[S],
        top_k: usize,
        threshold: f64,
    ) -> Vec<String> {
        let scores = self.personalized_pagerank(seeds);
        if scores.is_empty() {
            return Vec::new();
        }
        let mut ranked: Vec<(&String, f64)> = scores.iter().map(|(id, &s)| (id, s)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let mut ids: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for (id, score) in ranked.into_iter().take(top_k) {
            if score >= threshold && seen.insert(id.as_str()) {
                ids.push(id.clone());
            }
        }
        for seed in seeds {
            let seed = seed.as_ref();
            if self.store.has_node(seed) && seen.insert(seed) {
                ids.push(seed.to_string());
            }
        }
        ids
    }

    /// Subgraph induced by the PPR neighbourhood of the seeds.
    pub fn extract_subgraph<S: AsRef<str>>(
        &self,
        seeds: &[S],
        top_k: usize,
        threshold: f64,
    ) -> GraphStore {
        let ids = self.subgraph_ids(seeds, top_k, threshold);
        self.store.induced_subgraph(ids.iter().map(String::as_str))
    }

    /// Bounded breadth-first expansion; see [`KHopConfig`].
    pub fn k_hop_expansion<S: AsRef<str>>(&self, seeds: &[S], config: &KHopConfig) -> Vec<String> {
        expansion::k_hop(&self.store, seeds, config)
    }

    /// Resolve ids to their newest versions, order-preserving and deduplicated.
    pub fn temporal_filter<S: AsRef<str>>(&self, ids: &[S]) -> Vec<String> {
        temporal::temporal_filter(&self.store, ids)
    }

    /// Combined PageRank/degree centrality for the given ids.
    pub fn centrality_scores<S: AsRef<str>>(&self, ids: &[S]) -> HashMap<String, f64> {
        let pagerank = self.global_pagerank();
        centrality::centrality_scores(&self.store, &pagerank, ids)
    }

    pub fn latest_version(&self, id: &str) -> String {
        self.store.latest_version(id)
    }

    pub fn family_set(&self, id: &str) -> HashSet<String> {
        self.store.family_set(id)
    }
}
