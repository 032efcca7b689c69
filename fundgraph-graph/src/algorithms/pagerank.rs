//! PageRank by power iteration over the graph collapsed to one edge per
//! ordered node pair.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use fundgraph_core::constants::{PAGERANK_DAMPING, PAGERANK_MAX_ITER, PAGERANK_TOLERANCE};

use crate::store::GraphStore;

/// Collapse the multigraph: parallel edges become one edge whose weight is
/// the numeric `weight` attribute of the last parallel edge, default 1.
fn collapse(store: &GraphStore) -> DiGraph<(), f64> {
    let mut graph: DiGraph<(), f64> = DiGraph::with_capacity(store.node_count(), store.edge_count());
    for _ in 0..store.node_count() {
        graph.add_node(());
    }
    for ((s, t, _), edge) in store.endpoints().zip(store.all_edges()) {
        let weight = edge
            .extra
            .get("weight")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(1.0);
        graph.update_edge(NodeIndex::new(s), NodeIndex::new(t), weight);
    }
    graph
}

/// PageRank with damping `alpha`.
///
/// `personalization` maps node slots to restart weights; `None` restarts
/// uniformly. Dangling mass is redistributed like the restart vector.
/// Converges when the L1 change drops below `n * tolerance`; after
/// `max_iter` rounds the last iterate is returned with a warning.
pub(crate) fn pagerank(
    store: &GraphStore,
    personalization: Option<&HashMap<usize, f64>>,
    alpha: f64,
    max_iter: usize,
    tolerance: f64,
) -> HashMap<String, f64> {
    let n = store.node_count();
    if n == 0 {
        return HashMap::new();
    }
    let graph = collapse(store);

    let restart: Vec<f64> = match personalization {
        Some(weights) => {
            let total: f64 = weights.values().sum();
            let mut p = vec![0.0; n];
            if total > 0.0 {
                for (&slot, &w) in weights {
                    p[slot] = w / total;
                }
            }
            p
        }
        None => vec![1.0 / n as f64; n],
    };

    let out_weight: Vec<f64> = graph
        .node_indices()
        .map(|u| graph.edges(u).map(|e| *e.weight()).sum())
        .collect();

    let mut x = vec![1.0 / n as f64; n];
    for iteration in 0..max_iter {
        let mut next = vec![0.0; n];
        let mut dangling = 0.0;
        for u in graph.node_indices() {
            let mass = x[u.index()];
            let total = out_weight[u.index()];
            if total > 0.0 {
                for e in graph.edges(u) {
                    next[e.target().index()] += mass * e.weight() / total;
                }
            } else {
                dangling += mass;
            }
        }
        for v in 0..n {
            next[v] = alpha * (next[v] + dangling * restart[v]) + (1.0 - alpha) * restart[v];
        }
        let err: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
        x = next;
        if err < n as f64 * tolerance {
            tracing::debug!(iterations = iteration + 1, nodes = n, "pagerank converged");
            return label(store, x);
        }
    }

    tracing::warn!(
        max_iter = max_iter,
        nodes = n,
        "pagerank did not converge, using last iterate"
    );
    label(store, x)
}

fn label(store: &GraphStore, scores: Vec<f64>) -> HashMap<String, f64> {
    scores
        .into_iter()
        .enumerate()
        .map(|(slot, s)| (store.id_at(slot).to_string(), s))
        .collect()
}

/// Global PageRank with the standard constants.
pub(crate) fn global(store: &GraphStore) -> HashMap<String, f64> {
    pagerank(
        store,
        None,
        PAGERANK_DAMPING,
        PAGERANK_MAX_ITER,
        PAGERANK_TOLERANCE,
    )
}

struct CachedRanks {
    scores: Arc<HashMap<String, f64>>,
    computed_at: Instant,
}

/// Timestamped global-PageRank value with an explicit TTL.
///
/// Readers share the cached map; an expired value is recomputed and then
/// swapped in. Two readers racing on expiry may both compute.
pub struct PageRankCache {
    ttl: Duration,
    entry: RwLock<Option<CachedRanks>>,
}

impl PageRankCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached scores if still fresh, otherwise `compute()` swapped in.
    pub fn get_or_compute<F>(&self, compute: F) -> Arc<HashMap<String, f64>>
    where
        F: FnOnce() -> HashMap<String, f64>,
    {
        {
            let guard = self.entry.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = guard.as_ref() {
                if cached.computed_at.elapsed() <= self.ttl {
                    return Arc::clone(&cached.scores);
                }
            }
        }

        let scores = Arc::new(compute());
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(CachedRanks {
            scores: Arc::clone(&scores),
            computed_at: Instant::now(),
        });
        scores
    }

    /// When the cached value was computed, if any.
    pub fn computed_at(&self) -> Option<Instant> {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|c| c.computed_at)
    }

    pub fn invalidate(&self) {
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
