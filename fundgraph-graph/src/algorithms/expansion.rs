//! Context expansion around seed nodes: PPR subgraphs and bounded k-hop.

use std::collections::HashSet;

use fundgraph_core::config::RetrievalConfig;
use fundgraph_core::models::Relation;

use crate::store::GraphStore;

/// Parameters for [`k_hop`].
#[derive(Debug, Clone)]
pub struct KHopConfig {
    /// Maximum number of hops from the seeds.
    pub depth: usize,
    /// Result cap; the discovery order is truncated, not re-ranked.
    pub max_nodes: usize,
    /// Relations that may be followed, in either direction.
    pub relations: Vec<Relation>,
}

impl Default for KHopConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            max_nodes: 100,
            relations: Relation::TRAVERSABLE.to_vec(),
        }
    }
}

impl KHopConfig {
    pub fn from_retrieval(config: &RetrievalConfig) -> Self {
        Self {
            depth: config.k_hop_depth,
            max_nodes: config.k_hop_max_nodes,
            ..Self::default()
        }
    }
}

/// Breadth-first expansion over both edge directions.
///
/// Returns distinct ids in discovery order: seeds first, then each level
/// with outgoing neighbours before incoming ones. Expansion stops after
/// `depth` levels or once a level pushes the set to `max_nodes`.
pub(crate) fn k_hop<S: AsRef<str>>(
    store: &GraphStore,
    seeds: &[S],
    config: &KHopConfig,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order: Vec<&str> = Vec::new();
    for seed in seeds {
        let id = seed.as_ref();
        if seen.insert(id) {
            order.push(id);
        }
    }
    let allowed = |r: &Relation| config.relations.contains(r);

    let mut frontier: Vec<&str> = order.clone();
    for _ in 0..config.depth {
        let mut next: Vec<&str> = Vec::new();
        for &node in &frontier {
            let Some(node) = store.node(node) else {
                continue;
            };
            let outgoing = store
                .out_edges(&node.id)
                .filter(|e| allowed(&e.relation))
                .map(|e| e.target.as_str());
            let incoming = store
                .in_edges(&node.id)
                .filter(|e| allowed(&e.relation))
                .map(|e| e.source.as_str());
            for neighbor in outgoing.chain(incoming) {
                if seen.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        order.extend(next.iter().copied());
        frontier = next;
        if order.len() >= config.max_nodes || frontier.is_empty() {
            break;
        }
    }

    order.truncate(config.max_nodes);
    order.into_iter().map(str::to_string).collect()
}
