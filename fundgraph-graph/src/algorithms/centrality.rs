use std::collections::HashMap;

use fundgraph_core::constants::{
    CENTRALITY_DEGREE_WEIGHT, CENTRALITY_PAGERANK_SCALE, CENTRALITY_PAGERANK_WEIGHT,
    CENTRALITY_UNKNOWN_NODE,
};

use crate::store::GraphStore;

/// `0.7 * pagerank * 1000 + 0.3 * degree / max_degree`; ids not in the
/// graph score 0.5.
pub(crate) fn centrality_scores<S: AsRef<str>>(
    store: &GraphStore,
    pagerank: &HashMap<String, f64>,
    ids: &[S],
) -> HashMap<String, f64> {
    let max_degree = store.max_degree() as f64;
    ids.iter()
        .map(|id| {
            let id = id.as_ref();
            let score = if store.has_node(id) {
                let pr = pagerank.get(id).copied().unwrap_or(0.0);
                let degree = store.degree(id) as f64 / max_degree;
                pr * CENTRALITY_PAGERANK_SCALE * CENTRALITY_PAGERANK_WEIGHT
                    + degree * CENTRALITY_DEGREE_WEIGHT
            } else {
                CENTRALITY_UNKNOWN_NODE
            };
            (id.to_string(), score)
        })
        .collect()
}
