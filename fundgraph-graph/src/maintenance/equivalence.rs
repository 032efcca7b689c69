use std::collections::BTreeMap;

use fundgraph_core::models::{NodeKind, Relation};

use crate::store::GraphStore;

/// Link documents sharing the same (kürzel, as-of date) with
/// `EQUIVALENT_TO` edges in both directions. Returns the number of edges
/// added; existing edges are not duplicated.
pub fn link_equivalents(store: &mut GraphStore) -> usize {
    let mut groups: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
    for node in store.nodes().filter(|n| n.kind() == NodeKind::Document) {
        let Some(doc) = node.as_document() else {
            continue;
        };
        if let (Some(kuerzel), Some(as_of)) = (&doc.kuerzel, &doc.as_of) {
            groups
                .entry((kuerzel.clone(), as_of.clone()))
                .or_default()
                .push(node.id.clone());
        }
    }

    let mut added = 0;
    for ((kuerzel, as_of), ids) in groups.into_iter().filter(|(_, ids)| ids.len() > 1) {
        tracing::debug!(kuerzel = %kuerzel, as_of = %as_of, count = ids.len(), "equivalent documents");
        for a in &ids {
            for b in ids.iter().filter(|b| *b != a) {
                if store.add_edge_once(a, b, Relation::EquivalentTo) {
                    added += 1;
                }
            }
        }
    }
    added
}
