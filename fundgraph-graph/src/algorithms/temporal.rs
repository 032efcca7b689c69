//! Collapse superseded hits onto the newest version of their document.

use std::collections::HashSet;

use fundgraph_core::errors::GraphError;
use fundgraph_observability::events;

use crate::store::GraphStore;

/// Map every id to the newest version of its owning document.
///
/// A chunk whose document is current stays as the chunk id; a chunk of a
/// superseded document becomes the newest document id. Documents resolve
/// to their latest version; unknown ids pass through. A chunk violating
/// the single-parent invariant is logged and kept as-is. Order of first
/// occurrence is preserved and duplicates are dropped.
pub(crate) fn temporal_filter<S: AsRef<str>>(store: &GraphStore, ids: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(ids.len());

    for id in ids {
        let id = id.as_ref();
        let resolved = match store.node(id) {
            None => id.to_string(),
            Some(node) if node.is_chunk() => match store.owning_document(id) {
                Ok(doc) => {
                    let newest = store.latest_version(&doc.id);
                    if newest == doc.id {
                        id.to_string()
                    } else {
                        newest
                    }
                }
                Err(e @ GraphError::ChunkParentInvariant { .. }) => {
                    events::invariant_violated(id, &e.to_string());
                    id.to_string()
                }
                Err(_) => id.to_string(),
            },
            Some(_) => store.latest_version(id),
        };
        if seen.insert(resolved.clone()) {
            out.push(resolved);
        }
    }
    out
}
