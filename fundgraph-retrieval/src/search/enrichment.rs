//! Graph enrichment of search hits: owning-document metadata and
//! neighbor context.

use std::collections::HashSet;

use fundgraph_core::constants::{MAX_LAW_SECTIONS_PER_REFERENCE, NEIGHBOR_SNIPPET_CHARS};
use fundgraph_core::errors::GraphError;
use fundgraph_core::models::{
    DocumentMetadata, NeighborContext, NeighborKind, Node, Relation, SECTION_TYPE_LAW,
};
use fundgraph_graph::GraphStore;
use fundgraph_observability::events;

/// First `max_chars` characters followed by `...`.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

/// The owning document of a chunk, logging invariant violations.
pub(crate) fn parent_document<'a>(store: &'a GraphStore, chunk_id: &str) -> Option<&'a Node> {
    match store.owning_document(chunk_id) {
        Ok(doc) => Some(doc),
        Err(e @ GraphError::ChunkParentInvariant { .. }) => {
            events::invariant_violated(chunk_id, &e.to_string());
            None
        }
        Err(_) => None,
    }
}

pub(crate) fn document_metadata(parent: Option<&Node>) -> DocumentMetadata {
    let Some(doc) = parent else {
        return DocumentMetadata::default();
    };
    let attrs = doc.as_document();
    DocumentMetadata {
        doc_id: Some(doc.id.clone()),
        title: doc.title().map(str::to_string),
        url: attrs.and_then(|a| a.url.clone()),
        ministry: attrs.and_then(|a| a.ministry.clone()),
        publisher: attrs.and_then(|a| a.publisher.clone()),
        as_of: attrs.and_then(|a| a.as_of.clone()),
        kuerzel: doc.kuerzel().map(str::to_string),
    }
}

fn display_name(node: Option<&Node>, id: &str) -> String {
    node.and_then(Node::title).unwrap_or(id).to_string()
}

/// Context for one hit: references of the chunk and of its document whose
/// target lies in `expanded`, preceded by one warning per newer version
/// of the document.
pub(crate) fn neighbor_context(
    store: &GraphStore,
    chunk_id: &str,
    parent: Option<&Node>,
    expanded: &HashSet<String>,
) -> Vec<NeighborContext> {
    let mut out: Vec<NeighborContext> = Vec::new();
    let mut attached: HashSet<&str> = HashSet::new();

    let sources = std::iter::once(chunk_id).chain(parent.map(|p| p.id.as_str()));
    for source in sources {
        for edge in store.out_edges(source) {
            if edge.relation != Relation::References
                || !expanded.contains(&edge.target)
                || !attached.insert(edge.target.as_str())
            {
                continue;
            }
            attach_reference(store, &edge.target, &mut out);
        }
    }

    if let Some(doc) = parent {
        for newer in store.superseded_by(&doc.id) {
            let title = display_name(store.node(newer), newer);
            out.insert(
                0,
                NeighborContext {
                    id: newer.to_string(),
                    text: format!("Note: document was superseded by {title}."),
                    breadcrumbs: "Version Warning".to_string(),
                    kind: NeighborKind::VersionWarning,
                },
            );
        }
    }
    out
}

fn attach_reference(store: &GraphStore, target_id: &str, out: &mut Vec<NeighborContext>) {
    let target = store.node(target_id);
    let title = display_name(target, target_id);

    if target.is_some_and(Node::is_law) {
        let sections: Vec<&Node> = store
            .chunks_of(target_id)
            .into_iter()
            .filter(|c| {
                c.as_chunk()
                    .and_then(|a| a.section_type.as_deref())
                    == Some(SECTION_TYPE_LAW)
            })
            .take(MAX_LAW_SECTIONS_PER_REFERENCE)
            .collect();
        if !sections.is_empty() {
            for section in sections {
                let paragraph = section
                    .as_chunk()
                    .and_then(|a| a.paragraph.as_deref())
                    .unwrap_or("");
                out.push(NeighborContext {
                    id: section.id.clone(),
                    text: snippet(section.text(), NEIGHBOR_SNIPPET_CHARS),
                    breadcrumbs: format!("{title} > {paragraph}"),
                    kind: NeighborKind::LawSection,
                });
            }
            return;
        }
    }

    out.push(NeighborContext {
        id: target_id.to_string(),
        text: format!("Reference: {title}"),
        breadcrumbs: "Graph Reference".to_string(),
        kind: NeighborKind::Reference,
    });
}
