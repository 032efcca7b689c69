//! Graph nodes and edges for an imported statute.

use fundgraph_citations::CitationExtractor;
use fundgraph_core::models::{
    ChunkAttrs, DocumentAttrs, LawSection, Node, Relation, SECTION_TYPE_LAW,
};
use fundgraph_graph::GraphStore;

pub const LAW_CATEGORY: &str = "Gesetz";
pub const ON_DEMAND_SOURCE: &str = "On-demand Crawl";

pub fn law_id(abbreviation: &str) -> String {
    format!("law_{abbreviation}")
}

/// `law_AtG_S_1` for `§ 1`, `law_GG_Art._3` for `Art. 3`, and
/// `law_X_chunk_{index}` when the section has no paragraph.
pub fn section_chunk_id(law_id: &str, paragraph: &str, index: usize) -> String {
    let paragraph = paragraph.trim();
    if paragraph.is_empty() {
        return format!("{law_id}_chunk_{index}");
    }
    let cleaned: String = paragraph
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .map(|c| match c {
            ' ' => "_".to_string(),
            '§' => "S".to_string(),
            other => other.to_string(),
        })
        .collect();
    format!("{law_id}_{cleaned}")
}

pub fn law_node(abbreviation: &str) -> Node {
    Node::law(
        law_id(abbreviation),
        DocumentAttrs {
            title: Some(format!("Gesetz: {abbreviation}")),
            kuerzel: Some(abbreviation.to_string()),
            category: Some(LAW_CATEGORY.to_string()),
            source: Some(ON_DEMAND_SOURCE.to_string()),
            ..Default::default()
        },
    )
}

pub fn section_nodes(abbreviation: &str, sections: &[LawSection]) -> Vec<Node> {
    let law_id = law_id(abbreviation);
    sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let paragraph = section.paragraph.trim();
            let title = [abbreviation, paragraph, section.title.trim()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            let context = if paragraph.is_empty() {
                abbreviation.to_string()
            } else {
                format!("{abbreviation} > {paragraph}")
            };
            Node::chunk(
                section_chunk_id(&law_id, paragraph, i),
                ChunkAttrs {
                    text: section.content.clone(),
                    context: Some(context),
                    paragraph: (!paragraph.is_empty()).then(|| paragraph.to_string()),
                    title: Some(title),
                    section_type: Some(SECTION_TYPE_LAW.to_string()),
                    rules: Vec::new(),
                },
            )
        })
        .collect()
}

/// Upsert the law node and its section chunks with `HAS_CHUNK` edges.
/// Returns the chunk nodes as written.
pub fn insert_law(store: &mut GraphStore, abbreviation: &str, sections: &[LawSection]) -> Vec<Node> {
    let law = law_node(abbreviation);
    let law_id = law.id.clone();
    store.upsert_node(law);

    let chunks = section_nodes(abbreviation, sections);
    for chunk in &chunks {
        store.upsert_node(chunk.clone());
        store.add_edge_once(&law_id, &chunk.id, Relation::HasChunk);
    }
    chunks
}

/// Add `REFERENCES` edges to `law_id` from every chunk outside the law
/// whose text cites `abbreviation`. Returns the number of new edges.
pub fn link_citing_chunks(
    store: &mut GraphStore,
    extractor: &CitationExtractor,
    law_id: &str,
    abbreviation: &str,
) -> usize {
    let own_prefix = format!("{law_id}_");
    let citing: Vec<String> = store
        .nodes()
        .filter(|n| n.is_chunk() && !n.id.starts_with(&own_prefix))
        .filter(|n| {
            extractor
                .extract(n.text())
                .iter()
                .any(|c| c.target.trim().eq_ignore_ascii_case(abbreviation))
        })
        .map(|n| n.id.clone())
        .collect();

    citing
        .iter()
        .filter(|id| store.add_edge_once(id, law_id, Relation::References))
        .count()
}
