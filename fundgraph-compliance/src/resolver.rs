//! Abbreviation → document resolution by best-match scoring.
//!
//! Every node is scored against the lower-cased query over its lookup
//! candidates (id, kürzel, title, doc title):
//!
//! | match | points |
//! |---|---|
//! | candidate equals query | +100 |
//! | query (no spaces) inside candidate, length diff < 5 | +50 |
//! | ... length diff < 20 | +20 |
//! | ... otherwise | +5 |
//! | kürzel equals query | +50 |
//! | document or law, score > 0 | +10 |
//! | chunk, score > 0 | -50 |
//!
//! The first node with the strictly highest positive score wins. A winning
//! chunk resolves to its owning document.

use fundgraph_core::models::{Node, NodeKind};
use fundgraph_graph::GraphStore;

const EXACT_MATCH: i32 = 100;
const CLOSE_SUBSTRING: i32 = 50;
const NEAR_SUBSTRING: i32 = 20;
const WEAK_SUBSTRING: i32 = 5;
const KUERZEL_MATCH: i32 = 50;
const DOCUMENT_BONUS: i32 = 10;
const CHUNK_PENALTY: i32 = -50;

/// Score of `node` for an already trimmed, lower-cased query.
pub fn match_score(node: &Node, query: &str) -> i32 {
    if query.is_empty() {
        return 0;
    }
    let partial_allowed = !query.contains(' ');
    let query_len = query.chars().count();

    let mut score = 0;
    for candidate in node.lookup_candidates() {
        let candidate = candidate.to_lowercase();
        if candidate == query {
            score += EXACT_MATCH;
        } else if partial_allowed && candidate.contains(query) {
            let diff = candidate.chars().count().saturating_sub(query_len);
            score += match diff {
                0..=4 => CLOSE_SUBSTRING,
                5..=19 => NEAR_SUBSTRING,
                _ => WEAK_SUBSTRING,
            };
        }
    }
    if node.kuerzel().is_some_and(|k| k.to_lowercase() == query) {
        score += KUERZEL_MATCH;
    }
    if score > 0 {
        score += match node.kind() {
            NodeKind::Document | NodeKind::Law => DOCUMENT_BONUS,
            NodeKind::Chunk => CHUNK_PENALTY,
            NodeKind::ExternalStub => 0,
        };
    }
    score
}

/// Id of the node best matching `abbreviation`, chunks lifted to their
/// owning document. `None` when nothing scores above zero.
pub fn resolve(store: &GraphStore, abbreviation: &str) -> Option<String> {
    let query = abbreviation.trim().to_lowercase();
    let mut best: Option<(&Node, i32)> = None;
    for node in store.nodes() {
        let score = match_score(node, &query);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((node, score));
        }
    }
    let (node, score) = best?;

    if !node.is_chunk() {
        return Some(node.id.clone());
    }
    match store.owning_document(&node.id) {
        Ok(parent) => Some(parent.id.clone()),
        Err(e) => {
            tracing::debug!(
                abbreviation = %abbreviation,
                chunk = %node.id,
                score,
                error = %e,
                "best match is an orphaned chunk, unresolved"
            );
            None
        }
    }
}
