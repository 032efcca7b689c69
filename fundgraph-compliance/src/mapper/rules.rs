//! Rule collection for a matched document.

use fundgraph_core::constants::{
    LEGAL_SIGNAL_KEYWORDS, RULE_FALLBACK_CHARS, RULE_MIN_TEXT_CHARS, RULE_SNIPPET_CHARS,
};
use fundgraph_core::models::{MappedRule, Node};
use fundgraph_graph::GraphStore;

/// Rules of `doc_id`, at most `max_rules`.
///
/// Every pre-extracted rule of a child chunk becomes one rule. A chunk
/// without rules contributes its text when the text is long and carries a
/// legal-signal keyword. Children are the `HAS_CHUNK` targets, or nodes
/// named `{doc_id}_chunk_*` for documents ingested without edges.
pub fn collect_rules(store: &GraphStore, doc_id: &str, max_rules: usize) -> Vec<MappedRule> {
    let mut chunks = store.chunks_of(doc_id);
    if chunks.is_empty() {
        let prefix = format!("{doc_id}_chunk_");
        chunks = store
            .nodes()
            .filter(|n| n.is_chunk() && n.id.starts_with(&prefix))
            .collect();
    }

    let mut rules = Vec::new();
    for chunk in chunks {
        if rules.len() >= max_rules {
            break;
        }
        push_chunk_rules(chunk, doc_id, &mut rules);
    }
    rules.truncate(max_rules);
    rules
}

fn push_chunk_rules(chunk: &Node, doc_id: &str, rules: &mut Vec<MappedRule>) {
    let Some(attrs) = chunk.as_chunk() else {
        return;
    };
    let extracted: Vec<_> = attrs.rules.iter().filter(|r| r.is_structured()).collect();
    if !extracted.is_empty() {
        for rule in extracted {
            let content = if rule.rule.trim().is_empty() {
                prefix_chars(&attrs.text, RULE_FALLBACK_CHARS).to_string()
            } else {
                rule.rule.clone()
            };
            rules.push(MappedRule {
                rule_id: format!("rule_{}_{}", chunk.id, rules.len()),
                content,
                relevance_reason: format!("Found in document '{doc_id}'"),
            });
        }
        return;
    }

    if attrs.text.chars().count() > RULE_MIN_TEXT_CHARS && carries_legal_signal(&attrs.text) {
        rules.push(MappedRule {
            rule_id: format!("chunk_{}", chunk.id),
            content: snippet(&attrs.text),
            relevance_reason: format!("Referenced passage from '{doc_id}'"),
        });
    }
}

pub fn carries_legal_signal(text: &str) -> bool {
    let lower = text.to_lowercase();
    LEGAL_SIGNAL_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn snippet(text: &str) -> String {
    let head = prefix_chars(text, RULE_SNIPPET_CHARS);
    if head.len() < text.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}

fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
