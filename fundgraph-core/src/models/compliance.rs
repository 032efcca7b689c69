use serde::{Deserialize, Serialize};

/// A rule attached to a mapped regulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedRule {
    pub rule_id: String,
    pub content: String,
    pub relevance_reason: String,
}

/// A regulation found to govern the input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedRegulation {
    pub category: String,
    /// Resolved document title.
    pub source_doc: String,
    pub doc_id: Option<String>,
    pub rules: Vec<MappedRule>,
    /// Number of registrations (citations or keyword hits) for this title.
    pub hit_count: usize,
    /// Indices of the input chunks that produced a hit, ascending.
    pub found_in_chunks: Vec<usize>,
    pub is_newly_crawled: bool,
}

/// Result of one `expand_context` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceContext {
    pub compliance_context_id: String,
    pub context_label: String,
    pub mapped_regulations: Vec<MappedRegulation>,
}
