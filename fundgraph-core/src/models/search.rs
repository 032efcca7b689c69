use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::node::ExtractedRule;

/// A search query plus optional result filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Overrides `retrieval.limit` when set.
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub filters: SearchFilters,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// Post-retrieval filters over owning-document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Matches ministry or publisher exactly.
    #[serde(default)]
    pub ministry: Option<String>,
    /// Case-insensitive substring of the abbreviation.
    #[serde(default)]
    pub kuerzel: Option<String>,
    /// Keep documents whose as-of date is on or after this day.
    #[serde(default)]
    pub as_of_after: Option<NaiveDate>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.ministry.is_none() && self.kuerzel.is_none() && self.as_of_after.is_none()
    }
}

/// Metadata of the document owning a result chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub doc_id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub ministry: Option<String>,
    pub publisher: Option<String>,
    pub as_of: Option<String>,
    pub kuerzel: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborKind {
    /// A section of a referenced law.
    LawSection,
    /// A generic note about a referenced node.
    Reference,
    /// The owning document has been superseded.
    VersionWarning,
}

/// Graph context attached to a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborContext {
    pub id: String,
    pub text: String,
    pub breadcrumbs: String,
    pub kind: NeighborKind,
}

/// Per-source scores that went into the final score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub rrf: f64,
    pub reranker: Option<f64>,
    pub dense: Option<f64>,
    pub sparse: Option<f64>,
    pub centrality: f64,
}

/// One ranked, enriched search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk_id: String,
    pub text: String,
    pub score: f64,
    pub breadcrumbs: Option<String>,
    pub metadata: DocumentMetadata,
    pub neighbor_context: Vec<NeighborContext>,
    pub rules: Vec<ExtractedRule>,
    pub scores: ScoreBreakdown,
}
