use serde::{Deserialize, Serialize};

use super::defaults;

/// Compliance mapper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Crawl and import laws that are cited but missing from the graph.
    pub enable_on_demand: bool,
    /// JSON file holding `{ "concepts": { keyword: target } }`.
    pub concepts_path: String,
    /// Deadline for one law fetch.
    pub crawl_timeout_ms: u64,
    pub max_rules_per_document: usize,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            enable_on_demand: defaults::DEFAULT_ENABLE_ON_DEMAND,
            concepts_path: defaults::DEFAULT_CONCEPTS_PATH.to_string(),
            crawl_timeout_ms: defaults::DEFAULT_CRAWL_TIMEOUT_MS,
            max_rules_per_document: defaults::DEFAULT_MAX_RULES_PER_DOCUMENT,
        }
    }
}
