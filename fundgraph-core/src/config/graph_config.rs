use serde::{Deserialize, Serialize};

use super::defaults;

/// Graph store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Path of the persisted node-link JSON document.
    pub path: String,
    /// Lifetime of the cached global PageRank (seconds).
    pub pagerank_ttl_secs: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_GRAPH_PATH.to_string(),
            pagerank_ttl_secs: defaults::DEFAULT_PAGERANK_TTL_SECS,
        }
    }
}
