use serde::{Deserialize, Serialize};

use super::defaults;

/// BM25 sparse index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparseConfig {
    /// "german" (stop words + normalisation) or "simple".
    pub tokenizer: String,
    pub k1: f64,
    pub b: f64,
    /// Floor for negative IDF values, as a fraction of the average IDF.
    pub epsilon: f64,
}

impl Default for SparseConfig {
    fn default() -> Self {
        Self {
            tokenizer: defaults::DEFAULT_TOKENIZER.to_string(),
            k1: defaults::DEFAULT_BM25_K1,
            b: defaults::DEFAULT_BM25_B,
            epsilon: defaults::DEFAULT_BM25_EPSILON,
        }
    }
}
