//! Top-level configuration with layered resolution.

pub mod defaults;

mod compliance_config;
mod graph_config;
mod observability_config;
mod retrieval_config;
mod sparse_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use compliance_config::ComplianceConfig;
pub use graph_config::GraphConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::{ExpansionStrategy, RetrievalConfig};
pub use sparse_config::SparseConfig;

use crate::errors::ConfigError;

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "FUNDGRAPH_";

/// Configuration aggregating all sub-configs.
///
/// Built once at startup and handed to each component's constructor.
/// Resolution order (highest priority first):
/// 1. Environment variables (`FUNDGRAPH_*`)
/// 2. TOML file
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FundGraphConfig {
    pub graph: GraphConfig,
    pub retrieval: RetrievalConfig,
    pub sparse: SparseConfig,
    pub compliance: ComplianceConfig,
    pub observability: ObservabilityConfig,
}

impl FundGraphConfig {
    /// Load configuration: defaults, then `path` (if it exists), then the
    /// process environment. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadError {
                    path: p.display().to_string(),
                    message: e.to_string(),
                })?;
                toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
                    path: p.display().to_string(),
                    message: e.to_string(),
                })?
            }
            _ => Self::default(),
        };

        config.apply_env_overrides(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `FUNDGRAPH_*` overrides from the given variables.
    ///
    /// Unknown variables are ignored; a known variable with an unparsable
    /// value is an error.
    pub fn apply_env_overrides<I>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "GRAPH_PATH" => self.graph.path = value,
                "PAGERANK_TTL_SECS" => self.graph.pagerank_ttl_secs = parse(&key, &value)?,
                "RETRIEVAL_CANDIDATES" => {
                    self.retrieval.retrieval_candidates = parse(&key, &value)?
                }
                "RERANK_TOP_K" => self.retrieval.rerank_top_k = parse(&key, &value)?,
                "RESULT_LIMIT" => self.retrieval.limit = parse(&key, &value)?,
                "ENABLE_SPARSE" => self.retrieval.enable_sparse = parse(&key, &value)?,
                "ENABLE_RERANK" => self.retrieval.enable_rerank = parse(&key, &value)?,
                "ENABLE_MULTI_HOP" => self.retrieval.enable_multi_hop = parse(&key, &value)?,
                "RRF_K" => self.retrieval.rrf_k = parse(&key, &value)?,
                "BACKEND_TIMEOUT_MS" => {
                    self.retrieval.backend_timeout_ms = parse(&key, &value)?
                }
                "TOKENIZER" => self.sparse.tokenizer = value,
                "ENABLE_ON_DEMAND" => self.compliance.enable_on_demand = parse(&key, &value)?,
                "CONCEPTS_PATH" => self.compliance.concepts_path = value,
                "LOG" | "LOG_LEVEL" => self.observability.log_level = value,
                _ => {}
            }
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval.limit == 0 {
            return Err(invalid("retrieval.limit", "must be at least 1"));
        }
        if self.retrieval.retrieval_candidates == 0 {
            return Err(invalid("retrieval.retrieval_candidates", "must be at least 1"));
        }
        if self.retrieval.rerank_top_k == 0 {
            return Err(invalid("retrieval.rerank_top_k", "must be at least 1"));
        }
        if self.retrieval.rrf_k == 0 {
            return Err(invalid("retrieval.rrf_k", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.retrieval.subgraph_threshold) {
            return Err(invalid(
                "retrieval.subgraph_threshold",
                "must be between 0.0 and 1.0",
            ));
        }
        if !matches!(self.sparse.tokenizer.as_str(), "german" | "simple") {
            return Err(invalid("sparse.tokenizer", "must be \"german\" or \"simple\""));
        }
        if !(0.0..=1.0).contains(&self.sparse.b) {
            return Err(invalid("sparse.b", "must be between 0.0 and 1.0"));
        }
        if self.sparse.k1 < 0.0 {
            return Err(invalid("sparse.k1", "must not be negative"));
        }
        if self.compliance.max_rules_per_document == 0 {
            return Err(invalid(
                "compliance.max_rules_per_document",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::ValidationFailed {
        field: key.to_string(),
        message: format!("cannot parse {value:?}"),
    })
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
