//! BM25 sparse retrieval over chunk text.

mod bm25;
pub mod tokenizer;

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use fundgraph_core::config::SparseConfig;
use fundgraph_core::errors::PersistenceError;
use fundgraph_graph::{GraphSnapshot, GraphStore};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use bm25::Bm25Params;
pub use tokenizer::{tokenizer_for, GermanTokenizer, SimpleTokenizer, Tokenizer};

use bm25::Bm25Model;

/// Summary of a built index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub num_chunks: usize,
    pub avg_tokens_per_chunk: f64,
    pub vocabulary_size: usize,
    pub tokenizer: String,
}

/// On-disk form: the tokenized corpus. IDF tables are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    tokenizer: String,
    chunk_ids: Vec<String>,
    tokenized_corpus: Vec<Vec<String>>,
}

/// BM25-Okapi index over chunk texts.
pub struct SparseIndex {
    tokenizer: Box<dyn Tokenizer>,
    params: Bm25Params,
    chunk_ids: Vec<String>,
    corpus: Vec<Vec<String>>,
    model: Bm25Model,
}

impl std::fmt::Debug for SparseIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseIndex")
            .field("tokenizer", &self.tokenizer.name())
            .field("params", &self.params)
            .field("chunk_ids", &self.chunk_ids)
            .finish_non_exhaustive()
    }
}

impl SparseIndex {
    /// Index `(chunk_id, text)` pairs in the given order.
    pub fn build<I>(chunks: I, config: &SparseConfig) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let tokenizer = tokenizer_for(&config.tokenizer);
        let (chunk_ids, texts): (Vec<String>, Vec<String>) = chunks.into_iter().unzip();
        let corpus: Vec<Vec<String>> = texts.par_iter().map(|t| tokenizer.tokenize(t)).collect();
        Self::from_parts(tokenizer, Bm25Params::from(config), chunk_ids, corpus)
    }

    /// Index every chunk node with non-empty text, in graph order.
    pub fn from_store(store: &GraphStore, config: &SparseConfig) -> Self {
        let chunks: Vec<(String, String)> = store
            .nodes()
            .filter(|n| n.is_chunk() && !n.text().is_empty())
            .map(|n| (n.id.clone(), n.text().to_string()))
            .collect();
        let index = Self::build(chunks, config);
        tracing::info!(
            chunks = index.len(),
            tokenizer = index.tokenizer.name(),
            "BM25 index built"
        );
        index
    }

    fn from_parts(
        tokenizer: Box<dyn Tokenizer>,
        params: Bm25Params,
        chunk_ids: Vec<String>,
        corpus: Vec<Vec<String>>,
    ) -> Self {
        let model = Bm25Model::fit(&corpus, params);
        Self {
            tokenizer,
            params,
            chunk_ids,
            corpus,
            model,
        }
    }

    /// Top-`k` chunks by BM25 score. Zero and negative scores are dropped;
    /// equal scores keep corpus order.
    pub fn search(&self, query: &str, k: usize) -> Vec<(String, f64)> {
        let terms = self.tokenizer.tokenize(query);
        if terms.is_empty() {
            tracing::debug!(query, "query produced no tokens");
            return Vec::new();
        }
        let scores = self.model.scores(&terms, self.params);
        let mut hits: Vec<(usize, f64)> = scores
            .into_iter()
            .enumerate()
            .filter(|&(_, s)| s > 0.0)
            .collect();
        hits.sort_by(|a, b| b.1.total_cmp(&a.1));
        hits.into_iter()
            .take(k)
            .map(|(i, s)| (self.chunk_ids[i].clone(), s))
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        let avg = if self.corpus.is_empty() {
            0.0
        } else {
            (self.model.avg_doc_len() * 100.0).round() / 100.0
        };
        IndexStats {
            num_chunks: self.chunk_ids.len(),
            avg_tokens_per_chunk: avg,
            vocabulary_size: self.model.vocabulary_size(),
            tokenizer: self.tokenizer.name().to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.chunk_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_ids.is_empty()
    }

    pub fn chunk_ids(&self) -> &[String] {
        &self.chunk_ids
    }

    /// Write the tokenized corpus as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let io_err = |e: std::io::Error| PersistenceError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let persisted = PersistedIndex {
            tokenizer: self.tokenizer.name().to_string(),
            chunk_ids: self.chunk_ids.clone(),
            tokenized_corpus: self.corpus.clone(),
        };
        let raw = serde_json::to_string(&persisted).map_err(|e| PersistenceError::Malformed {
            reason: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(io_err)
    }

    /// Load an index written by [`Self::save`]. The persisted tokenizer is
    /// used for queries; BM25 parameters come from `config`.
    pub fn load(path: &Path, config: &SparseConfig) -> Result<Self, PersistenceError> {
        if !path.exists() {
            return Err(PersistenceError::NotFound {
                path: path.display().to_string(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|e| PersistenceError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let persisted: PersistedIndex =
            serde_json::from_str(&raw).map_err(|e| PersistenceError::Malformed {
                reason: e.to_string(),
            })?;
        if persisted.chunk_ids.len() != persisted.tokenized_corpus.len() {
            return Err(PersistenceError::Malformed {
                reason: format!(
                    "{} chunk ids for {} tokenized chunks",
                    persisted.chunk_ids.len(),
                    persisted.tokenized_corpus.len()
                ),
            });
        }
        Ok(Self::from_parts(
            tokenizer_for(&persisted.tokenizer),
            Bm25Params::from(config),
            persisted.chunk_ids,
            persisted.tokenized_corpus,
        ))
    }
}

/// Sparse index bound to a graph generation, rebuilt lazily when a newer
/// snapshot is presented.
pub struct SparseIndexHandle {
    config: SparseConfig,
    current: RwLock<Option<(u64, Arc<SparseIndex>)>>,
}

impl SparseIndexHandle {
    pub fn new(config: SparseConfig) -> Self {
        Self {
            config,
            current: RwLock::new(None),
        }
    }

    /// The index for `snapshot`'s generation, building it if needed.
    pub fn get_or_build(&self, snapshot: &GraphSnapshot) -> Arc<SparseIndex> {
        let generation = snapshot.generation();
        if let Some((built_for, index)) = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            if *built_for == generation {
                return Arc::clone(index);
            }
        }

        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Another reader may have rebuilt while we waited.
        if let Some((built_for, index)) = slot.as_ref() {
            if *built_for == generation {
                return Arc::clone(index);
            }
        }
        let index = Arc::new(SparseIndex::from_store(snapshot.store(), &self.config));
        *slot = Some((generation, Arc::clone(&index)));
        index
    }

    /// Generation the current index was built for.
    pub fn built_generation(&self) -> Option<u64> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(g, _)| *g)
    }
}
