//! Local cross encoder backed by fastembed's `TextRerank`.

use std::sync::Mutex;

use fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use fundgraph_core::errors::RetrievalError;
use fundgraph_core::traits::ICrossEncoder;

pub struct FastEmbedCrossEncoder {
    model: Mutex<TextRerank>,
    name: String,
}

impl FastEmbedCrossEncoder {
    /// Load the multilingual BGE reranker (German-capable).
    pub fn try_default() -> Result<Self, RetrievalError> {
        Self::try_new(RerankerModel::BGERerankerV2M3)
    }

    pub fn try_new(model: RerankerModel) -> Result<Self, RetrievalError> {
        let name = format!("{model:?}");
        let model = TextRerank::try_new(RerankInitOptions::new(model)).map_err(|e| {
            RetrievalError::RerankFailed {
                reason: format!("model load: {e}"),
            }
        })?;
        Ok(Self {
            model: Mutex::new(model),
            name,
        })
    }
}

impl ICrossEncoder for FastEmbedCrossEncoder {
    fn score(&self, query: &str, texts: &[String]) -> Result<Vec<f64>, RetrievalError> {
        let documents: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut model = self.model.lock().map_err(|e| RetrievalError::RerankFailed {
            reason: e.to_string(),
        })?;
        let results = model
            .rerank(query, &documents, false, None)
            .map_err(|e| RetrievalError::RerankFailed {
                reason: e.to_string(),
            })?;

        let mut scores = vec![0.0; texts.len()];
        for r in results {
            if let Some(slot) = scores.get_mut(r.index) {
                *slot = f64::from(r.score);
            }
        }
        Ok(scores)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
