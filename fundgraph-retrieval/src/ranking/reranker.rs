//! Cross-encoder re-ranking with a safe fallback.
//!
//! Scores `(query, text)` pairs through an [`ICrossEncoder`] under the
//! backend deadline. Without an encoder, or when scoring fails, the input
//! is returned truncated to `top_k` in its original order.

use std::sync::Arc;
use std::time::Duration;

use fundgraph_core::deadline::DeadlineGuard;
use fundgraph_core::errors::RetrievalError;
use fundgraph_core::traits::ICrossEncoder;

/// A fused candidate about to be re-ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankCandidate {
    pub id: String,
    pub text: String,
    pub rrf_score: f64,
    /// Set once the cross encoder has scored the candidate.
    pub reranker_score: Option<f64>,
}

impl RerankCandidate {
    pub fn new(id: impl Into<String>, text: impl Into<String>, rrf_score: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            rrf_score,
            reranker_score: None,
        }
    }
}

pub struct Reranker {
    encoder: Option<Arc<dyn ICrossEncoder>>,
    guard: DeadlineGuard,
}

impl Reranker {
    pub fn new(encoder: Arc<dyn ICrossEncoder>, timeout: Duration) -> Self {
        Self {
            encoder: Some(encoder),
            guard: DeadlineGuard::new(timeout),
        }
    }

    /// Pass-through reranker.
    pub fn disabled() -> Self {
        Self {
            encoder: None,
            guard: DeadlineGuard::new(Duration::ZERO),
        }
    }

    pub fn is_active(&self) -> bool {
        self.encoder.is_some()
    }

    /// Deadline guard around the encoder. Open while a timed-out scoring
    /// call is still running.
    pub fn guard(&self) -> &DeadlineGuard {
        &self.guard
    }

    pub fn model_name(&self) -> Option<&str> {
        self.encoder.as_ref().map(|e| e.name())
    }

    /// Top-`top_k` candidates by cross-encoder score, descending. Ties keep
    /// input order.
    pub fn try_rerank(
        &self,
        query: &str,
        candidates: Vec<RerankCandidate>,
        top_k: usize,
    ) -> Result<Vec<RerankCandidate>, RetrievalError> {
        let Some(encoder) = &self.encoder else {
            return Ok(truncated(candidates, top_k));
        };
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let encoder = Arc::clone(encoder);
        let query = query.to_string();
        let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
        let scores = self
            .guard
            .run("rerank", move || encoder.score(&query, &texts))??;
        if scores.len() != candidates.len() {
            return Err(RetrievalError::RerankFailed {
                reason: format!(
                    "expected {} scores, got {}",
                    candidates.len(),
                    scores.len()
                ),
            });
        }
        if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
            return Err(RetrievalError::RerankFailed {
                reason: format!("non-finite score {bad}"),
            });
        }

        let mut scored: Vec<RerankCandidate> = candidates
            .into_iter()
            .zip(scores)
            .map(|(mut c, s)| {
                c.reranker_score = Some(s);
                c
            })
            .collect();
        scored.sort_by(|a, b| {
            let (a, b) = (a.reranker_score.unwrap_or(0.0), b.reranker_score.unwrap_or(0.0));
            b.total_cmp(&a)
        });
        scored.truncate(top_k);
        tracing::debug!(reranked = scored.len(), "candidates reranked");
        Ok(scored)
    }

    /// [`Self::try_rerank`], falling back to the input truncated to `top_k`.
    pub fn rerank(
        &self,
        query: &str,
        candidates: Vec<RerankCandidate>,
        top_k: usize,
    ) -> Vec<RerankCandidate> {
        let fallback = truncated(candidates.clone(), top_k);
        match self.try_rerank(query, candidates, top_k) {
            Ok(reranked) => reranked,
            Err(e) => {
                tracing::warn!(error = %e, "reranking failed, keeping fused order");
                fallback
            }
        }
    }
}

fn truncated(mut candidates: Vec<RerankCandidate>, top_k: usize) -> Vec<RerankCandidate> {
    candidates.truncate(top_k);
    candidates
}
