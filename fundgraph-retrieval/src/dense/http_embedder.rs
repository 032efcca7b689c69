//! OpenAI-compatible HTTP embedding backend.
//!
//! Posts `{model, input}` to an `/v1/embeddings` endpoint with an optional
//! bearer key. Failed requests are retried with exponential backoff; once
//! retries are exhausted the embedder marks itself unavailable until
//! [`HttpEmbedder::reset_availability`] is called.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use fundgraph_core::errors::RetrievalError;
use fundgraph_core::traits::IEmbedder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub struct HttpEmbedder {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    available: AtomicBool,
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl HttpEmbedder {
    /// Client posting to an OpenAI-compatible embeddings URL. `timeout`
    /// bounds each HTTP request; failed requests are retried up to three
    /// times before the embedder marks itself unavailable.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RetrievalError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RetrievalError::EmbeddingFailed {
                reason: format!("HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            available: AtomicBool::new(true),
            max_retries: 3,
        })
    }

    /// Retries after the first failed request. `0` gives up immediately.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// False once retries were exhausted; every request then fails fast
    /// until [`reset_availability`](Self::reset_availability).
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    /// Allow requests again after the embedder gave up.
    pub fn reset_availability(&self) {
        self.available.store(true, Ordering::Relaxed);
    }

    fn request_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if !self.is_available() {
            return Err(RetrievalError::EmbeddingFailed {
                reason: format!("{} is unavailable", self.endpoint),
            });
        }

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(100 * 2u64.pow(attempt - 1));
                std::thread::sleep(delay);
                debug!(attempt, "retrying embedding request");
            }
            match self.send_request(texts) {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => {
                    warn!(attempt, error = %e, "embedding request failed");
                    last_err = Some(e);
                }
            }
        }

        self.available.store(false, Ordering::Relaxed);
        Err(last_err.unwrap_or_else(|| RetrievalError::EmbeddingFailed {
            reason: "all retries exhausted".to_string(),
        }))
    }

    fn send_request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let failed = |reason: String| RetrievalError::EmbeddingFailed { reason };

        let mut request = self.client.post(&self.endpoint).json(&EmbedRequest {
            model: &self.model,
            input: texts,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .map_err(|e| failed(format!("HTTP error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(failed(format!("API returned {status}: {body}")));
        }

        let mut parsed: EmbedResponse = response
            .json()
            .map_err(|e| failed(format!("JSON parse error: {e}")))?;
        if parsed.data.len() != texts.len() {
            return Err(failed(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }
        parsed.data.sort_by_key(|d| d.index);
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

impl IEmbedder for HttpEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
