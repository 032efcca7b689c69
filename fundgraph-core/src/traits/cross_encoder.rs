use crate::errors::RetrievalError;

/// External cross-encoder relevance scorer.
pub trait ICrossEncoder: Send + Sync {
    /// Score `(query, text)` pairs; one score per text, in order.
    fn score(&self, query: &str, texts: &[String]) -> Result<Vec<f64>, RetrievalError>;

    fn name(&self) -> &str;
}
