//! In-memory query-embedding cache using moka.

use std::time::Duration;

use moka::sync::Cache;

/// Query embeddings keyed by the blake3 hash of the query text.
pub struct QueryEmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl QueryEmbeddingCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .time_to_live(Duration::from_secs(86400))
            .build();
        Self { cache }
    }

    pub fn key(query: &str) -> String {
        blake3::hash(query.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, query: &str) -> Option<Vec<f32>> {
        self.cache.get(&Self::key(query))
    }

    pub fn insert(&self, query: &str, embedding: Vec<f32>) {
        self.cache.insert(Self::key(query), embedding);
    }

    pub fn contains(&self, query: &str) -> bool {
        self.cache.contains_key(&Self::key(query))
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
