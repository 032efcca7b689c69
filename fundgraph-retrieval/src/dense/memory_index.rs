//! Brute-force cosine vector index held in memory.

use std::sync::{PoisonError, RwLock};

use fundgraph_core::errors::RetrievalError;
use fundgraph_core::models::{VectorFilter, VectorQueryResult, VectorRecord};
use fundgraph_core::traits::IVectorIndex;

/// Records in insertion order; upserts replace in place.
#[derive(Default)]
pub struct InMemoryVectorIndex {
    records: RwLock<Vec<VectorRecord>>,
}

impl InMemoryVectorIndex {
    /// Empty index.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cosine distance in `[0, 2]`. A zero vector is orthogonal to everything.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    let cosine = (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0);
    1.0 - cosine
}

fn passes(record: &VectorRecord, filter: Option<&VectorFilter>) -> bool {
    filter.map_or(true, |f| {
        f.iter().all(|(key, want)| record.metadata.get(key) == Some(want))
    })
}

impl IVectorIndex for InMemoryVectorIndex {
    fn query(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&VectorFilter>,
    ) -> Result<VectorQueryResult, RetrievalError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut scored: Vec<(f64, &VectorRecord)> = records
            .iter()
            .filter(|r| passes(r, filter))
            .map(|r| (cosine_distance(vector, &r.embedding), r))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.truncate(k);

        let mut result = VectorQueryResult::default();
        for (distance, record) in scored {
            result.ids.push(record.id.clone());
            result.distances.push(distance);
            result.documents.push(Some(record.document.clone()));
            result.metadatas.push(record.metadata.clone());
        }
        Ok(result)
    }

    fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), RetrievalError> {
        let mut stored = self.records.write().unwrap_or_else(PoisonError::into_inner);
        for record in records {
            match stored.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => stored.push(record),
            }
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
