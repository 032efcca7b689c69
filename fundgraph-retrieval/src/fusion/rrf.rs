//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Combines ranked lists from different retrieval methods without
//! normalizing their scores against each other.

use std::collections::{HashMap, HashSet};

/// A candidate after RRF fusion.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedCandidate {
    pub id: String,
    /// Fused RRF score (higher = more relevant).
    pub rrf_score: f64,
}

/// Fuse ranked id lists. Ranks are 1-based; an id missing from a list
/// contributes nothing for that list, and repeats within one list count
/// only at their first position. Sorted by score descending; ties keep
/// the order in which ids were first seen.
pub fn rrf<S: AsRef<str>>(lists: &[Vec<S>], k: u32) -> Vec<FusedCandidate> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut candidates: Vec<FusedCandidate> = Vec::new();

    for list in lists {
        let mut counted: HashSet<&str> = HashSet::new();
        for (i, id) in list.iter().enumerate() {
            let id = id.as_ref();
            if !counted.insert(id) {
                continue;
            }
            let contribution = 1.0 / (f64::from(k) + (i + 1) as f64);
            match position.get(id) {
                Some(&slot) => candidates[slot].rrf_score += contribution,
                None => {
                    position.insert(id, candidates.len());
                    candidates.push(FusedCandidate {
                        id: id.to_string(),
                        rrf_score: contribution,
                    });
                }
            }
        }
    }

    candidates.sort_by(|a, b| b.rrf_score.total_cmp(&a.rrf_score));
    candidates
}

/// [`rrf`] with a fixed smoothing constant.
#[derive(Debug, Clone, Copy)]
pub struct FusionEngine {
    k: u32,
}

impl FusionEngine {
    pub fn new(k: u32) -> Self {
        Self { k }
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn fuse<S: AsRef<str>>(&self, lists: &[Vec<S>]) -> Vec<FusedCandidate> {
        rrf(lists, self.k)
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new(fundgraph_core::config::defaults::DEFAULT_RRF_K)
    }
}
