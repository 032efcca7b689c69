//! Rank fusion across retrieval sources.

mod rrf;

pub use rrf::{rrf, FusedCandidate, FusionEngine};
