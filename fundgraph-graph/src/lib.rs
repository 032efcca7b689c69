//! # fundgraph-graph
//!
//! The regulation knowledge graph. An arena-backed directed multigraph with
//! secondary indexes, node-link persistence, version-family resolution,
//! PageRank-based ranking and expansion, and the shared snapshot manager
//! that serializes the single mutating path.

pub mod algorithms;
pub mod maintenance;
pub mod manager;
pub mod persistence;
pub mod store;

pub use algorithms::{GraphAlgorithms, KHopConfig, PageRankCache};
pub use manager::{GraphManager, GraphSnapshot};
pub use persistence::{JsonFileStorage, MemoryStorage};
pub use store::{GraphStore, ValidationReport};
