//! # fundgraph-core
//!
//! Foundation crate for the fundgraph regulation graph.
//! Defines the node/edge model, the node-link document format, search and
//! compliance result types, configuration, errors, constants, and the
//! traits behind which the external collaborators (embedding backend,
//! vector index, cross encoder, law crawler, graph persistence) live.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod deadline;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FundGraphConfig;
pub use errors::{FundGraphError, FundGraphResult};
pub use models::{Edge, GraphDocument, Node, NodeData, NodeKind, Relation};
