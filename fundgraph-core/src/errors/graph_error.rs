/// Graph model and traversal errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("chunk {chunk_id} has {parents} HAS_CHUNK parents, expected exactly 1")]
    ChunkParentInvariant { chunk_id: String, parents: usize },

    #[error("node {id} is a {actual}, expected {expected}")]
    UnexpectedKind {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("SUPERSEDES cycle detected through: {path}")]
    SupersessionCycle { path: String },
}
