use std::sync::{PoisonError, RwLock};

use fundgraph_core::errors::PersistenceError;
use fundgraph_core::models::GraphDocument;
use fundgraph_core::traits::IGraphStorage;

/// In-process storage for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: RwLock<Option<GraphDocument>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: GraphDocument) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }
}

impl IGraphStorage for MemoryStorage {
    fn load(&self) -> Result<Option<GraphDocument>, PersistenceError> {
        Ok(self
            .document
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, document: &GraphDocument) -> Result<(), PersistenceError> {
        *self.document.write().unwrap_or_else(PoisonError::into_inner) = Some(document.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
