use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fundgraph_core::errors::PersistenceError;
use fundgraph_core::models::GraphDocument;
use fundgraph_core::traits::IGraphStorage;

/// Node-link JSON file. Saves go to a sibling temp file that is then
/// renamed over the target, so readers never see a half-written graph.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }
}

impl IGraphStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<GraphDocument>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        GraphDocument::from_json(&raw).map(Some)
    }

    fn save(&self, document: &GraphDocument) -> Result<(), PersistenceError> {
        let json = document.to_json_pretty()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        let mut file = fs::File::create(&tmp).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            nodes = document.nodes.len(),
            edges = document.edges.len(),
            "graph saved"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
