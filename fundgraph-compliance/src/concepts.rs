//! Keyword → target-document concept map for implicit expansion.

use std::collections::BTreeMap;
use std::path::Path;

use fundgraph_core::errors::ComplianceError;
use serde::Deserialize;

#[derive(Deserialize)]
struct ConceptFile {
    #[serde(default)]
    concepts: BTreeMap<String, String>,
}

/// Lower-cased keywords mapped to the abbreviation or title of the
/// document they imply. Iteration is in keyword order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConceptMap {
    entries: Vec<(String, String)>,
}

impl ConceptMap {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut sorted: BTreeMap<String, String> = BTreeMap::new();
        for (keyword, target) in pairs {
            let keyword = keyword.into().trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }
            sorted.insert(keyword, target.into());
        }
        Self {
            entries: sorted.into_iter().collect(),
        }
    }

    /// Load `{ "concepts": { keyword: target } }`. A missing or malformed
    /// file yields an empty map and a warning.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "concept map unavailable, implicit expansion disabled");
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, ComplianceError> {
        let unreadable = |reason: String| ComplianceError::ConceptMapUnreadable {
            path: path.display().to_string(),
            reason,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        let file: ConceptFile = serde_json::from_str(&raw).map_err(|e| unreadable(e.to_string()))?;
        let map = Self::from_pairs(file.concepts);
        tracing::debug!(path = %path.display(), concepts = map.len(), "concept map loaded");
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn target(&self, keyword: &str) -> Option<&str> {
        let keyword = keyword.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, v)| v.as_str())
    }

    /// `(keyword, target)` pairs whose keyword occurs in `text`,
    /// case-insensitively.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<(&'a str, &'a str)> {
        let lower = text.to_lowercase();
        self.entries
            .iter()
            .filter(|(keyword, _)| lower.contains(keyword.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}
