//! Test fixture loader for fundgraph corpora, concept maps, and scenarios.
//!
//! Provides typed deserialization of the fixture JSON files and helpers for
//! loading them in tests across crates.

use std::path::PathBuf;

use fundgraph_core::models::GraphDocument;
use serde::de::DeserializeOwned;

/// Small regulation corpus: guidelines, BNBest/ANBest families, BHO/VwVfG
/// law sections, an NKBF 98 document and a BRKG stub.
pub const CORPUS_GRAPH: &str = "graphs/funding_corpus.json";
/// A `SUPERSEDES` chain with a cycle and a branch, for version resolution.
pub const VERSION_CYCLE_GRAPH: &str = "graphs/version_cycle.json";
/// Graph written with the legacy `links` key and `node_type` tags.
pub const LEGACY_LINKS_GRAPH: &str = "graphs/legacy_links.json";
/// Keyword → target document concept map.
pub const CONCEPT_MAP: &str = "concepts/compliance_concepts.json";

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("graphs").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Load a node-link graph fixture.
pub fn load_graph(relative_path: &str) -> GraphDocument {
    let value = load_fixture_value(relative_path);
    GraphDocument::from_value(value)
        .unwrap_or_else(|e| panic!("Fixture {} is not a node-link graph: {}", relative_path, e))
}

/// The standard regulation corpus.
pub fn corpus_graph() -> GraphDocument {
    load_graph(CORPUS_GRAPH)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}
