use std::sync::Arc;

use fundgraph_core::config::{GraphConfig, SparseConfig};
use fundgraph_core::errors::PersistenceError;
use fundgraph_core::models::{ChunkAttrs, Node};
use fundgraph_graph::{GraphManager, GraphStore};
use fundgraph_retrieval::sparse::{
    tokenizer_for, GermanTokenizer, SimpleTokenizer, SparseIndex, SparseIndexHandle, Tokenizer,
};
use test_fixtures::corpus_graph;

fn corpus_index() -> SparseIndex {
    let store = GraphStore::from_document(corpus_graph());
    SparseIndex::from_store(&store, &SparseConfig::default())
}

fn ids(hits: &[(String, f64)]) -> Vec<&str> {
    hits.iter().map(|(id, _)| id.as_str()).collect()
}

// ── Tokenizers ───────────────────────────────────────────────────────────

#[test]
fn german_tokenizer_drops_stop_words_and_short_tokens() {
    let tokens = GermanTokenizer.tokenize("Die Zuwendungen werden nach § 44 BHO gewährt.");
    assert_eq!(tokens, vec!["zuwendung", "bho", "gewährt"]);
}

#[test]
fn german_tokenizer_folds_inflections() {
    let t = GermanTokenizer;
    assert_eq!(t.tokenize("Zuwendung"), t.tokenize("Zuwendungen"));
    assert_eq!(t.tokenize("Reisekosten"), t.tokenize("reisekosten"));
}

#[test]
fn simple_tokenizer_splits_on_whitespace_only() {
    let tokens = SimpleTokenizer.tokenize("Die Reisekosten, im Jahr");
    assert_eq!(tokens, vec!["die", "reisekosten,", "jahr"]);
}

#[test]
fn tokenizer_selection_defaults_to_german() {
    assert_eq!(tokenizer_for("simple").name(), "simple");
    assert_eq!(tokenizer_for("german").name(), "german");
    assert_eq!(tokenizer_for("spacy_de").name(), "german");
}

// ── Index construction ───────────────────────────────────────────────────

#[test]
fn from_store_indexes_every_chunk_with_text() {
    let index = corpus_index();
    assert_eq!(index.len(), 11);
    assert!(!index.chunk_ids().iter().any(|id| id == "richtlinie_ki"));
    assert!(index.chunk_ids().iter().any(|id| id == "law_BHO_S_44"));

    let stats = index.stats();
    assert_eq!(stats.num_chunks, 11);
    assert_eq!(stats.tokenizer, "german");
    assert!((stats.avg_tokens_per_chunk - 10.09).abs() < 1e-9);
    assert_eq!(stats.vocabulary_size, 87);
}

#[test]
fn empty_corpus_returns_no_hits() {
    let index = SparseIndex::build(Vec::<(String, String)>::new(), &SparseConfig::default());
    assert!(index.is_empty());
    assert!(index.search("Reisekosten", 5).is_empty());
    assert_eq!(index.stats().avg_tokens_per_chunk, 0.0);
}

// ── Search ───────────────────────────────────────────────────────────────

#[test]
fn search_ranks_exact_term_matches_first() {
    let index = corpus_index();
    let hits = index.search("Reisekosten Frist", 10);
    assert_eq!(
        ids(&hits),
        vec!["richtlinie_ki_chunk_1", "bnbest_p_2019_chunk_0"]
    );
    assert!(hits[0].1 > hits[1].1);
}

#[test]
fn search_matches_inflected_forms() {
    let index = corpus_index();
    let hits = index.search("Wirtschaftlichkeit", 10);
    assert_eq!(ids(&hits), vec!["law_BHO_S_7", "anbest_p_chunk_0"]);

    let hits = index.search("Kostenbasis", 10);
    assert_eq!(ids(&hits), vec!["nkbf_98_chunk_0"]);
}

#[test]
fn search_truncates_to_k() {
    let index = corpus_index();
    let hits = index.search("Zwischennachweis vorlegen", 2);
    assert_eq!(
        ids(&hits),
        vec!["bnbest_p_2023_chunk_0", "bnbest_p_2019_chunk_0"]
    );
}

#[test]
fn stop_word_query_returns_nothing() {
    let index = corpus_index();
    assert!(index.search("der die das", 10).is_empty());
    assert!(index.search("", 10).is_empty());
}

#[test]
fn unknown_terms_return_nothing() {
    let index = corpus_index();
    assert!(index.search("Quantencomputer", 10).is_empty());
}

#[test]
fn scores_are_positive_and_descending() {
    let index = corpus_index();
    let hits = index.search("Zuwendungen Vergabe Zwischennachweis", 20);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|(_, s)| *s > 0.0));
    assert!(hits.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn equal_scores_keep_corpus_order() {
    let chunks = vec![
        ("b", "Vergabe nach UVgO"),
        ("a", "Vergabe nach UVgO"),
        ("c", "Reisekosten erstatten"),
        ("d", "Haushaltsplan aufstellen"),
        ("e", "Sparsamkeit beachten"),
    ]
    .into_iter()
    .map(|(id, text)| (id.to_string(), text.to_string()));
    let index = SparseIndex::build(chunks, &SparseConfig::default());
    let hits = index.search("UVgO", 10);
    assert_eq!(ids(&hits), vec!["b", "a"]);
    assert_eq!(hits[0].1, hits[1].1);
}

// ── Persistence ──────────────────────────────────────────────────────────

#[test]
fn save_and_load_preserve_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("bm25.json");
    let index = corpus_index();
    index.save(&path).unwrap();
    assert!(path.exists());

    let loaded = SparseIndex::load(&path, &SparseConfig::default()).unwrap();
    assert_eq!(loaded.len(), index.len());
    assert_eq!(loaded.stats(), index.stats());
    assert_eq!(
        loaded.search("Reisekosten Frist", 5),
        index.search("Reisekosten Frist", 5)
    );
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = SparseIndex::load(&dir.path().join("absent.json"), &SparseConfig::default())
        .unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound { .. }));
}

#[test]
fn load_rejects_mismatched_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bm25.json");
    let raw = serde_json::json!({
        "tokenizer": "german",
        "chunk_ids": ["a", "b"],
        "tokenized_corpus": [["reisekost"]],
    });
    std::fs::write(&path, raw.to_string()).unwrap();

    let err = SparseIndex::load(&path, &SparseConfig::default()).unwrap_err();
    assert!(matches!(err, PersistenceError::Malformed { .. }));
}

#[test]
fn load_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bm25.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = SparseIndex::load(&path, &SparseConfig::default()).unwrap_err();
    assert!(matches!(err, PersistenceError::Malformed { .. }));
}

// ── Generation-aware handle ──────────────────────────────────────────────

#[test]
fn handle_rebuilds_only_on_new_generation() {
    let manager = GraphManager::in_memory(
        GraphStore::from_document(corpus_graph()),
        &GraphConfig::default(),
    )
    .unwrap();
    let handle = SparseIndexHandle::new(SparseConfig::default());
    assert_eq!(handle.built_generation(), None);

    let first = handle.get_or_build(&manager.snapshot());
    let again = handle.get_or_build(&manager.snapshot());
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(handle.built_generation(), Some(1));
    assert!(first.search("Sondervermögen", 5).is_empty());

    manager
        .write(|store| {
            store.upsert_node(Node::chunk(
                "sv_chunk_0",
                ChunkAttrs {
                    text: "Mittel aus dem Sondervermögen werden gesondert nachgewiesen."
                        .to_string(),
                    ..Default::default()
                },
            ));
            Ok(())
        })
        .unwrap();

    let rebuilt = handle.get_or_build(&manager.snapshot());
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert_eq!(handle.built_generation(), Some(2));
    assert_eq!(rebuilt.len(), 12);
    assert_eq!(ids(&rebuilt.search("Sondervermögen", 5)), vec!["sv_chunk_0"]);
}
