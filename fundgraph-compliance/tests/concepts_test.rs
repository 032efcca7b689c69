use fundgraph_compliance::ConceptMap;
use fundgraph_core::errors::ComplianceError;
use test_fixtures::{fixture_path, CONCEPT_MAP};

#[test]
fn loads_fixture_concepts_in_keyword_order() {
    let map = ConceptMap::load(&fixture_path(CONCEPT_MAP));
    assert_eq!(map.len(), 4);
    let keywords: Vec<&str> = map.entries().map(|(k, _)| k).collect();
    assert_eq!(
        keywords,
        vec!["kostenbasis", "reisekosten", "vergabe", "zwischennachweis"]
    );
    assert_eq!(map.target("Reisekosten"), Some("BRKG"));
    assert_eq!(map.target("NKBF"), None);
}

#[test]
fn matches_are_case_insensitive_substrings() {
    let map = ConceptMap::load(&fixture_path(CONCEPT_MAP));
    let hits = map.matches("Die VERGABE erfolgt nach Ermessen; Reisekostenabrechnung anbei.");
    assert_eq!(hits, vec![("reisekosten", "BRKG"), ("vergabe", "ANBest-P")]);
    assert!(map.matches("Keine Treffer hier.").is_empty());
}

#[test]
fn from_pairs_normalizes_keywords() {
    let map = ConceptMap::from_pairs([(" Vergabe ", "ANBest-P"), ("", "X"), ("  ", "Y")]);
    assert_eq!(map.len(), 1);
    assert_eq!(map.target("vergabe"), Some("ANBest-P"));
}

#[test]
fn missing_file_yields_empty_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(ConceptMap::load(&path).is_empty());
    let err = ConceptMap::try_load(&path).unwrap_err();
    assert!(matches!(err, ComplianceError::ConceptMapUnreadable { .. }));
}

#[test]
fn malformed_file_yields_empty_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concepts.json");
    std::fs::write(&path, "{ \"concepts\": [1, 2] }").unwrap();
    assert!(ConceptMap::load(&path).is_empty());
    assert!(ConceptMap::try_load(&path).is_err());
}

#[test]
fn file_without_concepts_key_is_empty_but_valid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concepts.json");
    std::fs::write(&path, "{}").unwrap();
    assert!(ConceptMap::try_load(&path).unwrap().is_empty());
}
