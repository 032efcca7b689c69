//! Property tests for fundgraph-compliance: mapping is total, abbreviation
//! cleaning is shape-preserving.

use std::sync::{Arc, LazyLock};

use proptest::prelude::*;

use fundgraph_compliance::{clean_abbreviation, ComplianceMapper, ConceptMap};
use fundgraph_core::config::{ComplianceConfig, GraphConfig};
use fundgraph_graph::{GraphManager, GraphStore};
use test_fixtures::{corpus_graph, fixture_path, CONCEPT_MAP};

static MAPPER: LazyLock<ComplianceMapper> = LazyLock::new(|| {
    let graph = GraphManager::in_memory(
        GraphStore::from_document(corpus_graph()),
        &GraphConfig::default(),
    )
    .unwrap();
    ComplianceMapper::new(
        Arc::new(graph),
        ConceptMap::load(&fixture_path(CONCEPT_MAP)),
        &ComplianceConfig::default(),
    )
});

proptest! {
    #[test]
    fn cleaned_abbreviations_have_importable_shape(target in "\\PC{0,14}") {
        if let Some(abbreviation) = clean_abbreviation(&target) {
            let len = abbreviation.chars().count();
            prop_assert!((2..=10).contains(&len));
            prop_assert!(!abbreviation.contains(' '));
            prop_assert_eq!(abbreviation.clone(), abbreviation.to_uppercase());
            prop_assert_eq!(clean_abbreviation(&abbreviation), Some(abbreviation));
        }
    }
}

proptest! {
    #[test]
    fn mapping_is_never_empty_and_hits_are_consistent(
        chunks in prop::collection::vec(
            prop_oneof![
                "\\PC{0,80}",
                Just("Es gelten die BNBest-P.".to_string()),
                Just("Die NKBF 98 findet keine Anwendung.".to_string()),
                Just("Zuwendungen werden nach § 44 BHO gewährt.".to_string()),
                Just("Die Vergabe erfolgt nach Ermessen.".to_string()),
            ],
            0..5,
        ),
    ) {
        let ctx = MAPPER.expand_context("prop", &chunks);
        prop_assert!(!ctx.mapped_regulations.is_empty());

        let mut titles: Vec<&str> = ctx
            .mapped_regulations
            .iter()
            .map(|r| r.source_doc.as_str())
            .collect();
        titles.sort_unstable();
        titles.dedup();
        prop_assert_eq!(titles.len(), ctx.mapped_regulations.len());

        for reg in &ctx.mapped_regulations {
            prop_assert!(!reg.rules.is_empty());
            prop_assert!(reg.hit_count >= reg.found_in_chunks.len());
            prop_assert!(reg.found_in_chunks.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(reg.found_in_chunks.iter().all(|&i| i < chunks.len()));
        }
    }
}
