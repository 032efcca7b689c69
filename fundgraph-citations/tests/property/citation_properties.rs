//! Property tests for fundgraph-citations: extraction is total and spans are sound.

use proptest::prelude::*;

use fundgraph_citations::CitationExtractor;

proptest! {
    #[test]
    fn extraction_never_panics_and_spans_slice_the_match(text in "\\PC{0,300}") {
        let extractor = CitationExtractor::new();
        for c in extractor.extract(&text) {
            prop_assert!(c.span.start < c.span.end);
            prop_assert_eq!(text.get(c.span.start..c.span.end), Some(c.text.as_str()));
            prop_assert!(!c.target.is_empty());
        }
    }
}

proptest! {
    #[test]
    fn code_is_found_in_any_surrounding_prose(
        prefix in "[a-zäöü ]{0,30}",
        suffix in "[a-zäöü ]{0,30}",
        code in prop::sample::select(vec!["BNBest-P", "ANBest-GK", "AZA", "NKBF 98"]),
    ) {
        let text = format!("{prefix} {code} {suffix}");
        let found = CitationExtractor::new().extract(&text);
        prop_assert!(found.iter().any(|c| c.target == code));
    }
}

proptest! {
    #[test]
    fn explicit_exclusion_phrase_always_marks(code in prop::sample::select(vec!["BNBest-P", "ANBest-P", "NKBF"])) {
        let text = format!("Die {code} findet keine Anwendung.");
        let found = CitationExtractor::new().extract(&text);
        prop_assert_eq!(found.len(), 1);
        prop_assert!(found[0].is_excluded);
    }
}
