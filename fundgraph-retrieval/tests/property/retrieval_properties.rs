//! Property tests for fundgraph-retrieval: fusion, BM25 ranking, snippets.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use fundgraph_core::config::SparseConfig;
use fundgraph_core::models::{DocumentMetadata, SearchFilters};
use fundgraph_retrieval::search::{enrichment, filters};
use fundgraph_retrieval::{rrf, SparseIndex};

const WORDS: [&str; 12] = [
    "Zuwendung",
    "Vergabe",
    "Reisekosten",
    "Frist",
    "Nachweis",
    "Bericht",
    "Haushalt",
    "Sparsamkeit",
    "Förderung",
    "Antrag",
    "Bescheid",
    "Projekt",
];

fn ranked_lists() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        prop::collection::vec(0_usize..20, 0..15)
            .prop_map(|ids| ids.into_iter().map(|i| format!("c{i}")).collect()),
        0..5,
    )
}

fn corpus() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(WORDS.to_vec()), 1..12)
            .prop_map(|words| words.join(" ")),
        1..25,
    )
}

fn score_map(lists: &[Vec<String>], k: u32) -> HashMap<String, f64> {
    rrf(lists, k)
        .into_iter()
        .map(|c| (c.id, c.rrf_score))
        .collect()
}

proptest! {
    #[test]
    fn rrf_is_sorted_distinct_and_bounded(lists in ranked_lists(), k in 1_u32..100) {
        let fused = rrf(&lists, k);
        prop_assert!(fused.windows(2).all(|w| w[0].rrf_score >= w[1].rrf_score));

        let mut seen = HashSet::new();
        prop_assert!(fused.iter().all(|c| seen.insert(c.id.clone())));

        let all: HashSet<&String> = lists.iter().flatten().collect();
        prop_assert_eq!(fused.len(), all.len());

        let ceiling = lists.len() as f64 / f64::from(k + 1);
        for c in &fused {
            prop_assert!(c.rrf_score > 0.0);
            prop_assert!(c.rrf_score <= ceiling + 1e-12);
        }
    }
}

proptest! {
    #[test]
    fn rrf_ignores_list_order(lists in ranked_lists()) {
        let forward = score_map(&lists, 60);
        let mut reversed = lists.clone();
        reversed.reverse();
        let backward = score_map(&reversed, 60);

        prop_assert_eq!(forward.len(), backward.len());
        for (id, score) in &forward {
            prop_assert!((backward[id] - score).abs() < 1e-12);
        }
    }
}

proptest! {
    #[test]
    fn bm25_hits_are_positive_sorted_and_capped(
        texts in corpus(),
        query in prop::collection::vec(prop::sample::select(WORDS.to_vec()), 1..4),
        k in 1_usize..10,
    ) {
        let chunks = texts
            .iter()
            .enumerate()
            .map(|(i, t)| (format!("c{i}"), t.clone()));
        let index = SparseIndex::build(chunks, &SparseConfig::default());
        let hits = index.search(&query.join(" "), k);

        prop_assert!(hits.len() <= k);
        prop_assert!(hits.iter().all(|(_, s)| *s > 0.0));
        prop_assert!(hits.windows(2).all(|w| w[0].1 >= w[1].1));
        let known: HashSet<&String> = index.chunk_ids().iter().collect();
        prop_assert!(hits.iter().all(|(id, _)| known.contains(id)));
    }
}

proptest! {
    #[test]
    fn snippet_is_bounded(text in "\\PC{0,600}", max in 0_usize..400) {
        let s = enrichment::snippet(&text, max);
        prop_assert!(s.ends_with("..."));
        prop_assert!(s.chars().count() <= max + 3);
        prop_assert!(text.starts_with(s.trim_end_matches('.')));
    }
}

proptest! {
    #[test]
    fn empty_filters_accept_everything(
        ministry in prop::option::of("[A-Z]{3,5}"),
        kuerzel in prop::option::of("[A-Za-z-]{2,8}"),
        as_of in prop::option::of("20[0-2][0-9]-0[1-9]-1[0-9]"),
    ) {
        let metadata = DocumentMetadata {
            ministry,
            kuerzel,
            as_of,
            ..Default::default()
        };
        prop_assert!(filters::matches(&SearchFilters::default(), &metadata));
    }
}
