//! Property tests for fundgraph-graph: version resolution and expansion bounds.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use fundgraph_core::models::{ChunkAttrs, Edge, Node, Relation};
use fundgraph_graph::{GraphAlgorithms, GraphStore, KHopConfig};

/// Documents `d0..dn` with arbitrary `SUPERSEDES` edges, cycles allowed.
fn build_version_graph(n: usize, edges: &[(usize, usize)]) -> GraphStore {
    let mut store = GraphStore::new();
    for i in 0..n {
        store.upsert_node(Node::document(format!("d{i}"), Default::default()));
    }
    for &(newer, older) in edges {
        if newer < n && older < n {
            store.add_edge(Edge::new(format!("d{newer}"), format!("d{older}"), Relation::Supersedes));
        }
    }
    store
}

/// Documents with one chunk each and arbitrary `REFERENCES` between chunks.
fn build_reference_graph(n: usize, edges: &[(usize, usize)]) -> GraphStore {
    let mut store = GraphStore::new();
    for i in 0..n {
        store.upsert_node(Node::document(format!("d{i}"), Default::default()));
        store.upsert_node(Node::chunk(
            format!("c{i}"),
            ChunkAttrs {
                text: format!("Abschnitt {i}"),
                ..Default::default()
            },
        ));
        store.add_edge(Edge::new(format!("d{i}"), format!("c{i}"), Relation::HasChunk));
    }
    for &(s, t) in edges {
        if s < n && t < n {
            store.add_edge(Edge::new(format!("c{s}"), format!("d{t}"), Relation::References));
        }
    }
    store
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..n * 2)
}

proptest! {
    #[test]
    fn latest_version_is_idempotent(edges in edge_strategy(12)) {
        let store = build_version_graph(12, &edges);
        for i in 0..12 {
            let id = format!("d{i}");
            let latest = store.latest_version(&id);
            prop_assert_eq!(store.latest_version(&latest), latest.clone());
            prop_assert!(store.family_set(&id).contains(&latest));
        }
    }
}

proptest! {
    #[test]
    fn family_membership_is_symmetric(edges in edge_strategy(10)) {
        let store = build_version_graph(10, &edges);
        for a in 0..10 {
            let a_id = format!("d{a}");
            let family = store.family_set(&a_id);
            for b_id in &family {
                prop_assert!(store.family_set(b_id).contains(&a_id));
            }
        }
    }
}

proptest! {
    #[test]
    fn acyclic_chain_resolves_to_its_head(len in 1_usize..15) {
        let edges: Vec<(usize, usize)> = (1..len).map(|i| (i, i - 1)).collect();
        let store = build_version_graph(len, &edges);
        let head = format!("d{}", len - 1);
        for i in 0..len {
            prop_assert_eq!(store.latest_version(&format!("d{i}")), head.clone());
        }
        prop_assert!(store.validate().is_valid());
    }
}

proptest! {
    #[test]
    fn k_hop_respects_max_nodes_and_keeps_seeds_first(
        edges in edge_strategy(15),
        max_nodes in 1_usize..20,
        depth in 0_usize..4,
        seed in 0_usize..15,
    ) {
        let store = build_reference_graph(15, &edges);
        let algos = GraphAlgorithms::new(Arc::new(store), Duration::from_secs(60));
        let config = KHopConfig { depth, max_nodes, ..KHopConfig::default() };
        let seed_id = format!("c{seed}");
        let ids = algos.k_hop_expansion(&[seed_id.as_str()], &config);

        prop_assert!(ids.len() <= max_nodes);
        prop_assert_eq!(ids.first(), Some(&seed_id));
        let mut seen = std::collections::HashSet::new();
        prop_assert!(ids.iter().all(|id| seen.insert(id.clone())));
        if depth == 0 {
            prop_assert_eq!(ids.len(), 1);
        }
    }
}

proptest! {
    #[test]
    fn pagerank_sums_to_one(edges in edge_strategy(15)) {
        let store = build_reference_graph(15, &edges);
        let algos = GraphAlgorithms::new(Arc::new(store), Duration::from_secs(60));
        let total: f64 = algos.global_pagerank().values().sum();
        prop_assert!((total - 1.0).abs() < 1e-6, "sum was {}", total);
    }
}

proptest! {
    #[test]
    fn temporal_filter_output_is_distinct(edges in edge_strategy(10), picks in prop::collection::vec(0_usize..10, 0..20)) {
        let store = build_version_graph(10, &edges);
        let algos = GraphAlgorithms::new(Arc::new(store), Duration::from_secs(60));
        let ids: Vec<String> = picks.iter().map(|i| format!("d{i}")).collect();
        let out = algos.temporal_filter(&ids);
        let distinct: std::collections::HashSet<&String> = out.iter().collect();
        prop_assert_eq!(distinct.len(), out.len());
        prop_assert!(out.len() <= ids.len());
    }
}
