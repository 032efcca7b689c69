use fundgraph_core::errors::GraphError;
use fundgraph_core::models::{ChunkAttrs, DocumentAttrs, Edge, Node, NodeKind, Relation};
use fundgraph_graph::GraphStore;
use test_fixtures::{corpus_graph, load_graph, LEGACY_LINKS_GRAPH, VERSION_CYCLE_GRAPH};

fn corpus() -> GraphStore {
    GraphStore::from_document(corpus_graph())
}

fn doc(id: &str, title: &str) -> Node {
    Node::document(
        id,
        DocumentAttrs {
            title: Some(title.to_string()),
            ..Default::default()
        },
    )
}

fn chunk(id: &str, text: &str) -> Node {
    Node::chunk(
        id,
        ChunkAttrs {
            text: text.to_string(),
            ..Default::default()
        },
    )
}

// ── Loading and indexes ──────────────────────────────────────────────────

#[test]
fn corpus_loads_every_node_and_edge() {
    let store = corpus();
    assert_eq!(store.node_count(), 19);
    assert_eq!(store.edge_count(), 17);
    assert_eq!(store.node("law_BHO").unwrap().kind(), NodeKind::Law);
    assert_eq!(store.node("ext_BRKG").unwrap().kind(), NodeKind::ExternalStub);
    assert_eq!(store.edges_by_relation(&Relation::Supersedes).count(), 1);
    assert_eq!(store.edges_by_relation(&Relation::HasChunk).count(), 11);
}

#[test]
fn round_trip_keeps_order_and_metadata() {
    let original = corpus_graph();
    let store = GraphStore::from_document(original.clone());
    let written = store.to_document();
    assert_eq!(written.nodes, original.nodes);
    assert_eq!(written.edges, original.edges);
    assert_eq!(written.graph, original.graph);
    let cited = written
        .edges
        .iter()
        .find(|e| e.source == "richtlinie_ki_chunk_0" && e.target == "law_BHO")
        .unwrap();
    assert_eq!(
        cited.extra.get("citation").and_then(|v| v.as_str()),
        Some("§ 44 BHO")
    );
}

#[test]
fn legacy_links_edge_endpoints_become_stubs() {
    let store = GraphStore::from_document(load_graph(LEGACY_LINKS_GRAPH));
    // `gwb` is only an edge endpoint.
    let gwb = store.node("gwb").unwrap();
    assert_eq!(gwb.kind(), NodeKind::ExternalStub);
    assert!(store.node("vgv").unwrap().is_law());
    assert!(store.to_document().legacy_links);
}

#[test]
fn unknown_edge_endpoint_is_created_as_stub() {
    let mut store = GraphStore::new();
    store.upsert_node(chunk("c1", "Text"));
    store.add_edge(Edge::new("c1", "law_AtG", Relation::References));
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.node("law_AtG").unwrap().kind(), NodeKind::ExternalStub);
}

#[test]
fn upsert_promotes_stub_and_keeps_edges() {
    let mut store = GraphStore::new();
    store.upsert_node(chunk("c1", "Text"));
    store.add_edge(Edge::new("c1", "law_AtG", Relation::References));

    store.upsert_node(Node::law(
        "law_AtG",
        DocumentAttrs {
            title: Some("Gesetz: ATG".into()),
            kuerzel: Some("ATG".into()),
            ..Default::default()
        },
    ));

    let law = store.node("law_AtG").unwrap();
    assert_eq!(law.kind(), NodeKind::Law);
    assert_eq!(law.kuerzel(), Some("ATG"));
    assert_eq!(store.node_count(), 2);
    assert!(store.has_edge("c1", "law_AtG", Some(&Relation::References)));
}

#[test]
fn add_edge_once_skips_identical_typed_edge() {
    let mut store = corpus();
    let before = store.edge_count();
    assert!(!store.add_edge_once("bnbest_p_2023", "bnbest_p_2019", Relation::Supersedes));
    assert!(store.add_edge_once("bnbest_p_2023", "bnbest_p_2019", Relation::References));
    assert_eq!(store.edge_count(), before + 1);
}

#[test]
fn parallel_edges_are_kept() {
    let mut store = GraphStore::new();
    store.add_edge(Edge::new("a", "b", Relation::References));
    store.add_edge(Edge::new("a", "b", Relation::References));
    assert_eq!(store.edge_count(), 2);
    assert_eq!(store.successors("a"), vec!["b"]);
    assert_eq!(store.degree("a"), 2);
}

// ── Chunk ownership ──────────────────────────────────────────────────────

#[test]
fn owning_document_follows_has_chunk() {
    let store = corpus();
    assert_eq!(store.owning_document("law_BHO_S_44").unwrap().id, "law_BHO");
    assert_eq!(
        store.owning_document("richtlinie_ki_chunk_1").unwrap().id,
        "richtlinie_ki"
    );
}

#[test]
fn owning_document_rejects_non_chunks_and_unknown_ids() {
    let store = corpus();
    assert!(matches!(
        store.owning_document("richtlinie_ki"),
        Err(GraphError::UnexpectedKind { .. })
    ));
    assert!(matches!(
        store.owning_document("nope"),
        Err(GraphError::NodeNotFound { .. })
    ));
}

#[test]
fn chunk_with_two_parents_violates_invariant() {
    let mut store = GraphStore::new();
    store.upsert_node(doc("d1", "A"));
    store.upsert_node(doc("d2", "B"));
    store.upsert_node(chunk("c", "Text"));
    store.add_edge(Edge::new("d1", "c", Relation::HasChunk));
    store.add_edge(Edge::new("d2", "c", Relation::HasChunk));

    assert!(matches!(
        store.owning_document("c"),
        Err(GraphError::ChunkParentInvariant { parents: 2, .. })
    ));
    let report = store.validate();
    assert_eq!(report.chunk_violations.len(), 1);
    assert!(!report.is_valid());
}

#[test]
fn chunks_of_lists_children_in_edge_order() {
    let store = corpus();
    let ids: Vec<&str> = store.chunks_of("law_BHO").iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["law_BHO_S_44", "law_BHO_S_23", "law_BHO_S_7"]);
}

#[test]
fn degree_counts_incident_edges() {
    let store = corpus();
    assert_eq!(store.degree("law_BHO"), 4);
    assert_eq!(store.degree("richtlinie_ki_chunk_0"), 3);
    assert_eq!(store.degree("missing"), 0);
    assert_eq!(store.max_degree(), 4);
    assert_eq!(GraphStore::new().max_degree(), 1);
}

#[test]
fn induced_subgraph_keeps_internal_edges_only() {
    let store = corpus();
    let sub = store.induced_subgraph(["law_BHO", "law_BHO_S_44", "richtlinie_ki_chunk_0", "ghost"]);
    assert_eq!(sub.node_count(), 3);
    assert_eq!(sub.edge_count(), 2);
    assert!(sub.has_edge("law_BHO", "law_BHO_S_44", Some(&Relation::HasChunk)));
    assert!(!sub.has_node("ghost"));
}

// ── Versioning ───────────────────────────────────────────────────────────

#[test]
fn latest_version_follows_supersedes() {
    let store = corpus();
    assert_eq!(store.latest_version("bnbest_p_2019"), "bnbest_p_2023");
    assert_eq!(store.latest_version("bnbest_p_2023"), "bnbest_p_2023");
    assert_eq!(store.latest_version("unknown"), "unknown");
    assert_eq!(store.newer_version("bnbest_p_2019"), Some("bnbest_p_2023"));
    assert_eq!(store.superseded_by("bnbest_p_2019"), vec!["bnbest_p_2023"]);
}

#[test]
fn latest_version_is_stable_on_cycles() {
    let store = GraphStore::from_document(load_graph(VERSION_CYCLE_GRAPH));
    assert_eq!(store.latest_version("v1"), "v2");
    assert_eq!(store.latest_version("v2"), "v2");
    assert_eq!(store.latest_version("v3"), "v2");
    assert_eq!(store.latest_version("v4"), "v4");
    for id in ["v1", "v2", "v3", "v4", "v5"] {
        let latest = store.latest_version(id);
        assert_eq!(store.latest_version(&latest), latest);
    }
}

#[test]
fn family_set_spans_both_directions() {
    let store = GraphStore::from_document(load_graph(VERSION_CYCLE_GRAPH));
    let family = store.family_set("v1");
    for id in ["v1", "v2", "v3", "v4"] {
        assert!(family.contains(id), "{id} missing from family");
    }
    assert!(!family.contains("v5"));
    assert_eq!(store.family_set("v5").len(), 1);
    assert_eq!(store.family_set("v4"), family);
}

#[test]
fn validate_reports_supersession_cycle() {
    let store = GraphStore::from_document(load_graph(VERSION_CYCLE_GRAPH));
    let report = store.validate();
    assert!(report.chunk_violations.is_empty());
    assert_eq!(report.supersession_cycles.len(), 1);
    match &report.supersession_cycles[0] {
        GraphError::SupersessionCycle { path } => assert_eq!(path, "v2 -> v3"),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(report.into_errors().len(), 1);
}

#[test]
fn corpus_is_structurally_valid() {
    assert!(corpus().validate().is_valid());
}
