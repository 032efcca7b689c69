use fundgraph_core::models::*;
use serde_json::json;

// ── Node-link codec ──────────────────────────────────────────────────────

#[test]
fn node_link_preserves_unknown_attributes_and_relations() {
    let raw = json!({
        "directed": true,
        "multigraph": true,
        "graph": {"name": "kg"},
        "nodes": [
            {"id": "bnbest_p", "type": "document", "title": "BNBest-P", "kuerzel": "BNBest-P",
             "stand": "2019", "page_count": 12, "custom": {"a": 1}},
            {"id": "bnbest_p_chunk_0", "type": "chunk", "text": "Der Zuwendungsempfänger ...",
             "context": "BNBest-P > Nr. 1", "rules": [{"category": "Bericht", "rule": "Zwischennachweis", "value": null}]},
            {"id": "law_BHO", "type": "law", "title": "Bundeshaushaltsordnung"}
        ],
        "links": [
            {"source": "bnbest_p", "target": "bnbest_p_chunk_0", "relation": "HAS_CHUNK", "key": 0},
            {"source": "bnbest_p_chunk_0", "target": "law_BHO", "relation": "CITES_LOOSELY"}
        ]
    });

    let doc = GraphDocument::from_value(raw).unwrap();
    assert!(doc.legacy_links);
    assert_eq!(doc.nodes.len(), 3);
    assert_eq!(doc.nodes[0].extra["page_count"], json!(12));
    assert_eq!(doc.nodes[1].as_chunk().unwrap().rules.len(), 1);
    assert_eq!(doc.edges[1].relation, Relation::Other("CITES_LOOSELY".into()));
    assert_eq!(doc.edges[0].extra["key"], json!(0));

    let reloaded = GraphDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(reloaded, doc);
}

#[test]
fn node_type_tag_marks_law() {
    let raw = json!({
        "nodes": [{"id": "vwvfg", "node_type": "regulation", "title": "VwVfG"}],
        "edges": []
    });
    let doc = GraphDocument::from_value(raw).unwrap();
    assert_eq!(doc.nodes[0].kind(), NodeKind::Law);
    assert!(doc.nodes[0].is_law());
}

#[test]
fn untyped_nodes_are_inferred() {
    let raw = json!({
        "nodes": [
            {"id": "c1", "text": "abc"},
            {"id": "d1", "title": "Richtlinie"},
            {"id": 42}
        ]
    });
    let doc = GraphDocument::from_value(raw).unwrap();
    assert_eq!(doc.nodes[0].kind(), NodeKind::Chunk);
    assert_eq!(doc.nodes[1].kind(), NodeKind::Document);
    assert_eq!(doc.nodes[2].kind(), NodeKind::ExternalStub);
    assert_eq!(doc.nodes[2].id, "42");
}

#[test]
fn malformed_documents_are_rejected() {
    assert!(GraphDocument::from_json("[1, 2]").is_err());
    assert!(GraphDocument::from_json(r#"{"nodes": [{"title": "no id"}]}"#).is_err());
    assert!(GraphDocument::from_json(r#"{"nodes": [], "edges": [{"source": "a"}]}"#).is_err());
}

fn chunk_with_rules(rules: serde_json::Value) -> serde_json::Value {
    json!({
        "nodes": [{"id": "rl_chunk_0", "type": "chunk", "text": "Text", "rules": rules}],
        "edges": []
    })
}

#[test]
fn rule_entries_are_written_back_verbatim() {
    let rules = json!([
        {"category": "Vergabe", "page": 3, "rule": "r", "value": null},
        {"category": null, "rule": "Bericht jährlich"},
        "freitext",
        {"rule": "Frist", "value": {"tage": 30}}
    ]);
    let doc = GraphDocument::from_value(chunk_with_rules(rules.clone())).unwrap();

    let parsed = &doc.nodes[0].as_chunk().unwrap().rules;
    assert_eq!(parsed.len(), 4);
    assert_eq!(parsed[0].category, "Vergabe");
    assert_eq!(parsed[0].value, None);
    assert_eq!(parsed[1].category, "");
    assert_eq!(parsed[1].rule, "Bericht jährlich");
    assert!(!parsed[2].is_structured());
    assert_eq!(parsed[3].value, Some(json!({"tage": 30})));

    assert_eq!(doc.to_value()["nodes"][0]["rules"], rules);
    let reloaded = GraphDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(reloaded.to_value()["nodes"][0]["rules"], rules);
}

#[test]
fn edited_rule_keeps_unmodelled_keys() {
    let rules = json!([{"category": "Vergabe", "page": 3, "rule": "r", "value": null}]);
    let mut doc = GraphDocument::from_value(chunk_with_rules(rules)).unwrap();
    if let NodeData::Chunk(chunk) = &mut doc.nodes[0].data {
        chunk.rules[0].rule = "neu".into();
    }
    assert_eq!(
        doc.to_value()["nodes"][0]["rules"],
        json!([{"category": "Vergabe", "page": 3, "rule": "neu", "value": null}])
    );
}

#[test]
fn empty_or_odd_rule_lists_stay_untouched() {
    for rules in [json!([]), json!("keine"), json!(null)] {
        let doc = GraphDocument::from_value(chunk_with_rules(rules.clone())).unwrap();
        assert!(doc.nodes[0].as_chunk().unwrap().rules.is_empty());
        assert_eq!(doc.to_value()["nodes"][0]["rules"], rules);
    }
}

#[test]
fn constructed_rule_serializes_its_fields() {
    let rule = ExtractedRule::new("Frist", "30 Tage").with_value(json!(30));
    assert_eq!(
        serde_json::to_value(&rule).unwrap(),
        json!({"category": "Frist", "rule": "30 Tage", "value": 30})
    );
    let back: ExtractedRule =
        serde_json::from_value(json!({"category": "Frist", "rule": "30 Tage", "value": 30}))
            .unwrap();
    assert_eq!(back.rule, "30 Tage");
    assert_eq!(back.value, Some(json!(30)));
}

// ── Node merge ───────────────────────────────────────────────────────────

#[test]
fn stub_merge_promotes_kind_and_keeps_identity() {
    let mut stub = Node::stub("law_ATG");
    stub.extra.insert("first_seen".into(), json!("2024-01-01"));

    let law = Node::law(
        "law_ATG",
        DocumentAttrs {
            title: Some("Gesetz: ATG".into()),
            kuerzel: Some("ATG".into()),
            ..Default::default()
        },
    );
    stub.merge_from(law);

    assert_eq!(stub.id, "law_ATG");
    assert_eq!(stub.kind(), NodeKind::Law);
    assert_eq!(stub.kuerzel(), Some("ATG"));
    assert_eq!(stub.extra["first_seen"], json!("2024-01-01"));
}

#[test]
fn display_title_prefers_doc_title() {
    let node = Node::document(
        "d",
        DocumentAttrs {
            title: Some("short".into()),
            doc_title: Some("Long Title".into()),
            ..Default::default()
        },
    );
    assert_eq!(node.display_title(), Some("Long Title"));
}

// ── Relations and year markers ───────────────────────────────────────────

#[test]
fn relation_names_round_trip() {
    for rel in Relation::TRAVERSABLE {
        assert_eq!(Relation::parse(rel.as_str()), rel);
    }
    let json = serde_json::to_string(&Relation::Supersedes).unwrap();
    assert_eq!(json, "\"SUPERSEDES\"");
}

#[test]
fn year_marker_detection() {
    assert!(has_year_marker("NKBF 98"));
    assert!(has_year_marker("ANBest-P 2019"));
    assert!(!has_year_marker("BNBest-P"));
    assert!(!has_year_marker("AZA"));
}

#[test]
fn mapped_regulation_serializes_camel_case() {
    let reg = MappedRegulation {
        category: "Explicit provisions (cited)".into(),
        source_doc: "BHO".into(),
        doc_id: Some("law_BHO".into()),
        rules: vec![],
        hit_count: 2,
        found_in_chunks: vec![0, 1],
        is_newly_crawled: false,
    };
    let value = serde_json::to_value(&reg).unwrap();
    assert_eq!(value["sourceDoc"], json!("BHO"));
    assert_eq!(value["hitCount"], json!(2));
    assert_eq!(value["isNewlyCrawled"], json!(false));
}
