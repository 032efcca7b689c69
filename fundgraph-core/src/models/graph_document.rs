//! Node-link document: the persisted form of the graph.
//!
//! Shape: `{directed, multigraph, graph, nodes: [{id, type, ...}], edges:
//! [{source, target, relation, ...}]}`. Loading also accepts `links` for
//! the edge list and `node_type` as the kind tag. Attributes the core does
//! not model go to the per-node extension map and are written back as-is.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::edge::{Edge, Relation};
use super::node::{
    ChunkAttrs, DocumentAttrs, Extensions, ExtractedRule, Node, NodeData, NodeKind, StubAttrs,
};
use crate::errors::PersistenceError;

#[derive(Debug, Clone, PartialEq)]
pub struct GraphDocument {
    pub directed: bool,
    pub multigraph: bool,
    /// Graph-level attributes.
    pub graph: Extensions,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// The edge list was read from a `links` key and is written back there.
    pub legacy_links: bool,
}

impl Default for GraphDocument {
    fn default() -> Self {
        Self {
            directed: true,
            multigraph: true,
            graph: Extensions::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            legacy_links: false,
        }
    }
}

impl GraphDocument {
    pub fn from_json(raw: &str) -> Result<Self, PersistenceError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| PersistenceError::Malformed {
            reason: e.to_string(),
        })?;
        Self::from_value(value)
    }

    pub fn to_json_pretty(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(&self.to_value()).map_err(|e| PersistenceError::Malformed {
            reason: e.to_string(),
        })
    }

    pub fn from_value(value: Value) -> Result<Self, PersistenceError> {
        let Value::Object(mut root) = value else {
            return Err(malformed("top level is not an object"));
        };

        let directed = root.get("directed").and_then(Value::as_bool).unwrap_or(true);
        let multigraph = root.get("multigraph").and_then(Value::as_bool).unwrap_or(true);
        let graph = match root.remove("graph") {
            Some(Value::Object(map)) => map,
            _ => Extensions::new(),
        };

        let nodes = match root.remove("nodes") {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(node_from_value)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
            Some(_) => return Err(malformed("`nodes` is not an array")),
        };

        let (raw_edges, legacy_links) = match (root.remove("edges"), root.remove("links")) {
            (Some(edges), _) => (edges, false),
            (None, Some(links)) => (links, true),
            (None, None) => (Value::Array(Vec::new()), false),
        };
        let edges = match raw_edges {
            Value::Array(items) => items
                .into_iter()
                .map(edge_from_value)
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(malformed("edge list is not an array")),
        };

        Ok(Self {
            directed,
            multigraph,
            graph,
            nodes,
            edges,
            legacy_links,
        })
    }

    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        root.insert("directed".into(), Value::Bool(self.directed));
        root.insert("multigraph".into(), Value::Bool(self.multigraph));
        root.insert("graph".into(), Value::Object(self.graph.clone()));
        root.insert(
            "nodes".into(),
            Value::Array(self.nodes.iter().map(node_to_value).collect()),
        );
        let key = if self.legacy_links { "links" } else { "edges" };
        root.insert(
            key.into(),
            Value::Array(self.edges.iter().map(edge_to_value).collect()),
        );
        Value::Object(root)
    }
}

impl Serialize for GraphDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GraphDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn malformed(reason: &str) -> PersistenceError {
    PersistenceError::Malformed {
        reason: reason.to_string(),
    }
}

/// Node ids may be numbers in documents written by other tools.
fn id_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn take_str(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if matches!(map.get(key), Some(Value::String(_))) {
        if let Some(Value::String(s)) = map.remove(key) {
            return Some(s);
        }
    }
    None
}

/// Each entry is read on its own, so one odd entry cannot hide the rest.
/// An empty or non-array `rules` value stays in the extension map.
fn take_rules(map: &mut Map<String, Value>) -> Vec<ExtractedRule> {
    if !matches!(map.get("rules"), Some(Value::Array(items)) if !items.is_empty()) {
        return Vec::new();
    }
    match map.remove("rules") {
        Some(Value::Array(items)) => items.into_iter().map(ExtractedRule::from_value).collect(),
        _ => Vec::new(),
    }
}

fn resolve_kind(map: &mut Map<String, Value>) -> NodeKind {
    let tagged = map
        .get("type")
        .and_then(Value::as_str)
        .and_then(NodeKind::from_tag)
        .or_else(|| {
            map.get("node_type")
                .and_then(Value::as_str)
                .and_then(NodeKind::from_tag)
        });
    let kind = match tagged {
        Some(kind) => kind,
        None if map.contains_key("text") => NodeKind::Chunk,
        None if map.keys().any(|k| k != "type" && k != "node_type") => NodeKind::Document,
        None => NodeKind::ExternalStub,
    };
    // A canonical tag is regenerated on save; anything else stays verbatim.
    if map.get("type").and_then(Value::as_str) == Some(kind.as_str()) {
        map.remove("type");
    }
    kind
}

fn node_from_value(value: Value) -> Result<Node, PersistenceError> {
    let Value::Object(mut map) = value else {
        return Err(malformed("node entry is not an object"));
    };
    let id = id_string(map.remove("id")).ok_or_else(|| malformed("node without a usable id"))?;

    let data = match resolve_kind(&mut map) {
        NodeKind::Document => NodeData::Document(take_document(&mut map)),
        NodeKind::Law => NodeData::Law(take_document(&mut map)),
        NodeKind::Chunk => NodeData::Chunk(ChunkAttrs {
            text: take_str(&mut map, "text").unwrap_or_default(),
            context: take_str(&mut map, "context"),
            paragraph: take_str(&mut map, "paragraph"),
            title: take_str(&mut map, "title"),
            section_type: take_str(&mut map, "section_type"),
            rules: take_rules(&mut map),
        }),
        NodeKind::ExternalStub => NodeData::ExternalStub(StubAttrs {
            title: take_str(&mut map, "title"),
            kuerzel: take_str(&mut map, "kuerzel"),
        }),
    };

    Ok(Node {
        id,
        data,
        extra: map,
    })
}

fn take_document(map: &mut Map<String, Value>) -> DocumentAttrs {
    DocumentAttrs {
        title: take_str(map, "title"),
        doc_title: take_str(map, "doc_title"),
        kuerzel: take_str(map, "kuerzel"),
        category: take_str(map, "category"),
        ministry: take_str(map, "ministerium"),
        publisher: take_str(map, "herausgeber"),
        as_of: take_str(map, "stand"),
        url: take_str(map, "url"),
        source: take_str(map, "source"),
    }
}

fn put(map: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        map.insert(key.to_string(), Value::String(v.clone()));
    }
}

fn node_to_value(node: &Node) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), Value::String(node.id.clone()));
    map.insert("type".into(), Value::String(node.kind().as_str().to_string()));
    match &node.data {
        NodeData::Document(d) | NodeData::Law(d) => {
            put(&mut map, "title", &d.title);
            put(&mut map, "doc_title", &d.doc_title);
            put(&mut map, "kuerzel", &d.kuerzel);
            put(&mut map, "category", &d.category);
            put(&mut map, "ministerium", &d.ministry);
            put(&mut map, "herausgeber", &d.publisher);
            put(&mut map, "stand", &d.as_of);
            put(&mut map, "url", &d.url);
            put(&mut map, "source", &d.source);
        }
        NodeData::Chunk(c) => {
            map.insert("text".into(), Value::String(c.text.clone()));
            put(&mut map, "context", &c.context);
            put(&mut map, "paragraph", &c.paragraph);
            put(&mut map, "title", &c.title);
            put(&mut map, "section_type", &c.section_type);
            if !c.rules.is_empty() {
                let rules = c.rules.iter().map(ExtractedRule::to_value).collect();
                map.insert("rules".into(), Value::Array(rules));
            }
        }
        NodeData::ExternalStub(s) => {
            put(&mut map, "title", &s.title);
            put(&mut map, "kuerzel", &s.kuerzel);
        }
    }
    for (k, v) in &node.extra {
        map.insert(k.clone(), v.clone());
    }
    Value::Object(map)
}

fn edge_from_value(value: Value) -> Result<Edge, PersistenceError> {
    let Value::Object(mut map) = value else {
        return Err(malformed("edge entry is not an object"));
    };
    let source =
        id_string(map.remove("source")).ok_or_else(|| malformed("edge without a source"))?;
    let target =
        id_string(map.remove("target")).ok_or_else(|| malformed("edge without a target"))?;
    let relation = take_str(&mut map, "relation")
        .map(|r| Relation::parse(&r))
        .unwrap_or_else(|| Relation::Other(String::new()));
    Ok(Edge {
        source,
        target,
        relation,
        extra: map,
    })
}

fn edge_to_value(edge: &Edge) -> Value {
    let mut map = Map::new();
    map.insert("source".into(), Value::String(edge.source.clone()));
    map.insert("target".into(), Value::String(edge.target.clone()));
    if !edge.relation.as_str().is_empty() {
        map.insert(
            "relation".into(),
            Value::String(edge.relation.as_str().to_string()),
        );
    }
    for (k, v) in &edge.extra {
        map.insert(k.clone(), v.clone());
    }
    Value::Object(map)
}
