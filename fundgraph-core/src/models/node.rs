//! Graph nodes: a tagged struct per kind plus an extension map for
//! passthrough metadata the core does not interpret.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Passthrough attributes preserved verbatim through load/save.
pub type Extensions = Map<String, Value>;

/// The four node kinds of the regulation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A funding guideline or regulation document.
    Document,
    /// A statute (BHO, VwVfG, AtG, ...).
    Law,
    /// A paragraph-sized unit of text owned by a document or law.
    Chunk,
    /// Placeholder for a cited law that has not been ingested yet.
    ExternalStub,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Law => "law",
            Self::Chunk => "chunk",
            Self::ExternalStub => "external_stub",
        }
    }

    /// Parse a node-link `type` / `node_type` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "document" | "guideline" => Some(Self::Document),
            "law" | "regulation" => Some(Self::Law),
            "chunk" => Some(Self::Chunk),
            "external_stub" | "external" | "stub" => Some(Self::ExternalStub),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule pre-extracted from a chunk by the ingestion pipeline.
///
/// The typed fields are a view over the entry as it was read. Writing a
/// rule back starts from that entry and only overlays fields that were
/// changed in code, so null values, keys the core does not model and
/// entries that are not objects at all survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedRule {
    /// Vergabe, Bericht, Ausgaben, Formular, ...
    pub category: String,
    pub rule: String,
    /// Threshold or deadline, if the rule carries one.
    pub value: Option<Value>,
    raw: Value,
}

impl ExtractedRule {
    pub fn new(category: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            rule: rule.into(),
            value: None,
            raw: Value::Null,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Read one entry of a chunk's `rules` array. Never fails: missing or
    /// non-string fields read as empty, and a JSON `null` value as `None`.
    pub fn from_value(raw: Value) -> Self {
        let (category, rule, value) = match &raw {
            Value::Object(map) => (
                str_field(map, "category"),
                str_field(map, "rule"),
                value_field(map),
            ),
            _ => (String::new(), String::new(), None),
        };
        Self {
            category,
            rule,
            value,
            raw,
        }
    }

    /// False for entries that were read from something other than an
    /// object; they carry no rule and are only kept for writing back.
    pub fn is_structured(&self) -> bool {
        matches!(self.raw, Value::Object(_) | Value::Null)
    }

    pub fn to_value(&self) -> Value {
        let mut map = match &self.raw {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other if self.is_unchanged() => return other.clone(),
            _ => Map::new(),
        };
        let read = Self::from_value(Value::Object(map.clone()));
        let fresh = self.raw.is_null();
        if fresh || self.category != read.category {
            map.insert("category".into(), Value::String(self.category.clone()));
        }
        if fresh || self.rule != read.rule {
            map.insert("rule".into(), Value::String(self.rule.clone()));
        }
        if self.value != read.value {
            match &self.value {
                Some(v) => map.insert("value".into(), v.clone()),
                None => map.remove("value"),
            };
        }
        Value::Object(map)
    }

    fn is_unchanged(&self) -> bool {
        self.category.is_empty() && self.rule.is_empty() && self.value.is_none()
    }
}

fn str_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn value_field(map: &Map<String, Value>) -> Option<Value> {
    map.get("value").filter(|v| !v.is_null()).cloned()
}

impl Serialize for ExtractedRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExtractedRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Attributes of document and law nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentAttrs {
    pub title: Option<String>,
    pub doc_title: Option<String>,
    /// Abbreviation ("Kürzel"), e.g. `BNBest-P`.
    pub kuerzel: Option<String>,
    pub category: Option<String>,
    /// Issuing ministry ("Ministerium").
    pub ministry: Option<String>,
    /// Publisher ("Herausgeber").
    pub publisher: Option<String>,
    /// As-of date ("Stand").
    pub as_of: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
}

/// Attributes of chunk nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkAttrs {
    pub text: String,
    /// Structural context string (breadcrumbs).
    pub context: Option<String>,
    pub paragraph: Option<String>,
    pub title: Option<String>,
    /// `law_section` for chunks of statutes.
    pub section_type: Option<String>,
    pub rules: Vec<ExtractedRule>,
}

/// Attributes of external stubs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StubAttrs {
    pub title: Option<String>,
    pub kuerzel: Option<String>,
}

/// Kind-specific node payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Document(DocumentAttrs),
    Law(DocumentAttrs),
    Chunk(ChunkAttrs),
    ExternalStub(StubAttrs),
}

/// A node of the regulation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub data: NodeData,
    pub extra: Extensions,
}

pub const SECTION_TYPE_LAW: &str = "law_section";

impl Node {
    pub fn document(id: impl Into<String>, attrs: DocumentAttrs) -> Self {
        Self {
            id: id.into(),
            data: NodeData::Document(attrs),
            extra: Extensions::new(),
        }
    }

    pub fn law(id: impl Into<String>, attrs: DocumentAttrs) -> Self {
        Self {
            id: id.into(),
            data: NodeData::Law(attrs),
            extra: Extensions::new(),
        }
    }

    pub fn chunk(id: impl Into<String>, attrs: ChunkAttrs) -> Self {
        Self {
            id: id.into(),
            data: NodeData::Chunk(attrs),
            extra: Extensions::new(),
        }
    }

    pub fn stub(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: NodeData::ExternalStub(StubAttrs::default()),
            extra: Extensions::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Document(_) => NodeKind::Document,
            NodeData::Law(_) => NodeKind::Law,
            NodeData::Chunk(_) => NodeKind::Chunk,
            NodeData::ExternalStub(_) => NodeKind::ExternalStub,
        }
    }

    pub fn is_chunk(&self) -> bool {
        matches!(self.data, NodeData::Chunk(_))
    }

    /// Document or law node (the things that own chunks).
    pub fn is_document_like(&self) -> bool {
        matches!(self.data, NodeData::Document(_) | NodeData::Law(_))
    }

    /// Law node, or a node tagged `node_type: law` by older ingestion runs.
    pub fn is_law(&self) -> bool {
        matches!(self.data, NodeData::Law(_))
            || self
                .extra
                .get("node_type")
                .and_then(Value::as_str)
                .and_then(NodeKind::from_tag)
                == Some(NodeKind::Law)
    }

    pub fn as_document(&self) -> Option<&DocumentAttrs> {
        match &self.data {
            NodeData::Document(d) | NodeData::Law(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_chunk(&self) -> Option<&ChunkAttrs> {
        match &self.data {
            NodeData::Chunk(c) => Some(c),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match &self.data {
            NodeData::Document(d) | NodeData::Law(d) => d.title.as_deref(),
            NodeData::Chunk(c) => c.title.as_deref(),
            NodeData::ExternalStub(s) => s.title.as_deref(),
        }
    }

    /// `doc_title`, falling back to `title`.
    pub fn display_title(&self) -> Option<&str> {
        self.as_document()
            .and_then(|d| d.doc_title.as_deref())
            .or_else(|| self.title())
    }

    pub fn kuerzel(&self) -> Option<&str> {
        match &self.data {
            NodeData::Document(d) | NodeData::Law(d) => d.kuerzel.as_deref(),
            NodeData::ExternalStub(s) => s.kuerzel.as_deref(),
            NodeData::Chunk(_) => None,
        }
    }

    /// Raw chunk text; empty for non-chunks.
    pub fn text(&self) -> &str {
        match &self.data {
            NodeData::Chunk(c) => &c.text,
            _ => "",
        }
    }

    /// Strings an abbreviation lookup may match: id, kürzel, titles.
    pub fn lookup_candidates(&self) -> Vec<&str> {
        let mut out = vec![self.id.as_str()];
        out.extend(self.kuerzel());
        out.extend(self.title());
        if let Some(dt) = self.as_document().and_then(|d| d.doc_title.as_deref()) {
            out.push(dt);
        }
        out
    }

    /// Merge `other` into this node in place: identity stays, set fields of
    /// `other` win, extension keys are unioned. A stub adopts the payload of
    /// a richer node.
    pub fn merge_from(&mut self, other: Node) {
        match (&mut self.data, other.data) {
            (NodeData::ExternalStub(stub), NodeData::ExternalStub(new)) => {
                stub.title = new.title.or(stub.title.take());
                stub.kuerzel = new.kuerzel.or(stub.kuerzel.take());
            }
            (NodeData::ExternalStub(stub), richer) => {
                let (title, kuerzel) = (stub.title.take(), stub.kuerzel.take());
                self.data = richer;
                if let NodeData::Document(d) | NodeData::Law(d) = &mut self.data {
                    d.title = d.title.take().or(title);
                    d.kuerzel = d.kuerzel.take().or(kuerzel);
                }
            }
            (NodeData::Document(cur) | NodeData::Law(cur), NodeData::Document(new) | NodeData::Law(new)) => {
                merge_document(cur, new);
            }
            (NodeData::Chunk(cur), NodeData::Chunk(new)) => {
                if !new.text.is_empty() {
                    cur.text = new.text;
                }
                cur.context = new.context.or(cur.context.take());
                cur.paragraph = new.paragraph.or(cur.paragraph.take());
                cur.title = new.title.or(cur.title.take());
                cur.section_type = new.section_type.or(cur.section_type.take());
                if !new.rules.is_empty() {
                    cur.rules = new.rules;
                }
            }
            (_, replacement) => self.data = replacement,
        }
        for (k, v) in other.extra {
            self.extra.insert(k, v);
        }
    }
}

fn merge_document(cur: &mut DocumentAttrs, new: DocumentAttrs) {
    cur.title = new.title.or(cur.title.take());
    cur.doc_title = new.doc_title.or(cur.doc_title.take());
    cur.kuerzel = new.kuerzel.or(cur.kuerzel.take());
    cur.category = new.category.or(cur.category.take());
    cur.ministry = new.ministry.or(cur.ministry.take());
    cur.publisher = new.publisher.or(cur.publisher.take());
    cur.as_of = new.as_of.or(cur.as_of.take());
    cur.url = new.url.or(cur.url.take());
    cur.source = new.source.or(cur.source.take());
}
