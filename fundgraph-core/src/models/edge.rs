use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::node::Extensions;

/// Typed edge relation.
///
/// Relations the core does not know are carried through as `Other` so a
/// load/save cycle never drops them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    /// document → chunk
    HasChunk,
    /// chunk/document → law/document/stub
    References,
    /// newer document → older document
    Supersedes,
    /// symmetric; stored as two directed edges
    EquivalentTo,
    Other(String),
}

impl Relation {
    /// Relations followed by k-hop expansion when the caller names none.
    pub const TRAVERSABLE: [Relation; 4] = [
        Relation::References,
        Relation::Supersedes,
        Relation::HasChunk,
        Relation::EquivalentTo,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::HasChunk => "HAS_CHUNK",
            Self::References => "REFERENCES",
            Self::Supersedes => "SUPERSEDES",
            Self::EquivalentTo => "EQUIVALENT_TO",
            Self::Other(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "HAS_CHUNK" => Self::HasChunk,
            "REFERENCES" => Self::References,
            "SUPERSEDES" => Self::Supersedes,
            "EQUIVALENT_TO" => Self::EquivalentTo,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Relation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

/// A directed, typed edge. Parallel edges between the same pair are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relation: Relation,
    /// Edge metadata (`key`, citation text, ...), preserved verbatim.
    pub extra: Extensions,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, relation: Relation) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation,
            extra: Extensions::new(),
        }
    }
}
