//! Arena-backed directed multigraph with typed parallel edges.
//!
//! Nodes and edges live in vectors; lookups go through an id → slot map
//! and per-node out/in edge lists plus a per-relation index, all built at
//! load time and maintained on insert.

mod validation;
mod versioning;

use std::collections::{HashMap, HashSet};

use fundgraph_core::errors::GraphError;
use fundgraph_core::models::{Edge, Extensions, GraphDocument, Node, NodeKind, Relation};

pub use validation::ValidationReport;

/// Graph-level node-link header carried through load/save.
#[derive(Debug, Clone, PartialEq)]
struct DocumentHeader {
    directed: bool,
    multigraph: bool,
    graph: Extensions,
    legacy_links: bool,
}

impl Default for DocumentHeader {
    fn default() -> Self {
        let doc = GraphDocument::default();
        Self {
            directed: doc.directed,
            multigraph: doc.multigraph,
            graph: doc.graph,
            legacy_links: doc.legacy_links,
        }
    }
}

/// In-memory regulation graph.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    edges: Vec<Edge>,
    /// `(source slot, target slot)` per edge.
    endpoints: Vec<(usize, usize)>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
    by_relation: HashMap<Relation, Vec<usize>>,
    header: DocumentHeader,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from a node-link document. Edge endpoints missing
    /// from the node list become empty external stubs; duplicate node
    /// entries are merged.
    pub fn from_document(doc: GraphDocument) -> Self {
        let mut store = Self {
            header: DocumentHeader {
                directed: doc.directed,
                multigraph: doc.multigraph,
                graph: doc.graph,
                legacy_links: doc.legacy_links,
            },
            ..Self::default()
        };
        store.nodes.reserve(doc.nodes.len());
        store.edges.reserve(doc.edges.len());
        for node in doc.nodes {
            store.upsert_node(node);
        }
        for edge in doc.edges {
            store.add_edge(edge);
        }
        store
    }

    /// Node-link document with nodes and edges in insertion order.
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            directed: self.header.directed,
            multigraph: self.header.multigraph,
            graph: self.header.graph.clone(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            legacy_links: self.header.legacy_links,
        }
    }

    // --- Mutation ---

    /// Insert a node, or merge it into the existing node with the same id.
    /// Identity and edges of an existing node survive the merge.
    pub fn upsert_node(&mut self, node: Node) -> usize {
        if let Some(&slot) = self.node_index.get(&node.id) {
            self.nodes[slot].merge_from(node);
            return slot;
        }
        let slot = self.nodes.len();
        self.node_index.insert(node.id.clone(), slot);
        self.nodes.push(node);
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        slot
    }

    /// Append an edge. Unknown endpoints are created as external stubs.
    pub fn add_edge(&mut self, edge: Edge) -> usize {
        let source = self.ensure_node(&edge.source);
        let target = self.ensure_node(&edge.target);
        let idx = self.edges.len();
        self.out_edges[source].push(idx);
        self.in_edges[target].push(idx);
        self.by_relation
            .entry(edge.relation.clone())
            .or_default()
            .push(idx);
        self.endpoints.push((source, target));
        self.edges.push(edge);
        idx
    }

    /// Add `source -relation-> target` unless an identical typed edge exists.
    /// Returns whether an edge was added.
    pub fn add_edge_once(&mut self, source: &str, target: &str, relation: Relation) -> bool {
        if self.has_edge(source, target, Some(&relation)) {
            return false;
        }
        self.add_edge(Edge::new(source, target, relation));
        true
    }

    fn ensure_node(&mut self, id: &str) -> usize {
        match self.node_index.get(id) {
            Some(&slot) => slot,
            None => self.upsert_node(Node::stub(id)),
        }
    }

    // --- Lookup ---

    /// Nodes, external stubs included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edges, parallel edges counted separately.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Membership test by id.
    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&slot| &self.nodes[slot])
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All edges in insertion order.
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Whether a `source → target` edge exists, optionally of a given relation.
    pub fn has_edge(&self, source: &str, target: &str, relation: Option<&Relation>) -> bool {
        let (Some(&s), Some(&t)) = (self.node_index.get(source), self.node_index.get(target))
        else {
            return false;
        };
        self.out_edges[s].iter().any(|&e| {
            self.endpoints[e].1 == t && relation.map_or(true, |r| &self.edges[e].relation == r)
        })
    }

    /// Edges leaving `id` in insertion order; empty for unknown ids.
    pub fn out_edges(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.slot_edges(id, &self.out_edges)
    }

    /// Edges entering `id` in insertion order; empty for unknown ids.
    pub fn in_edges(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.slot_edges(id, &self.in_edges)
    }

    /// Incident edges: outgoing first, then incoming.
    pub fn edges(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.out_edges(id).chain(self.in_edges(id))
    }

    fn slot_edges<'a>(
        &'a self,
        id: &str,
        index: &'a [Vec<usize>],
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        let list: &[usize] = match self.node_index.get(id) {
            Some(&slot) => &index[slot],
            None => &[],
        };
        list.iter().map(move |&e| &self.edges[e])
    }

    /// Every edge of one relation type, in insertion order.
    pub fn edges_by_relation(&self, relation: &Relation) -> impl Iterator<Item = &Edge> {
        self.by_relation
            .get(relation)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&e| &self.edges[e])
    }

    /// Distinct successor ids in edge order.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        dedup(self.out_edges(id).map(|e| e.target.as_str()))
    }

    /// Distinct predecessor ids in edge order.
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        dedup(self.in_edges(id).map(|e| e.source.as_str()))
    }

    /// Multigraph degree: every incident edge counts, a self-loop twice.
    pub fn degree(&self, id: &str) -> usize {
        match self.node_index.get(id) {
            Some(&slot) => self.out_edges[slot].len() + self.in_edges[slot].len(),
            None => 0,
        }
    }

    /// Largest degree in the graph, at least 1.
    pub fn max_degree(&self) -> usize {
        (0..self.nodes.len())
            .map(|slot| self.out_edges[slot].len() + self.in_edges[slot].len())
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// The document owning a chunk through its single `HAS_CHUNK` edge.
    pub fn owning_document(&self, chunk_id: &str) -> Result<&Node, GraphError> {
        let chunk = self.node(chunk_id).ok_or_else(|| GraphError::NodeNotFound {
            id: chunk_id.to_string(),
        })?;
        if !chunk.is_chunk() {
            return Err(GraphError::UnexpectedKind {
                id: chunk_id.to_string(),
                expected: NodeKind::Chunk.to_string(),
                actual: chunk.kind().to_string(),
            });
        }
        let parents: Vec<&str> = self
            .in_edges(chunk_id)
            .filter(|e| e.relation == Relation::HasChunk)
            .map(|e| e.source.as_str())
            .collect();
        match parents.as_slice() {
            [parent] => self.node(parent).ok_or_else(|| GraphError::NodeNotFound {
                id: (*parent).to_string(),
            }),
            _ => Err(GraphError::ChunkParentInvariant {
                chunk_id: chunk_id.to_string(),
                parents: parents.len(),
            }),
        }
    }

    /// `HAS_CHUNK` children of a document in edge order.
    pub fn chunks_of(&self, doc_id: &str) -> Vec<&Node> {
        dedup(
            self.out_edges(doc_id)
                .filter(|e| e.relation == Relation::HasChunk)
                .map(|e| e.target.as_str()),
        )
        .into_iter()
        .filter_map(|id| self.node(id))
        .collect()
    }

    /// Subgraph induced by the given ids. Unknown ids are ignored.
    pub fn induced_subgraph<'a, I>(&self, ids: I) -> GraphStore
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keep: HashSet<usize> = ids
            .into_iter()
            .filter_map(|id| self.node_index.get(id).copied())
            .collect();
        let mut sub = GraphStore {
            header: self.header.clone(),
            ..GraphStore::default()
        };
        for (slot, node) in self.nodes.iter().enumerate() {
            if keep.contains(&slot) {
                sub.upsert_node(node.clone());
            }
        }
        for (idx, edge) in self.edges.iter().enumerate() {
            let (s, t) = self.endpoints[idx];
            if keep.contains(&s) && keep.contains(&t) {
                sub.add_edge(edge.clone());
            }
        }
        sub
    }

    /// Node id for a slot; used by algorithms working on slot indexes.
    pub(crate) fn id_at(&self, slot: usize) -> &str {
        &self.nodes[slot].id
    }

    pub(crate) fn slot_of(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub(crate) fn endpoints(&self) -> impl Iterator<Item = (usize, usize, &Relation)> {
        self.endpoints
            .iter()
            .zip(self.edges.iter())
            .map(|(&(s, t), e)| (s, t, &e.relation))
    }
}

fn dedup<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
