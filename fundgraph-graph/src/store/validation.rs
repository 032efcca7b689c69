//! Structural checks: chunk ownership and `SUPERSEDES` acyclicity.

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;

use fundgraph_core::errors::GraphError;
use fundgraph_core::models::Relation;

use super::GraphStore;

/// Outcome of [`GraphStore::validate`].
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Chunks without exactly one `HAS_CHUNK` parent.
    pub chunk_violations: Vec<GraphError>,
    /// `SUPERSEDES` cycles, one error per strongly connected component.
    pub supersession_cycles: Vec<GraphError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.chunk_violations.is_empty() && self.supersession_cycles.is_empty()
    }

    pub fn into_errors(self) -> Vec<GraphError> {
        self.chunk_violations
            .into_iter()
            .chain(self.supersession_cycles)
            .collect()
    }
}

impl GraphStore {
    /// Check the structural invariants of the whole graph.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        for node in self.nodes().filter(|n| n.is_chunk()) {
            if let Err(e @ GraphError::ChunkParentInvariant { .. }) = self.owning_document(&node.id)
            {
                report.chunk_violations.push(e);
            }
        }

        let mut supersedes: DiGraph<usize, ()> = DiGraph::new();
        let indices: Vec<_> = (0..self.node_count())
            .map(|slot| supersedes.add_node(slot))
            .collect();
        for (s, t, relation) in self.endpoints() {
            if *relation == Relation::Supersedes {
                supersedes.update_edge(indices[s], indices[t], ());
            }
        }
        for scc in tarjan_scc(&supersedes) {
            let is_cycle = scc.len() > 1
                || scc
                    .first()
                    .is_some_and(|&n| supersedes.find_edge(n, n).is_some());
            if is_cycle {
                let mut ids: Vec<&str> = scc.iter().map(|&n| self.id_at(supersedes[n])).collect();
                ids.sort_unstable();
                report.supersession_cycles.push(GraphError::SupersessionCycle {
                    path: ids.join(" -> "),
                });
            }
        }

        report
    }
}
