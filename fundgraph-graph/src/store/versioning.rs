//! Version-family resolution over `SUPERSEDES` edges (newer → older).

use std::collections::{HashMap, HashSet, VecDeque};

use fundgraph_core::models::Relation;

use super::GraphStore;

impl GraphStore {
    /// The node superseding `id`: the source of the first incoming
    /// `SUPERSEDES` edge, ignoring self-loops.
    pub fn newer_version(&self, id: &str) -> Option<&str> {
        self.in_edges(id)
            .find(|e| e.relation == Relation::Supersedes && e.source != id)
            .map(|e| e.source.as_str())
    }

    /// Follow `newer_version` until a node nothing supersedes.
    ///
    /// When the walk runs into a `SUPERSEDES` cycle, the smallest id on that
    /// cycle is returned, so every start point that reaches the cycle agrees
    /// and `latest_version(latest_version(x)) == latest_version(x)`.
    /// Unknown ids resolve to themselves.
    pub fn latest_version(&self, id: &str) -> String {
        let Some(start) = self.node(id) else {
            return id.to_string();
        };
        let mut path: Vec<&str> = vec![start.id.as_str()];
        let mut position: HashMap<&str, usize> = HashMap::from([(start.id.as_str(), 0)]);
        let mut current = start.id.as_str();

        while let Some(newer) = self.newer_version(current) {
            if let Some(&at) = position.get(newer) {
                let cycle = &path[at..];
                return cycle
                    .iter()
                    .min()
                    .copied()
                    .unwrap_or(newer)
                    .to_string();
            }
            position.insert(newer, path.len());
            path.push(newer);
            current = newer;
        }
        current.to_string()
    }

    /// All ids reachable over `SUPERSEDES` edges in either direction,
    /// including `id` itself.
    pub fn family_set(&self, id: &str) -> HashSet<String> {
        let mut family: HashSet<String> = HashSet::from([id.to_string()]);
        let mut queue: VecDeque<String> = VecDeque::from([id.to_string()]);

        while let Some(current) = queue.pop_front() {
            let newer = self
                .in_edges(&current)
                .filter(|e| e.relation == Relation::Supersedes)
                .map(|e| &e.source);
            let older = self
                .out_edges(&current)
                .filter(|e| e.relation == Relation::Supersedes)
                .map(|e| &e.target);
            for next in newer.chain(older) {
                if family.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }
        family
    }

    /// Documents that directly supersede `doc_id`, in edge order.
    pub fn superseded_by(&self, doc_id: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in self.in_edges(doc_id) {
            if e.relation == Relation::Supersedes
                && e.source != doc_id
                && !out.contains(&e.source.as_str())
            {
                out.push(&e.source);
            }
        }
        out
    }
}
