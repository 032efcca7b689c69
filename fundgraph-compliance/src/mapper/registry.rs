use std::collections::{BTreeSet, HashMap, HashSet};

use fundgraph_core::constants::{PRIORITY_EXPLICIT, PRIORITY_IMPLICIT};
use fundgraph_graph::GraphStore;

/// How a regulation was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Cited in the text.
    Explicit,
    /// Implied by a concept-map keyword.
    Implicit,
}

impl MatchKind {
    pub fn priority(&self) -> u8 {
        match self {
            Self::Explicit => PRIORITY_EXPLICIT,
            Self::Implicit => PRIORITY_IMPLICIT,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Explicit => "Explicit provisions (cited)",
            Self::Implicit => "Implicit expansion (expertise)",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Registration {
    pub doc_id: String,
    pub title: String,
    pub kind: MatchKind,
    pub hit_count: usize,
    pub found_in_chunks: BTreeSet<usize>,
}

/// Per-request aggregation keyed by resolved document title, in first
/// registration order.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: Vec<Registration>,
    by_title: HashMap<String, usize>,
}

impl Registry {
    /// Count a hit for `doc_id` from input chunk `chunk`. Unknown ids and
    /// documents whose version family is in `excluded` are ignored; a higher
    /// priority upgrades the category, a lower one never downgrades it.
    pub fn register(
        &mut self,
        store: &GraphStore,
        doc_id: &str,
        target: &str,
        kind: MatchKind,
        chunk: usize,
        excluded: &HashSet<String>,
    ) -> bool {
        let Some(node) = store.node(doc_id) else {
            return false;
        };
        if store.family_set(doc_id).iter().any(|f| excluded.contains(f)) {
            return false;
        }
        let title = node.display_title().unwrap_or(target).to_string();

        let slot = match self.by_title.get(&title) {
            Some(&slot) => slot,
            None => {
                self.entries.push(Registration {
                    doc_id: doc_id.to_string(),
                    title: title.clone(),
                    kind,
                    hit_count: 0,
                    found_in_chunks: BTreeSet::new(),
                });
                self.by_title.insert(title, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[slot];
        entry.hit_count += 1;
        entry.found_in_chunks.insert(chunk);
        if kind.priority() > entry.kind.priority() {
            entry.kind = kind;
        }
        true
    }

    pub fn into_entries(self) -> Vec<Registration> {
        self.entries
    }
}
