//! ComplianceMapper: maps text segments to the regulations that govern them.

mod registry;
pub mod rules;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use fundgraph_citations::CitationExtractor;
use fundgraph_core::config::{ComplianceConfig, FundGraphConfig};
use fundgraph_core::models::{ComplianceContext, MappedRegulation, MappedRule};
use fundgraph_graph::{GraphManager, GraphSnapshot, GraphStore};
use fundgraph_observability::{compliance_span, events};
use uuid::Uuid;

use crate::concepts::ConceptMap;
use crate::on_demand::OnDemandImporter;
use crate::resolver;

pub use registry::MatchKind;
use registry::{Registration, Registry};

pub const NO_MATCH_CATEGORY: &str = "System Information";
pub const NO_MATCH_SOURCE: &str = "Compliance Mapper";
pub const NO_MATCH_RULE_ID: &str = "info_no_match";

/// Expands free-text segments into a [`ComplianceContext`].
///
/// Citations found in the text are matched explicitly; concept-map keywords
/// add implicit matches for version families not already cited. A negated
/// citation excludes its whole version family from the result.
pub struct ComplianceMapper {
    graph: Arc<GraphManager>,
    extractor: CitationExtractor,
    concepts: ConceptMap,
    importer: Option<Arc<OnDemandImporter>>,
    on_demand: bool,
    max_rules: usize,
}

impl ComplianceMapper {
    pub fn new(graph: Arc<GraphManager>, concepts: ConceptMap, config: &ComplianceConfig) -> Self {
        Self {
            graph,
            extractor: CitationExtractor::new(),
            concepts,
            importer: None,
            on_demand: config.enable_on_demand,
            max_rules: config.max_rules_per_document,
        }
    }

    /// Mapper with the concept map read from `compliance.concepts_path`.
    pub fn from_config(graph: Arc<GraphManager>, config: &FundGraphConfig) -> Self {
        let concepts = ConceptMap::load(Path::new(&config.compliance.concepts_path));
        Self::new(graph, concepts, &config.compliance)
    }

    /// Import unknown cited laws through `importer` when on-demand
    /// enrichment is enabled.
    pub fn with_importer(mut self, importer: Arc<OnDemandImporter>) -> Self {
        self.importer = Some(importer);
        self
    }

    pub fn concepts(&self) -> &ConceptMap {
        &self.concepts
    }

    pub fn importer(&self) -> Option<&Arc<OnDemandImporter>> {
        self.importer.as_ref()
    }

    pub fn expand_context<S: AsRef<str>>(&self, label: &str, chunks: &[S]) -> ComplianceContext {
        let context_id = new_context_id();
        let _span = compliance_span!(context_id, chunks.len()).entered();

        let mut snapshot = self.graph.snapshot();
        let mut registry = Registry::default();
        let mut explicit: HashSet<String> = HashSet::new();
        let mut excluded: HashSet<String> = HashSet::new();

        for (i, chunk) in chunks.iter().enumerate() {
            for citation in self.extractor.extract(chunk.as_ref()) {
                let Some(doc_id) = self.resolve_or_import(&mut snapshot, &citation.target) else {
                    continue;
                };
                let store = snapshot.store();
                let family = store.family_set(&doc_id);

                if citation.is_excluded {
                    events::citation_excluded(&citation.target, family.len());
                    excluded.extend(family);
                    continue;
                }
                explicit.extend(family);

                let final_id = if citation.has_year_marker() {
                    doc_id
                } else {
                    store.latest_version(&doc_id)
                };
                registry.register(
                    store,
                    &final_id,
                    &citation.target,
                    MatchKind::Explicit,
                    i,
                    &excluded,
                );
            }
        }

        let store = snapshot.store();
        for (i, chunk) in chunks.iter().enumerate() {
            for (keyword, target) in self.concepts.matches(chunk.as_ref()) {
                let Some(doc_id) = resolver::resolve(store, target) else {
                    continue;
                };
                if store.family_set(&doc_id).iter().any(|f| explicit.contains(f)) {
                    continue;
                }
                let latest = store.latest_version(&doc_id);
                if registry.register(store, &latest, target, MatchKind::Implicit, i, &excluded) {
                    tracing::debug!(keyword, target, doc_id = %latest, "implicit match");
                }
            }
        }

        // A later negation also removes families registered before it.
        let entries: Vec<Registration> = registry
            .into_entries()
            .into_iter()
            .filter(|e| !store.family_set(&e.doc_id).iter().any(|f| excluded.contains(f)))
            .collect();
        let matched = entries.len();

        let mapped_regulations = if entries.is_empty() {
            vec![no_match()]
        } else {
            entries
                .into_iter()
                .map(|e| self.finalize(store, e))
                .collect()
        };

        events::compliance_mapped(&context_id, chunks.len(), matched);
        ComplianceContext {
            compliance_context_id: context_id,
            context_label: label.to_string(),
            mapped_regulations,
        }
    }

    /// Resolve a cited target, importing it when it is unknown. A
    /// successful import refreshes `snapshot`.
    fn resolve_or_import(&self, snapshot: &mut Arc<GraphSnapshot>, target: &str) -> Option<String> {
        if let Some(id) = resolver::resolve(snapshot.store(), target) {
            return Some(id);
        }
        if !self.on_demand {
            return None;
        }
        let importer = self.importer.as_ref()?;
        let id = importer.import(target)?;
        *snapshot = self.graph.snapshot();
        Some(id)
    }

    fn finalize(&self, store: &GraphStore, entry: Registration) -> MappedRegulation {
        let found_in = entry.found_in_chunks.len();
        let mut rules = rules::collect_rules(store, &entry.doc_id, self.max_rules);
        if rules.is_empty() {
            rules.push(MappedRule {
                rule_id: format!("ref_{}", entry.doc_id),
                content: format!("Regulation {} is relevant.", entry.title),
                relevance_reason: entry.kind.label().to_string(),
            });
        } else if found_in > 1 {
            let suffix = format!(" (found in {found_in} segments)");
            for rule in &mut rules {
                rule.relevance_reason.push_str(&suffix);
            }
        }

        let is_newly_crawled = self
            .importer
            .as_ref()
            .map_or(false, |i| i.is_newly_crawled(&entry.doc_id));
        MappedRegulation {
            category: entry.kind.label().to_string(),
            source_doc: entry.title,
            doc_id: Some(entry.doc_id),
            rules,
            hit_count: entry.hit_count,
            found_in_chunks: entry.found_in_chunks.into_iter().collect(),
            is_newly_crawled,
        }
    }
}

fn new_context_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("ctx_{}", &hex[..8])
}

fn no_match() -> MappedRegulation {
    MappedRegulation {
        category: NO_MATCH_CATEGORY.to_string(),
        source_doc: NO_MATCH_SOURCE.to_string(),
        doc_id: None,
        rules: vec![MappedRule {
            rule_id: NO_MATCH_RULE_ID.to_string(),
            content: "No explicit or implicit rules found.".to_string(),
            relevance_reason: "Analysis result".to_string(),
        }],
        hit_count: 0,
        found_in_chunks: Vec::new(),
        is_newly_crawled: false,
    }
}
