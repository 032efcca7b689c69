//! On-demand import of statutes that are cited but not in the graph.
//!
//! The only write path reachable from a compliance request. Imports are
//! serialized on a process-wide lock and persisted through
//! [`GraphManager::write`], so concurrent requests citing the same missing
//! law import it once and never interleave reloads.

pub mod law_nodes;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use dashmap::DashSet;
use fundgraph_citations::CitationExtractor;
use fundgraph_core::config::ComplianceConfig;
use fundgraph_core::deadline::run_with_deadline;
use fundgraph_core::errors::ComplianceError;
use fundgraph_core::models::{LawSection, Node};
use fundgraph_core::traits::{IChunkIndexer, ILawFetcher};
use fundgraph_graph::GraphManager;
use fundgraph_observability::{events, import_span};

/// Shortest and longest accepted abbreviation, in characters.
const MIN_ABBREVIATION_CHARS: usize = 2;
const MAX_ABBREVIATION_CHARS: usize = 10;

/// Normalize a citation target to an importable abbreviation: trimmed and
/// upper-cased, 2 to 10 characters of letters, digits, or `/`.
pub fn clean_abbreviation(target: &str) -> Option<String> {
    let abbreviation = target.trim().to_uppercase();
    let len = abbreviation.chars().count();
    if !(MIN_ABBREVIATION_CHARS..=MAX_ABBREVIATION_CHARS).contains(&len) {
        return None;
    }
    let alphabetic = abbreviation.chars().all(char::is_alphabetic);
    let plain = abbreviation
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '/');
    (alphabetic || plain).then_some(abbreviation)
}

/// Crawls and imports missing laws through an [`ILawFetcher`].
pub struct OnDemandImporter {
    graph: Arc<GraphManager>,
    fetcher: Arc<dyn ILawFetcher>,
    indexer: Option<Arc<dyn IChunkIndexer>>,
    extractor: CitationExtractor,
    timeout: Duration,
    /// Abbreviations that failed once; never retried.
    failed: DashSet<String>,
    /// Law ids imported by this importer.
    imported: DashSet<String>,
    import_lock: Mutex<()>,
}

impl OnDemandImporter {
    pub fn new(
        graph: Arc<GraphManager>,
        fetcher: Arc<dyn ILawFetcher>,
        config: &ComplianceConfig,
    ) -> Self {
        Self {
            graph,
            fetcher,
            indexer: None,
            extractor: CitationExtractor::new(),
            timeout: Duration::from_millis(config.crawl_timeout_ms),
            failed: DashSet::new(),
            imported: DashSet::new(),
            import_lock: Mutex::new(()),
        }
    }

    /// Push imported chunks into a dense backend after each import.
    pub fn with_indexer(mut self, indexer: Arc<dyn IChunkIndexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Import the law cited as `target`. Returns the law node id, or `None`
    /// when the target is not abbreviation-shaped, failed before, or fails
    /// now. Failures are cached.
    pub fn import(&self, target: &str) -> Option<String> {
        let abbreviation = clean_abbreviation(target)?;
        if self.failed.contains(&abbreviation) {
            tracing::debug!(abbreviation = %abbreviation, "skipping previously failed import");
            return None;
        }

        let _span = import_span!(abbreviation).entered();
        let _guard = self
            .import_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Re-check under the lock: a concurrent request may have finished.
        if self.failed.contains(&abbreviation) {
            return None;
        }
        let law_id = law_nodes::law_id(&abbreviation);
        if self
            .graph
            .snapshot()
            .store()
            .node(&law_id)
            .is_some_and(Node::is_law)
        {
            return Some(law_id);
        }

        events::on_demand_import_started(&abbreviation);
        match self.try_import(&abbreviation) {
            Ok(sections) => {
                events::on_demand_import_succeeded(&abbreviation, &law_id, sections);
                self.imported.insert(law_id.clone());
                Some(law_id)
            }
            Err(e) => {
                events::on_demand_import_failed(&abbreviation, &e.to_string());
                self.failed.insert(abbreviation);
                None
            }
        }
    }

    /// Fetch, persist, relink, reload, and re-index. Returns the number of
    /// imported sections.
    fn try_import(&self, abbreviation: &str) -> Result<usize, ComplianceError> {
        let sections = self.fetch(abbreviation)?;
        if sections.is_empty() {
            return Err(ComplianceError::EmptyFetch {
                abbreviation: abbreviation.to_string(),
            });
        }

        let extractor = &self.extractor;
        let (chunks, linked) = self
            .graph
            .write(|store| {
                let chunks = law_nodes::insert_law(store, abbreviation, &sections);
                let law_id = law_nodes::law_id(abbreviation);
                let linked = law_nodes::link_citing_chunks(store, extractor, &law_id, abbreviation);
                Ok((chunks, linked))
            })
            .map_err(|e| ComplianceError::GraphWriteFailed {
                abbreviation: abbreviation.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(
            abbreviation = %abbreviation,
            chunks = chunks.len(),
            references = linked,
            "imported law persisted"
        );

        self.reindex(&chunks);
        Ok(sections.len())
    }

    fn fetch(&self, abbreviation: &str) -> Result<Vec<LawSection>, ComplianceError> {
        let fetcher = Arc::clone(&self.fetcher);
        let lower = abbreviation.to_lowercase();
        run_with_deadline(self.timeout, "fetch_law", move || fetcher.fetch_law(&lower)).map_err(
            |e| ComplianceError::FetchFailed {
                abbreviation: abbreviation.to_string(),
                reason: e.to_string(),
            },
        )?
    }

    /// Re-index failures leave the graph import in place.
    fn reindex(&self, chunks: &[Node]) {
        let Some(indexer) = &self.indexer else {
            return;
        };
        if let Err(e) = indexer.index_chunks(chunks) {
            let err = ComplianceError::ReindexFailed {
                count: chunks.len(),
                reason: e.to_string(),
            };
            tracing::error!(error = %err, "imported chunks not indexed");
        }
    }

    /// True when `doc_id` was imported by this importer.
    pub fn is_newly_crawled(&self, doc_id: &str) -> bool {
        self.imported.contains(doc_id)
    }

    pub fn has_failed(&self, target: &str) -> bool {
        clean_abbreviation(target).is_some_and(|a| self.failed.contains(&a))
    }

    /// Failed abbreviations, sorted.
    pub fn failed(&self) -> Vec<String> {
        let mut out: Vec<String> = self.failed.iter().map(|a| a.key().clone()).collect();
        out.sort();
        out
    }

    /// Imported law ids, sorted.
    pub fn imported(&self) -> Vec<String> {
        let mut out: Vec<String> = self.imported.iter().map(|a| a.key().clone()).collect();
        out.sort();
        out
    }
}
