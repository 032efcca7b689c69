//! # fundgraph-compliance
//!
//! Context-aware compliance mapping. Free-text segments are scanned for law
//! and regulation citations (explicit matches) and for concept-map keywords
//! (implicit matches); matches are resolved against the regulation graph,
//! upgraded to the newest version of their family, aggregated per document,
//! and returned with the document's rules.
//!
//! ## Architecture
//!
//! ```text
//! ComplianceMapper
//! ├── CitationExtractor (explicit pass, negation-aware)
//! ├── ConceptMap (implicit pass)
//! ├── resolver (abbreviation → node scoring)
//! ├── Registry (per-title aggregation, exclusion and priority rules)
//! ├── rules (rule collection per document)
//! └── OnDemandImporter (optional)
//!     ├── ILawFetcher (under a deadline)
//!     ├── GraphManager::write (law node, sections, REFERENCES relinking)
//!     └── IChunkIndexer (optional re-indexing)
//! ```

pub mod concepts;
pub mod mapper;
pub mod on_demand;
pub mod resolver;

pub use concepts::ConceptMap;
pub use mapper::{ComplianceMapper, MatchKind};
pub use on_demand::{clean_abbreviation, OnDemandImporter};
