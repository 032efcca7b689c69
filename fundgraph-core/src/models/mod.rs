mod citation;
mod compliance;
mod degradation_event;
mod edge;
mod graph_document;
mod law_section;
mod node;
mod search;
mod vector;

pub use citation::{has_year_marker, Citation, CitationKind, Span};
pub use compliance::{ComplianceContext, MappedRegulation, MappedRule};
pub use degradation_event::DegradationEvent;
pub use edge::{Edge, Relation};
pub use graph_document::GraphDocument;
pub use law_section::LawSection;
pub use node::{
    ChunkAttrs, DocumentAttrs, Extensions, ExtractedRule, Node, NodeData, NodeKind, StubAttrs,
    SECTION_TYPE_LAW,
};
pub use search::{
    DocumentMetadata, NeighborContext, NeighborKind, ScoreBreakdown, SearchFilters,
    SearchRequest, SearchResult,
};
pub use vector::{VectorFilter, VectorMetadata, VectorQueryResult, VectorRecord};
