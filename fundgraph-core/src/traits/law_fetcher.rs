use crate::errors::ComplianceError;
use crate::models::LawSection;

/// Crawl/import collaborator for statutes not yet in the graph.
pub trait ILawFetcher: Send + Sync {
    /// Fetch all sections of the law with the given lower-case abbreviation.
    fn fetch_law(&self, abbreviation: &str) -> Result<Vec<LawSection>, ComplianceError>;
}
