//! Batch passes that derive edges from node metadata.

mod equivalence;
mod supersession;

pub use equivalence::link_equivalents;
pub use supersession::{extract_title_date, link_supersessions, DEFAULT_VERSION_FAMILIES};
