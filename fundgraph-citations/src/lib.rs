//! # fundgraph-citations
//!
//! Regex-driven extraction of law citations (`§ 44 BHO`, `Art. 3 GG`) and
//! funding-regulation codes (`BNBest-P`, `ANBest-GK`, `NKBF 98`) from free
//! text, with a character window around each match scanned for negation
//! phrases. Extraction never fails: text that matches nothing yields an
//! empty list.

mod extractor;
pub mod negation;
pub mod patterns;

pub use extractor::CitationExtractor;
pub use negation::{is_negated, NEGATION_PHRASES};
