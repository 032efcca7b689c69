pub mod law;
pub mod regulation;

use std::sync::LazyLock;

use fundgraph_core::models::CitationKind;
use regex::Regex;

/// A compiled citation pattern.
pub struct CitationPattern {
    pub name: &'static str,
    pub kind: CitationKind,
    pub regex: &'static LazyLock<Option<Regex>>,
}

/// All citation patterns, laws first.
pub fn all_patterns() -> Vec<CitationPattern> {
    vec![
        CitationPattern {
            name: "law_section",
            kind: CitationKind::Law,
            regex: &law::RE_LAW_SECTION,
        },
        CitationPattern {
            name: "regulation_code",
            kind: CitationKind::Regulation,
            regex: &regulation::RE_REGULATION,
        },
    ]
}
