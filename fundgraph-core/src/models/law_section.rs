use serde::{Deserialize, Serialize};

/// One section of a statute as returned by the law crawler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LawSection {
    /// `§ 1`, `Art. 3`, or empty for preambles.
    #[serde(default)]
    pub paragraph: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}
