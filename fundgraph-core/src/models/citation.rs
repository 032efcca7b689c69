use serde::{Deserialize, Serialize};

/// Citation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationKind {
    /// `§ 44 BHO`, `Art. 3 GG`, ...
    Law,
    /// `BNBest-P`, `ANBest-GK`, `NKBF 98`, ...
    Regulation,
}

/// Byte range of a match in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A law or regulation citation found in free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(rename = "type")]
    pub kind: CitationKind,
    /// Law abbreviation or regulation code, year suffix included.
    pub target: String,
    /// Section number for law citations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// The matched text.
    pub text: String,
    pub span: Span,
    pub is_excluded: bool,
}

impl Citation {
    /// True when the target ends in a four-digit year or the `98` suffix.
    pub fn has_year_marker(&self) -> bool {
        has_year_marker(&self.target)
    }
}

/// `\d{4}$|98$` on the trimmed target.
pub fn has_year_marker(target: &str) -> bool {
    let t = target.trim();
    if t.ends_with("98") {
        return true;
    }
    let tail: Vec<char> = t.chars().rev().take(4).collect();
    tail.len() == 4 && tail.iter().all(|c| c.is_ascii_digit())
}
