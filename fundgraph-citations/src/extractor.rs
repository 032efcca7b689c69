use fundgraph_core::constants::NEGATION_WINDOW_CHARS;
use fundgraph_core::models::{Citation, CitationKind, Span};
use regex::Captures;

use crate::negation::is_negated;
use crate::patterns::{self, CitationPattern};

/// Extracts law and regulation citations from free text.
///
/// Law citations are reported before regulation codes, each family in
/// text order. A pattern that failed to compile contributes no matches.
#[derive(Debug, Clone)]
pub struct CitationExtractor {
    window: usize,
}

impl CitationExtractor {
    pub fn new() -> Self {
        Self {
            window: NEGATION_WINDOW_CHARS,
        }
    }

    /// Extractor with a custom negation window (in characters).
    pub fn with_window(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn extract(&self, text: &str) -> Vec<Citation> {
        let mut citations = Vec::new();
        for pattern in patterns::all_patterns() {
            self.collect(text, &pattern, &mut citations);
        }
        if !citations.is_empty() {
            tracing::debug!(
                citations = citations.len(),
                excluded = citations.iter().filter(|c| c.is_excluded).count(),
                "citations extracted"
            );
        }
        citations
    }

    /// Names of patterns whose regex failed to compile.
    pub fn failed_patterns(&self) -> Vec<&'static str> {
        patterns::all_patterns()
            .into_iter()
            .filter(|p| p.regex.is_none())
            .map(|p| p.name)
            .collect()
    }

    fn collect(&self, text: &str, pattern: &CitationPattern, out: &mut Vec<Citation>) {
        let Some(re) = pattern.regex.as_ref() else {
            return;
        };
        for caps in re.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let parsed = match pattern.kind {
                CitationKind::Law => law_target(&caps),
                CitationKind::Regulation => regulation_target(&caps),
            };
            let Some((target, section)) = parsed else {
                continue;
            };
            let span = Span {
                start: whole.start(),
                end: whole.end(),
            };
            out.push(Citation {
                kind: pattern.kind,
                target,
                section,
                text: whole.as_str().to_string(),
                span,
                is_excluded: is_negated(text, span, self.window),
            });
        }
    }
}

impl Default for CitationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn law_target(caps: &Captures<'_>) -> Option<(String, Option<String>)> {
    let law = caps.name("law")?.as_str().to_string();
    let section = caps.name("section").map(|m| m.as_str().to_string());
    Some((law, section))
}

/// Regulation code with a trailing `-` trimmed and the year appended.
fn regulation_target(caps: &Captures<'_>) -> Option<(String, Option<String>)> {
    let code = caps.name("regulation")?.as_str().trim_end_matches('-');
    if code.is_empty() {
        return None;
    }
    let target = match caps.name("year") {
        Some(year) => format!("{code} {}", year.as_str()),
        None => code.to_string(),
    };
    Some((target, None))
}
