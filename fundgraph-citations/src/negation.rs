//! Negation window around a citation.

use fundgraph_core::models::Span;

/// Lower-cased phrases that turn a citation into an exclusion.
pub const NEGATION_PHRASES: &[&str] = &[
    "findet keine anwendung",
    "finden keine anwendung",
    "keine anwendung",
    "gilt nicht",
    "gelten nicht",
    "abweichend von",
    "ausgeschlossen",
    "nicht maßgebend",
    "nicht anzuwenden",
    "nicht anwendbar",
    "nicht bestandteil",
];

/// Whether a negation phrase occurs within `window` characters before or
/// after `span` in `text`. Both sides are checked independently.
pub fn is_negated(text: &str, span: Span, window: usize) -> bool {
    let (Some(before), Some(after)) = (text.get(..span.start), text.get(span.end..)) else {
        return false;
    };
    let before: String = {
        let mut chars: Vec<char> = before.chars().rev().take(window).collect();
        chars.reverse();
        chars.into_iter().collect::<String>().to_lowercase()
    };
    let after: String = after.chars().take(window).collect::<String>().to_lowercase();

    NEGATION_PHRASES
        .iter()
        .any(|phrase| before.contains(phrase) || after.contains(phrase))
}
