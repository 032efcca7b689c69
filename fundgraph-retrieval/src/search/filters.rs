//! Post-retrieval filters over owning-document metadata.

use chrono::NaiveDate;
use fundgraph_core::models::{DocumentMetadata, SearchFilters};

/// Parse an as-of value.
///
/// Accepts ISO dates (`2023-01-01`, optionally followed by a time such as
/// `2023-01-01T00:00:00`) and German dates (`01.01.2023`, `1.1.2023`).
/// Anything else yields `None`, which the date filter treats as undated.
pub fn parse_as_of(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(day) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(raw, "%d.%m.%Y").ok()
}

/// Whether a result's metadata passes every set filter.
///
/// The ministry filter accepts either the ministry or the publisher. The
/// abbreviation filter is a case-insensitive substring test. Results whose
/// as-of date is missing or unparsable (see [`parse_as_of`]) are kept by the
/// date filter.
pub fn matches(filters: &SearchFilters, metadata: &DocumentMetadata) -> bool {
    if let Some(ministry) = &filters.ministry {
        let hit = metadata.ministry.as_deref() == Some(ministry.as_str())
            || metadata.publisher.as_deref() == Some(ministry.as_str());
        if !hit {
            return false;
        }
    }
    if let Some(kuerzel) = &filters.kuerzel {
        let have = metadata.kuerzel.as_deref().unwrap_or("").to_lowercase();
        if !have.contains(&kuerzel.to_lowercase()) {
            return false;
        }
    }
    if let Some(after) = filters.as_of_after {
        if let Some(as_of) = metadata.as_of.as_deref().and_then(parse_as_of) {
            if as_of < after {
                return false;
            }
        }
    }
    true
}
