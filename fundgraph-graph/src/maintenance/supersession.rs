use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use fundgraph_core::models::{NodeKind, Relation};

use crate::store::GraphStore;

/// Title families whose versions are ordered by the date in their title.
/// More specific names come first; a title joins the first family it contains.
pub const DEFAULT_VERSION_FAMILIES: [&str; 4] = ["ANBest-P-Kosten", "ANBest-P", "ANBest-GK", "ANBest-I"];

const MONTHS: [(&str, u32); 12] = [
    ("januar", 1),
    ("februar", 2),
    ("märz", 3),
    ("april", 4),
    ("mai", 5),
    ("juni", 6),
    ("juli", 7),
    ("august", 8),
    ("september", 9),
    ("oktober", 10),
    ("november", 11),
    ("dezember", 12),
];

static TITLE_DATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)([a-zäöü]+)\s+(\d{4})").ok());

/// First "Monat JJJJ" in a title. An unknown month word counts as January.
pub fn extract_title_date(title: &str) -> Option<NaiveDate> {
    let caps = TITLE_DATE.as_ref()?.captures(title)?;
    let word = caps.get(1)?.as_str().to_lowercase();
    let year: i32 = caps.get(2)?.as_str().parse().ok()?;
    let month = MONTHS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, m)| *m)
        .unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Order the documents of each family by title date and link consecutive
/// versions `newer SUPERSEDES older`. Returns the number of edges added.
pub fn link_supersessions(store: &mut GraphStore, families: &[&str]) -> usize {
    let mut grouped: Vec<Vec<(NaiveDate, String)>> = vec![Vec::new(); families.len()];
    for node in store.nodes().filter(|n| n.kind() == NodeKind::Document) {
        let Some(title) = node.title() else {
            continue;
        };
        if let Some(slot) = families.iter().position(|f| title.contains(f)) {
            if let Some(date) = extract_title_date(title) {
                grouped[slot].push((date, node.id.clone()));
            }
        }
    }

    let mut added = 0;
    for (family, mut docs) in families.iter().zip(grouped) {
        docs.sort_by(|a, b| a.0.cmp(&b.0));
        for pair in docs.windows(2) {
            let (older, newer) = (&pair[0].1, &pair[1].1);
            if store.add_edge_once(newer, older, Relation::Supersedes) {
                tracing::info!(family = %family, newer = %newer, older = %older, "linked supersession");
                added += 1;
            }
        }
    }
    added
}
