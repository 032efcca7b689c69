use std::sync::LazyLock;

use regex::Regex;

/// Law abbreviations recognised after a section reference. The list is
/// closed: an unknown abbreviation is not a citation.
pub const KNOWN_LAWS: &[&str] = &[
    "BHO", "LHO", "HGrG", "VwVfG", "VwGO", "HGB", "BGB", "GG", "AO", "UStG", "EStG", "KStG",
    "VgV", "UVgO", "GWB", "SektVO", "KonzVgV", "VOB/A", "VOB/B", "VOL/A", "VOL/B", "BRKG",
    "TVöD", "BDSG", "DSGVO", "AtG", "StrlSchG", "BImSchG", "KrWG", "EEG", "ArbZG", "MiLoG",
    "SGB I", "SGB II", "SGB III", "SGB IV", "SGB V", "SGB VI", "SGB VII", "SGB VIII",
    "SGB IX", "SGB X", "SGB XI", "SGB XII", "SGB XIV", "SGB",
];

/// `§`/`Art.`/`Artikel` + section + optional `Abs.`/`Satz` + a few filler
/// words + a known abbreviation. Filler is only tried when no abbreviation
/// follows the section directly, and then as little as possible, so the
/// nearest known abbreviation wins.
pub static RE_LAW_SECTION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let mut laws: Vec<&str> = KNOWN_LAWS.to_vec();
    // Longest first so `SGB III` wins over `SGB I`.
    laws.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = laws
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?:§§?|Artikel|Art\.)\s*(?P<section>\d+[a-z]*)\s*(?:Abs\.\s*\d+\s*)?(?:Satz\s*\d+\s*)?(?:[a-zA-ZäöüÄÖÜß\s\.]{{0,60}}?\s+)??(?P<law>{alternation})\b"
    ))
    .ok()
});
