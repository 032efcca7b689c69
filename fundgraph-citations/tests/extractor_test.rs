use fundgraph_citations::patterns::{all_patterns, law::KNOWN_LAWS};
use fundgraph_citations::{is_negated, CitationExtractor};
use fundgraph_core::models::{CitationKind, Span};

fn extract(text: &str) -> Vec<fundgraph_core::models::Citation> {
    CitationExtractor::new().extract(text)
}

// ── Pattern health ───────────────────────────────────────────────────────

#[test]
fn all_patterns_compile() {
    for pat in all_patterns() {
        assert!(pat.regex.is_some(), "pattern '{}' failed to compile", pat.name);
    }
    assert!(CitationExtractor::new().failed_patterns().is_empty());
    assert!(KNOWN_LAWS.contains(&"AtG"));
}

// ── Regulation codes ─────────────────────────────────────────────────────

#[test]
fn plain_regulation_code() {
    let found = extract("Es gelten die BNBest-P.");
    assert_eq!(found.len(), 1);
    let c = &found[0];
    assert_eq!(c.kind, CitationKind::Regulation);
    assert_eq!(c.target, "BNBest-P");
    assert!(!c.is_excluded);
    assert_eq!(&"Es gelten die BNBest-P."[c.span.start..c.span.end], "BNBest-P");
}

#[test]
fn negated_regulation_after_match() {
    let found = extract("Die BNBest-BMBF findet keine Anwendung.");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target, "BNBest-BMBF");
    assert!(found[0].is_excluded);
}

#[test]
fn negated_regulation_before_match() {
    let found = extract("Abweichend von den ANBest-P wird folgendes vereinbart: ...");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target, "ANBest-P");
    assert!(found[0].is_excluded);
}

#[test]
fn year_suffix_is_part_of_target() {
    let found = extract("Siehe Nummer 5.1 der NKBF 98. Ferner gilt BNBest-P 2019 sinngemäß.");
    let targets: Vec<&str> = found.iter().map(|c| c.target.as_str()).collect();
    assert_eq!(targets, vec!["NKBF 98", "BNBest-P 2019"]);
    assert!(found.iter().all(|c| c.has_year_marker()));
}

#[test]
fn compound_bnbest_form() {
    let found = extract("Es gelten die BNBest-mittelbarer Abruf-BMBF in der jeweils gültigen Fassung.");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target, "BNBest-mittelbarer Abruf-BMBF");
}

#[test]
fn fixed_codes_need_word_boundaries() {
    assert!(extract("Der AZAK-Bericht ist beizufügen.").is_empty());
    let found = extract("Antrag per AZA, Kostenbasis per AZK.");
    let targets: Vec<&str> = found.iter().map(|c| c.target.as_str()).collect();
    assert_eq!(targets, vec!["AZA", "AZK"]);
}

// ── Law citations ────────────────────────────────────────────────────────

#[test]
fn law_with_section_and_subsection() {
    let found = extract("Das Verfahren richtet sich nach § 44 Abs. 1 Satz 2 BHO und den VV.");
    assert_eq!(found.len(), 1);
    let c = &found[0];
    assert_eq!(c.kind, CitationKind::Law);
    assert_eq!(c.target, "BHO");
    assert_eq!(c.section.as_deref(), Some("44"));
    assert!(!c.is_excluded);
}

#[test]
fn article_citation_with_filler_words() {
    let found = extract("Gemäß Artikel 104b des GG ist der Bund zuständig.");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target, "GG");
    assert_eq!(found[0].section.as_deref(), Some("104b"));
}

#[test]
fn nearest_known_law_wins() {
    let found = extract("Nach § 49 VwVfG und ergänzend dem BGB wird widerrufen.");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target, "VwVfG");
}

#[test]
fn mixed_case_law_abbreviation() {
    let found = extract("Der Zuwendungsempfänger muss § 1 AtG beachten.");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target, "AtG");
    assert_eq!(found[0].section.as_deref(), Some("1"));
}

#[test]
fn longest_sgb_book_is_matched() {
    let found = extract("Leistungen nach § 16 SGB III sind nicht förderfähig.");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target, "SGB III");
}

#[test]
fn unknown_abbreviation_is_not_a_citation() {
    assert!(extract("Nach § 12 XYZG ist zu verfahren.").is_empty());
    assert!(extract("§ 3 BGBl. I S. 1").is_empty());
}

#[test]
fn laws_are_reported_before_regulations() {
    let found = extract("Die BNBest-P gelten neben § 44 BHO.");
    let kinds: Vec<CitationKind> = found.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![CitationKind::Law, CitationKind::Regulation]);
}

// ── Degenerate input ─────────────────────────────────────────────────────

#[test]
fn empty_and_noise_yield_nothing() {
    assert!(extract("").is_empty());
    assert!(extract("§§§ Art. Artikel BNBest- ANBest").is_empty());
}

#[test]
fn citation_serializes_with_type_tag() {
    let found = extract("Es gelten die BNBest-P.");
    let json = serde_json::to_value(&found[0]).unwrap();
    assert_eq!(json["type"], "regulation");
    assert_eq!(json["isExcluded"], false);
}

// ── Negation window ──────────────────────────────────────────────────────

#[test]
fn negation_outside_window_is_ignored() {
    let text = format!("Die BNBest-P gelten. {} Das findet keine Anwendung.", "x".repeat(60));
    let found = extract(&text);
    assert_eq!(found.len(), 1);
    assert!(!found[0].is_excluded);
}

#[test]
fn custom_window_widens_the_scan() {
    let text = format!("Die BNBest-P gelten. {} Das findet keine Anwendung.", "x".repeat(60));
    let found = CitationExtractor::with_window(120).extract(&text);
    assert!(found[0].is_excluded);
}

#[test]
fn window_counts_characters_not_bytes() {
    // 30 umlauts are 60 bytes but only 30 characters.
    let text = format!("Ausgeschlossen {} BNBest-P", "ä".repeat(30));
    let start = text.find("BNBest").unwrap();
    let span = Span {
        start,
        end: text.len(),
    };
    assert!(is_negated(&text, span, 50));
    assert!(!is_negated(&text, span, 20));
}

#[test]
fn invalid_span_is_not_negated() {
    assert!(!is_negated("gilt nicht", Span { start: 50, end: 60 }, 40));
}
