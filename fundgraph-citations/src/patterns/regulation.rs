use std::sync::LazyLock;

use regex::Regex;

/// Funding-regulation codes: the `BNBest-*` and `ANBest-*` families
/// (including `BNBest-mittelbarer Abruf-*`) and the fixed codes, optionally
/// followed by a year or `98`.
pub static RE_REGULATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?P<regulation>BNBest-(?:mittelbarer\s+Abruf-[A-Za-z0-9\-]+|[A-Za-z0-9\-]+)|ANBest-[A-Za-z0-9\-]+|\b(?:AZA|AZK|NKBF|NABF|BEBF|NKFT)\b)(?:\s+(?P<year>98|20\d{2})\b)?",
    )
    .ok()
});
