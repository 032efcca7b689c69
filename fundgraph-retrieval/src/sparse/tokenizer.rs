//! Tokenizers for the BM25 index.

/// Turns text into index terms. Query and corpus must use the same one.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &'static str;
}

/// Minimum token length in characters; shorter tokens are dropped.
const MIN_TOKEN_CHARS: usize = 3;

/// Whitespace split, lower-case, tokens longer than two characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_lowercase)
            .collect()
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

/// German-aware tokenizer: word splitting on non-alphanumerics, stop-word
/// removal, and light suffix stripping so inflected forms share a term
/// (`Zuwendungen` and `Zuwendung` both index as `zuwendung`).
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanTokenizer;

/// Inflection suffixes, longest first. Only one is stripped per token.
const SUFFIXES: [&str; 7] = ["en", "er", "es", "em", "e", "n", "s"];

/// A stem must keep at least this many characters after stripping.
const MIN_STEM_CHARS: usize = 4;

static STOP_WORDS: &[&str] = &[
    "aber", "alle", "allem", "allen", "aller", "alles", "als", "also", "am", "an", "andere",
    "anderen", "auch", "auf", "aus", "bei", "beim", "bis", "bzw", "da", "damit", "dann", "das",
    "dass", "daß", "dem", "den", "denen", "der", "deren", "des", "dessen", "die", "dies",
    "diese", "diesem", "diesen", "dieser", "dieses", "doch", "dort", "durch", "ein", "eine",
    "einem", "einen", "einer", "eines", "er", "es", "etwa", "für", "gegen", "hat", "haben",
    "hier", "ihr", "ihre", "ihrem", "ihren", "ihrer", "im", "in", "ist", "jede", "jedem",
    "jeden", "jeder", "jedes", "kann", "kein", "keine", "keinem", "keinen", "keiner", "können",
    "mit", "muss", "müssen", "nach", "nicht", "noch", "nur", "ob", "oder", "ohne", "sein",
    "seine", "seinem", "seinen", "seiner", "sich", "sie", "sind", "so", "soll", "sollen",
    "sowie", "über", "um", "und", "unter", "vom", "von", "vor", "war", "waren", "was", "weil",
    "welche", "welchem", "welchen", "welcher", "wenn", "werden", "wie", "wird", "wir", "wurde",
    "wurden", "zu", "zum", "zur", "zwischen",
];

impl GermanTokenizer {
    fn is_stop_word(word: &str) -> bool {
        STOP_WORDS.contains(&word)
    }

    fn normalize(word: &str) -> String {
        let chars = word.chars().count();
        for suffix in SUFFIXES {
            if let Some(stem) = word.strip_suffix(suffix) {
                if chars - suffix.chars().count() >= MIN_STEM_CHARS {
                    return stem.to_string();
                }
            }
        }
        word.to_string()
    }
}

impl Tokenizer for GermanTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|w| !Self::is_stop_word(w))
            .map(Self::normalize)
            .collect()
    }

    fn name(&self) -> &'static str {
        "german"
    }
}

/// Tokenizer by configured name; anything but `"simple"` selects German.
pub fn tokenizer_for(name: &str) -> Box<dyn Tokenizer> {
    match name {
        "simple" => Box::new(SimpleTokenizer),
        _ => Box::new(GermanTokenizer),
    }
}
