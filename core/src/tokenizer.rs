use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer as Snowball};
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

use crate::vocabulary::Vocabulary;

/// Cleaned text shorter than this is never treated as real content.
pub const MIN_CONTENT_CHARS: usize = 10;

lazy_static! {
    // "/Type /Page", "/Length 1234", "/F1 12 Tf" ...
    static ref FORMAT_COMMAND: Regex = Regex::new(r"/[A-Za-z]+\s*\d*\s*[A-Za-z]*\s*").expect("valid regex");
    static ref OBJECT_REF: Regex = Regex::new(r"\d+\s+\d+\s+obj").expect("valid regex");
    static ref FORMAT_KEYWORD: Regex = Regex::new(r"\b(?:endobj|endstream|stream)\b").expect("valid regex");
    static ref DISALLOWED: Regex = Regex::new(r"[^\w\s.\-]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref WORD: Regex = Regex::new(r"[\p{L}\p{N}_]+").expect("valid regex");
}

/// Reduces a word to its morphological root. Must be deterministic.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// English Snowball (Porter2) stemmer.
pub struct SnowballStemmer {
    inner: Snowball,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self { inner: Snowball::create(Algorithm::English) }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self { Self::english() }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}

/// Strip document-format residue from extracted text.
///
/// Applies NFKC normalization, removes format command markers (`/Type /Page`),
/// object references (`12 0 obj`) and stream keywords, replaces every character
/// other than letters, digits, whitespace, `-` and `.` with a space, then collapses
/// runs of whitespace and trims.
pub fn clean(raw: &str) -> String {
    let text = raw.nfkc().collect::<String>();
    let text = FORMAT_COMMAND.replace_all(&text, " ");
    let text = OBJECT_REF.replace_all(&text, " ");
    let text = FORMAT_KEYWORD.replace_all(&text, " ");
    let text = DISALLOWED.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Cleaning, content validation and stemmed tokenization over a shared vocabulary.
#[derive(Clone)]
pub struct TextNormalizer {
    vocab: Arc<Vocabulary>,
    stemmer: Arc<dyn Stemmer>,
}

impl TextNormalizer {
    pub fn new(vocab: Arc<Vocabulary>, stemmer: Arc<dyn Stemmer>) -> Self {
        Self { vocab, stemmer }
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> { &self.vocab }

    pub fn clean(&self, raw: &str) -> String { clean(raw) }

    /// True when the cleaned text looks like prose rather than binary noise:
    /// long enough and mentioning at least one content indicator word.
    pub fn is_valid(&self, clean_text: &str) -> bool {
        if clean_text.chars().count() < MIN_CONTENT_CHARS {
            return false;
        }
        let lower = clean_text.to_lowercase();
        self.vocab
            .content_indicators()
            .iter()
            .any(|word| lower.contains(word.as_str()))
    }

    /// Lowercase, split on word boundaries, keep alphabetic non-stopword tokens longer
    /// than two characters and stem them. Order is preserved, duplicates are kept.
    pub fn tokenize(&self, clean_text: &str) -> Vec<String> {
        let lower = clean_text.to_lowercase();
        WORD.find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| token.chars().count() > 2)
            .filter(|token| token.chars().all(char::is_alphabetic))
            .filter(|token| !self.vocab.is_stopword(token))
            .map(|token| self.stemmer.stem(token))
            .collect()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Vocabulary::builtin(), Arc::new(SnowballStemmer::english()))
    }
}
