//! Recall-biased keyword presence test.
//!
//! Job postings and resumes rarely phrase a skill the same way ("machine-learning",
//! "ReactJS", "developed" vs "development"), so a keyword counts as present when it
//! appears verbatim, as a substring of a word, or with the same stem. The occasional
//! false positive is accepted.

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

use crate::tokenizer::{SnowballStemmer, Stemmer};

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Lowercase, turn punctuation into spaces, collapse whitespace, trim.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let spaced = PUNCTUATION.replace_all(&lower, " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// A text normalized once, with the stem of each word cached, so it can be probed
/// with many keywords.
#[derive(Debug, Clone)]
pub struct PreparedText {
    normalized: String,
    words: Vec<String>,
    stems: Vec<String>,
}

impl PreparedText {
    fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(String::as_str).zip(self.stems.iter().map(String::as_str))
    }
}

#[derive(Clone)]
pub struct KeywordMatcher {
    stemmer: Arc<dyn Stemmer>,
}

impl KeywordMatcher {
    pub fn new(stemmer: Arc<dyn Stemmer>) -> Self {
        Self { stemmer }
    }

    pub fn prepare(&self, text: &str) -> PreparedText {
        let normalized = normalize(text);
        let words: Vec<String> = normalized.split(' ').filter(|w| !w.is_empty()).map(str::to_string).collect();
        let stems = words.iter().map(|w| self.stemmer.stem(w)).collect();
        PreparedText { normalized, words, stems }
    }

    /// One-shot form of [`KeywordMatcher::exists_in`].
    pub fn exists(&self, keyword: &str, text: &str) -> bool {
        self.exists_in(keyword, &self.prepare(text))
    }

    pub fn exists_in(&self, keyword: &str, text: &PreparedText) -> bool {
        let keyword = normalize(keyword);
        if text.normalized.contains(&keyword) {
            return true;
        }

        let parts: Vec<&str> = keyword.split(' ').collect();
        if parts.len() > 1 {
            // every part must show up somewhere, in any order
            return parts.iter().all(|part| {
                let part_stem = self.stemmer.stem(part);
                text.pairs().any(|(word, stem)| {
                    word.contains(part) || part.contains(word) || stem == part_stem
                })
            });
        }

        let keyword_stem = self.stemmer.stem(&keyword);
        text.pairs().any(|(word, stem)| {
            word.contains(keyword.as_str())
                || keyword.contains(word)
                || stem == keyword_stem
                || keyword_stem.contains(stem)
                || stem.contains(keyword_stem.as_str())
        })
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(Arc::new(SnowballStemmer::english()))
    }
}
