use std::collections::HashMap;
use std::sync::Arc;

use crate::model::Keyword;
use crate::tagger::{GrammaticalTagger, HeuristicTagger};
use crate::tokenizer::TextNormalizer;
use crate::vocabulary::Vocabulary;

pub const DEFAULT_TOP_N: usize = 20;

/// Returned when unreadable text carries no recognisable skill either.
pub const GENERIC_KEYWORDS: [&str; 5] = ["programming", "software", "development", "technical", "computer"];

/// Ranks the terms a text is about: tagged phrases, nouns and adjectives plus any
/// technical skill named outright, with technical skills counted double.
#[derive(Clone)]
pub struct KeywordExtractor {
    normalizer: TextNormalizer,
    tagger: Arc<dyn GrammaticalTagger>,
}

impl KeywordExtractor {
    pub fn new(normalizer: TextNormalizer, tagger: Arc<dyn GrammaticalTagger>) -> Self {
        Self { normalizer, tagger }
    }

    /// At most `top_n` keywords, most frequent first; ties keep first-seen order.
    pub fn extract(&self, text: &str, top_n: usize) -> Vec<Keyword> {
        let cleaned = self.normalizer.clean(text);
        if !self.normalizer.is_valid(&cleaned) {
            tracing::warn!(chars = cleaned.len(), "text looks corrupted, using fallback keyword extraction");
            return self.fallback(text, top_n);
        }

        let vocab = self.normalizer.vocabulary();
        let tagged = self.tagger.tag(&cleaned);
        let lower = cleaned.to_lowercase();
        let named_skills = lower
            .split_whitespace()
            .map(|w| w.trim_end_matches('.'))
            .filter(|w| vocab.is_technical_skill(w));

        let candidates = tagged
            .phrases
            .iter()
            .chain(&tagged.nouns)
            .chain(&tagged.adjectives)
            .map(String::as_str)
            .chain(named_skills);

        let mut counts = FrequencyTable::default();
        for candidate in candidates {
            let term = candidate.trim().to_lowercase();
            if is_usable_term(&term, vocab) {
                counts.add(term);
            }
        }

        let mut keywords = counts.into_keywords();
        for keyword in keywords.iter_mut() {
            if vocab.is_technical_skill(&keyword.term) {
                keyword.frequency *= 2;
            }
        }
        // stable: equal frequencies stay in first-seen order
        keywords.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        keywords.truncate(top_n);
        keywords
    }

    /// Degraded path for text that failed validation: every technical skill that
    /// occurs anywhere in the lowercase raw text, else the generic placeholder list.
    pub fn fallback(&self, raw_text: &str, top_n: usize) -> Vec<Keyword> {
        let lower = raw_text.to_lowercase();
        let mut found: Vec<Keyword> = self
            .normalizer
            .vocabulary()
            .technical_skills()
            .iter()
            .filter(|skill| lower.contains(skill.as_str()))
            .map(|skill| Keyword::new(skill.as_str(), 1))
            .collect();
        if found.is_empty() {
            found = GENERIC_KEYWORDS.iter().map(|term| Keyword::new(*term, 1)).collect();
        }
        found.truncate(top_n);
        found
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        let normalizer = TextNormalizer::default();
        let tagger = Arc::new(HeuristicTagger::new(normalizer.vocabulary().clone()));
        Self::new(normalizer, tagger)
    }
}

fn is_usable_term(term: &str, vocab: &Vocabulary) -> bool {
    term.chars().count() > 2
        && !term.chars().all(|c| c.is_ascii_digit())
        && term.chars().any(char::is_alphabetic)
        && !vocab.is_stopword(term)
}

/// Term counts that remember the order terms were first seen in.
#[derive(Default)]
struct FrequencyTable {
    slots: HashMap<String, usize>,
    entries: Vec<Keyword>,
}

impl FrequencyTable {
    fn add(&mut self, term: String) {
        match self.slots.get(&term) {
            Some(&slot) => self.entries[slot].frequency += 1,
            None => {
                self.slots.insert(term.clone(), self.entries.len());
                self.entries.push(Keyword::new(term, 1));
            }
        }
    }

    fn into_keywords(self) -> Vec<Keyword> {
        self.entries
    }
}
