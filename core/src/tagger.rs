//! Lightweight part-of-speech tagging used for keyword candidates.
//!
//! [`HeuristicTagger`] does not parse sentences. It recognises multi-word skill
//! phrases from the vocabulary and sorts every remaining content word into noun,
//! adjective or "other" (verbs, adverbs, function words) using closed word lists and
//! suffix rules. That is enough to surface the nouns a job posting is built around.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::Arc;

use crate::vocabulary::Vocabulary;

/// Candidate terms pulled out of a cleaned text, lowercased, in text order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggedTerms {
    /// Skill or technology phrases, one entry per occurrence.
    pub phrases: Vec<String>,
    pub nouns: Vec<String>,
    pub adjectives: Vec<String>,
}

pub trait GrammaticalTagger: Send + Sync {
    fn tag(&self, clean_text: &str) -> TaggedTerms;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Noun,
    Adjective,
    Other,
}

lazy_static! {
    static ref FUNCTION_WORDS: HashSet<&'static str> = [
        "about","across","against","all","along","also","among","another","any","around",
        "can","could","each","either","etc","every","few","from","here","how","into","just",
        "many","may","might","more","most","much","must","neither","no","nor","not","now",
        "only","other","own","per","same","shall","should","so","some","such","than","there",
        "too","toward","towards","upon","very","via","when","where","why","will","within",
        "without","would","yet","plus","including","like","well","us","ll","ve","re",
    ]
    .into_iter()
    .collect();

    static ref COMMON_VERBS: HashSet<&'static str> = [
        "build","builds","built","create","creates","drive","drives","ensure","ensures",
        "get","gets","help","helps","join","joins","look","looks","make","makes","need",
        "needs","seek","seeks","take","takes","use","uses","want","wants","write","writes",
        "wrote","collaborate","collaborates","deliver","delivers","maintain","maintains",
        "implement","implements","apply","improve","improves","know","knows",
    ]
    .into_iter()
    .collect();

    static ref COMMON_ADJECTIVES: HashSet<&'static str> = [
        "strong","good","great","excellent","senior","junior","solid","deep","broad","new",
        "modern","large","small","fast","remote","hybrid","proven","hands-on","main","key",
        "core","high","low","full","part","open","clean","clear","best","top","able",
    ]
    .into_iter()
    .collect();

    // -ing words that usually name a discipline rather than an action
    static ref ING_NOUNS: HashSet<&'static str> = [
        "engineering","programming","testing","debugging","computing","networking",
        "marketing","accounting","training","learning","modeling","modelling","processing",
        "scheduling","budgeting","consulting","banking","manufacturing","recruiting",
        "monitoring","logging","caching","messaging","scripting","profiling","planning",
    ]
    .into_iter()
    .collect();
}

const ADJECTIVE_SUFFIXES: &[&str] = &["able", "ible", "ful", "ive", "ous", "ical", "ional", "less", "ish"];

/// Rule-based tagger over a shared [`Vocabulary`].
#[derive(Clone)]
pub struct HeuristicTagger {
    vocab: Arc<Vocabulary>,
}

impl HeuristicTagger {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    fn classify(&self, word: &str) -> WordClass {
        if self.vocab.is_stopword(word) || FUNCTION_WORDS.contains(word) {
            return WordClass::Other;
        }
        if !word.chars().any(char::is_alphabetic) {
            return WordClass::Other;
        }
        // technical skills are named things even when they look like adjectives
        if self.vocab.is_technical_skill(word) {
            return WordClass::Noun;
        }
        if COMMON_ADJECTIVES.contains(word) {
            return WordClass::Adjective;
        }
        if COMMON_VERBS.contains(word) {
            return WordClass::Other;
        }
        let len = word.chars().count();
        if word.ends_with("ly") && len > 4 {
            return WordClass::Other;
        }
        if word.ends_with("ing") && len > 5 {
            return if ING_NOUNS.contains(word) { WordClass::Noun } else { WordClass::Other };
        }
        if word.ends_with("ed") && len > 4 {
            return WordClass::Adjective;
        }
        if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return WordClass::Adjective;
        }
        WordClass::Noun
    }
}

impl GrammaticalTagger for HeuristicTagger {
    fn tag(&self, clean_text: &str) -> TaggedTerms {
        let lower = clean_text.to_lowercase();
        let words: Vec<&str> = lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c| c == '.' || c == '-'))
            .filter(|w| !w.is_empty())
            .collect();

        let mut tagged = TaggedTerms::default();
        for phrase in self.vocab.skill_phrases() {
            let parts: Vec<&str> = phrase.split_whitespace().collect();
            let hits = words.windows(parts.len()).filter(|window| *window == parts.as_slice()).count();
            tagged.phrases.extend(std::iter::repeat(phrase.to_string()).take(hits));
        }

        for word in &words {
            match self.classify(word) {
                WordClass::Noun if word.chars().count() > 2 => tagged.nouns.push(word.to_string()),
                WordClass::Adjective if word.chars().count() > 3 => tagged.adjectives.push(word.to_string()),
                _ => {}
            }
        }
        tagged
    }
}
