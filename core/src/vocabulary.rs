//! Fixed word lists shared by every stage of the analysis.
//!
//! A [`Vocabulary`] is built once and handed to the engine behind an `Arc`; nothing
//! mutates it afterwards. [`Vocabulary::builtin`] returns the process-wide default.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::Arc;

const STOPWORDS: &[&str] = &[
    "i","me","my","myself","we","our","ours","ourselves","you","your","yours",
    "yourself","yourselves","he","him","his","himself","she","her","hers",
    "herself","it","its","itself","they","them","their","theirs","themselves",
    "what","which","who","whom","this","that","these","those","am","is","are",
    "was","were","be","been","being","have","has","had","having","do","does",
    "did","doing","a","an","the","and","but","if","or","because","as","until",
    "while","of","at","by","for","with","through","during","before","after",
    "above","below","up","down","in","out","on","off","over","under","again",
    "further","then","once",
    // document-format artifacts left behind by lossy text extraction
    "page","pdf","obj","endobj","stream","endstream","xref","trailer","startxref",
    "contents","resources","font","subtype","type","length","filter","flatedecode",
    "winansiencoding","encoding","basefont",
];

const TECHNICAL_SKILLS: &[&str] = &[
    "javascript","python","java","react","angular","vue","node","express",
    "mongodb","mysql","postgresql","sql","html","css","typescript","php",
    "laravel","django","flask","spring","hibernate","docker","kubernetes",
    "aws","azure","gcp","git","github","gitlab","jenkins","ci/cd","devops",
    "linux","ubuntu","centos","nginx","apache","redis","elasticsearch",
    "machine learning","artificial intelligence","data science","analytics",
    "tensorflow","pytorch","scikit-learn","pandas","numpy","matplotlib",
    "agile","scrum","kanban","jira","confluence","slack","teams",
    "communication","leadership","teamwork","problem solving","analytical",
    "project management","time management","critical thinking","creativity",
    "reactjs","nodejs","expressjs","frontend","backend","fullstack",
    "responsive","bootstrap","tailwind","sass","less","webpack","vite",
    "firebase","api","rest","graphql","json","ajax","jquery","testing",
    "jest","cypress","selenium","debugging","optimization","performance",
];

const CONTENT_INDICATORS: &[&str] = &[
    "experience","skills","education","work","project","develop","manage","team",
    "developer","engineer","software","system","data","analysis","management",
    "position","role","responsibilities","requirements","qualifications","candidate",
    "company","organization","department","technical","business","professional",
    "years","knowledge","ability","strong","excellent","required","preferred",
    "frontend","backend","fullstack","web","application","programming","coding",
    "javascript","react","node","html","css","database","api","framework",
];

lazy_static! {
    static ref BUILTIN: Arc<Vocabulary> = Arc::new(Vocabulary::new(
        STOPWORDS.iter().copied(),
        TECHNICAL_SKILLS.iter().copied(),
        CONTENT_INDICATORS.iter().copied(),
    ));
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    stopwords: HashSet<String>,
    /// Kept in declaration order so the degraded extraction path is deterministic.
    technical_skills: Vec<String>,
    skill_set: HashSet<String>,
    content_indicators: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from custom lists. Entries are lowercased and trimmed.
    pub fn new<A, B, C>(stopwords: A, technical_skills: B, content_indicators: C) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let stopwords = stopwords.into_iter().map(normalize_entry).collect();
        let mut skills: Vec<String> = Vec::new();
        let mut skill_set = HashSet::new();
        for skill in technical_skills.into_iter().map(normalize_entry) {
            if !skill.is_empty() && skill_set.insert(skill.clone()) {
                skills.push(skill);
            }
        }
        let content_indicators = content_indicators.into_iter().map(normalize_entry).collect();
        Self { stopwords, technical_skills: skills, skill_set, content_indicators }
    }

    /// The default English vocabulary.
    pub fn builtin() -> Arc<Vocabulary> {
        Arc::clone(&BUILTIN)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn is_technical_skill(&self, term: &str) -> bool {
        self.skill_set.contains(term)
    }

    pub fn technical_skills(&self) -> &[String] {
        &self.technical_skills
    }

    /// Technical skills made of more than one word, e.g. "machine learning".
    pub fn skill_phrases(&self) -> impl Iterator<Item = &str> {
        self.technical_skills
            .iter()
            .map(String::as_str)
            .filter(|s| s.contains(' '))
    }

    pub fn content_indicators(&self) -> &[String] {
        &self.content_indicators
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::clone(&BUILTIN)
    }
}

fn normalize_entry<S: AsRef<str>>(s: S) -> String {
    s.as_ref().trim().to_lowercase()
}
