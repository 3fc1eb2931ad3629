//! Resume ranking engine: scores a batch of resumes against one job description.
//!
//! Text comes in already extracted. [`Analyzer::analyze`] cleans it, pulls keywords
//! from the job description, weights every document with TF-IDF, checks which job
//! keywords each resume covers and returns the resumes ranked by score.

pub mod analyzer;
pub mod config;
pub mod corpus;
pub mod error;
pub mod keywords;
pub mod matcher;
pub mod model;
pub mod persist;
pub mod scorer;
pub mod tagger;
pub mod tokenizer;
pub mod vocabulary;

pub use analyzer::{summarize, Analyzer};
pub use config::AnalysisConfig;
pub use corpus::{cosine_similarity, Corpus, TermWeighting};
pub use error::AnalysisError;
pub use keywords::KeywordExtractor;
pub use matcher::KeywordMatcher;
pub use model::{AnalysisResult, Keyword, ResumeInput, ResumeReport, Summary};
pub use persist::{HistoryEntry, MemoryStore, ResultStore, SledStore, StoredAnalysis};
pub use tagger::{GrammaticalTagger, HeuristicTagger};
pub use tokenizer::{SnowballStemmer, Stemmer, TextNormalizer};
pub use vocabulary::Vocabulary;
