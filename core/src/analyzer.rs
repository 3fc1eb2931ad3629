//! Scores a batch of resumes against one job description.
//!
//! Each call builds its own [`Corpus`] and drops it on return; an [`Analyzer`] holds
//! only immutable configuration and can be shared between threads.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use crate::config::AnalysisConfig;
use crate::corpus::Corpus;
use crate::error::AnalysisError;
use crate::keywords::KeywordExtractor;
use crate::matcher::KeywordMatcher;
use crate::model::{AnalysisResult, Keyword, ResumeInput, ResumeReport, Summary};
use crate::scorer::{rank, score_resume};
use crate::tagger::{GrammaticalTagger, HeuristicTagger};
use crate::tokenizer::{SnowballStemmer, Stemmer, TextNormalizer};
use crate::vocabulary::Vocabulary;

#[derive(Clone)]
pub struct Analyzer {
    normalizer: TextNormalizer,
    extractor: KeywordExtractor,
    matcher: KeywordMatcher,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Builtin vocabulary, English Snowball stemming and the heuristic tagger.
    pub fn new(config: AnalysisConfig) -> Self {
        let vocab = Vocabulary::builtin();
        let tagger = Arc::new(HeuristicTagger::new(vocab.clone()));
        Self::with_components(vocab, Arc::new(SnowballStemmer::english()), tagger, config)
    }

    pub fn with_components(
        vocab: Arc<Vocabulary>,
        stemmer: Arc<dyn Stemmer>,
        tagger: Arc<dyn GrammaticalTagger>,
        config: AnalysisConfig,
    ) -> Self {
        let normalizer = TextNormalizer::new(vocab, stemmer.clone());
        let extractor = KeywordExtractor::new(normalizer.clone(), tagger);
        let matcher = KeywordMatcher::new(stemmer);
        Self { normalizer, extractor, matcher, config }
    }

    /// Rank `resumes` against `job_description`.
    ///
    /// Fails only when no keyword at all can be derived from the job description.
    /// Every resume yields exactly one report, unreadable ones included.
    pub fn analyze(&self, job_description: &str, resumes: &[ResumeInput]) -> Result<AnalysisResult, AnalysisError> {
        let job_keywords = self.job_keywords(job_description)?;

        let contents: Vec<&str> = resumes.iter().map(|r| r.content.as_str()).collect();
        let corpus = Corpus::build(&self.normalizer, job_description, &contents);

        let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1).min(resumes.len());
        let mut ranked: Vec<ResumeReport> = if self.config.parallel && workers > 1 {
            // contiguous chunks, one scoped worker each, joined back in submission order
            let chunk_len = resumes.len().div_ceil(workers);
            thread::scope(|scope| {
                let handles: Vec<_> = resumes
                    .chunks(chunk_len)
                    .enumerate()
                    .map(|(c, chunk)| {
                        let (corpus, job_keywords) = (&corpus, &job_keywords);
                        scope.spawn(move || {
                            chunk
                                .iter()
                                .enumerate()
                                .map(|(i, resume)| self.score_one(corpus, c * chunk_len + i + 1, resume, job_keywords))
                                .collect::<Vec<_>>()
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .flat_map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                    .collect()
            })
        } else {
            resumes
                .iter()
                .enumerate()
                .map(|(i, resume)| self.score_one(&corpus, i + 1, resume, &job_keywords))
                .collect()
        };
        rank(&mut ranked);

        let summary = summarize(&ranked, resumes.len());
        tracing::info!(
            resumes = resumes.len(),
            job_keywords = job_keywords.len(),
            top_score = summary.top_score,
            "analysis complete"
        );
        Ok(AnalysisResult { job_keywords, ranked_resumes: ranked, summary })
    }

    fn job_keywords(&self, job_description: &str) -> Result<Vec<Keyword>, AnalysisError> {
        let cleaned = self.normalizer.clean(job_description);
        if !self.normalizer.is_valid(&cleaned) {
            tracing::warn!("job description is short or unreadable, proceeding with basic analysis");
        }
        let keywords = self.extractor.extract(&cleaned, self.config.job_keyword_limit);
        if !keywords.is_empty() {
            return Ok(keywords);
        }

        let basic = self.basic_keywords(&cleaned);
        if basic.is_empty() {
            return Err(AnalysisError::NoKeywords);
        }
        tracing::warn!(count = basic.len(), "no keywords extracted, falling back to plain long words");
        Ok(basic)
    }

    /// First distinct words longer than three characters that are not stopwords.
    fn basic_keywords(&self, cleaned: &str) -> Vec<Keyword> {
        let vocab = self.normalizer.vocabulary();
        let lower = cleaned.to_lowercase();
        let mut seen = HashSet::new();
        lower
            .split_whitespace()
            .filter(|w| w.chars().count() > 3 && !vocab.is_stopword(w))
            .filter(|w| seen.insert(*w))
            .take(self.config.basic_keyword_limit)
            .map(|w| Keyword::new(w, 1))
            .collect()
    }

    fn score_one(&self, corpus: &Corpus, index: usize, resume: &ResumeInput, job_keywords: &[Keyword]) -> ResumeReport {
        let clean = corpus.document(index).map(|d| d.clean.as_str()).unwrap_or_default();
        let limits = &self.config.limits;
        let resume_keywords = self.extractor.extract(clean, limits.resume_keywords);
        let prepared = self.matcher.prepare(clean);
        score_resume(
            &resume.filename,
            corpus.similarity(index),
            job_keywords,
            &prepared,
            resume_keywords,
            &self.matcher,
            limits,
        )
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Batch statistics over already ranked reports. The average of an empty batch is 0.
pub fn summarize(ranked: &[ResumeReport], total_resumes: usize) -> Summary {
    let average_score = if ranked.is_empty() {
        0
    } else {
        let total: u64 = ranked.iter().map(|r| u64::from(r.score)).sum();
        (total as f64 / ranked.len() as f64).round() as u32
    };
    let (top_score, top_candidate) = ranked
        .first()
        .map(|r| (r.score, r.filename.clone()))
        .unwrap_or_else(|| (0, "None".to_string()));
    Summary { total_resumes, average_score, top_score, top_candidate }
}
