use std::collections::{HashMap, HashSet};

use crate::tokenizer::TextNormalizer;

/// Position of the job description inside every [`Corpus`].
pub const JOB_DOC: usize = 0;

#[derive(Debug, Clone)]
pub struct Document {
    pub clean: String,
    /// Stemmed tokens, empty when the cleaned text failed validation.
    pub tokens: Vec<String>,
}

/// Per-document term weights over a fixed corpus. A term absent from a document
/// weighs zero.
pub trait TermWeighting {
    fn num_docs(&self) -> usize;
    /// Distinct terms of a document, in order of first occurrence.
    fn terms(&self, doc: usize) -> Vec<&str>;
    fn weight(&self, term: &str, doc: usize) -> f64;
}

/// The job description followed by the resumes of one analysis request, in
/// submission order. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Corpus {
    docs: Vec<Document>,
    term_counts: Vec<HashMap<String, u32>>,
    df: HashMap<String, u32>,
}

impl Corpus {
    pub fn build<S: AsRef<str>>(normalizer: &TextNormalizer, job_description: &str, resumes: &[S]) -> Self {
        let docs: Vec<Document> = std::iter::once(job_description)
            .chain(resumes.iter().map(|r| r.as_ref()))
            .map(|raw| {
                let clean = normalizer.clean(raw);
                let tokens = if normalizer.is_valid(&clean) { normalizer.tokenize(&clean) } else { Vec::new() };
                Document { clean, tokens }
            })
            .collect();

        let mut term_counts = Vec::with_capacity(docs.len());
        let mut df: HashMap<String, u32> = HashMap::new();
        for doc in &docs {
            let mut counts: HashMap<String, u32> = HashMap::new();
            for token in &doc.tokens {
                *counts.entry(token.clone()).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            term_counts.push(counts);
        }
        tracing::debug!(num_docs = docs.len(), num_terms = df.len(), "corpus built");
        Self { docs, term_counts, df }
    }

    pub fn document(&self, index: usize) -> Option<&Document> { self.docs.get(index) }

    /// Cosine similarity between the job description and document `index`.
    pub fn similarity(&self, index: usize) -> f64 {
        similarity(self, JOB_DOC, index)
    }
}

impl TermWeighting for Corpus {
    fn num_docs(&self) -> usize { self.docs.len() }

    fn terms(&self, doc: usize) -> Vec<&str> {
        let Some(document) = self.docs.get(doc) else { return Vec::new() };
        let mut seen = HashSet::new();
        document
            .tokens
            .iter()
            .map(String::as_str)
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// `(1 + ln tf) * ln(1 + N / df)`; the smoothed idf stays positive even for a
    /// term present in every document.
    fn weight(&self, term: &str, doc: usize) -> f64 {
        let tf_raw = self.term_counts.get(doc).and_then(|c| c.get(term)).copied().unwrap_or(0);
        if tf_raw == 0 {
            return 0.0;
        }
        let n = self.docs.len().max(1) as f64;
        let df_t = self.df.get(term).copied().unwrap_or(1).max(1) as f64;
        let tf = 1.0 + (tf_raw as f64).ln();
        let idf = (1.0 + n / df_t).ln();
        tf * idf
    }
}

/// Weight vectors of documents `a` and `b` over the union of their terms, compared
/// by cosine.
pub fn similarity<W: TermWeighting + ?Sized>(weighting: &W, a: usize, b: usize) -> f64 {
    let mut seen = HashSet::new();
    let terms: Vec<&str> = weighting
        .terms(a)
        .into_iter()
        .chain(weighting.terms(b))
        .filter(|t| seen.insert(*t))
        .collect();
    let va: Vec<f64> = terms.iter().map(|t| weighting.weight(t, a)).collect();
    let vb: Vec<f64> = terms.iter().map(|t| weighting.weight(t, b)).collect();
    cosine_similarity(&va, &vb)
}

/// `dot(a, b) / (|a| |b|)`, zero when either magnitude is zero. Clamped to [0, 1].
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Senior Python developer with Docker and AWS experience";

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.3, 1.2, 0.0, 4.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn job_description_against_itself_is_one() {
        let corpus = Corpus::build(&TextNormalizer::default(), JD, &[JD]);
        assert!((corpus.similarity(1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn absent_terms_weigh_zero() {
        let corpus = Corpus::build(&TextNormalizer::default(), JD, &["Java engineer with Kubernetes experience"]);
        assert_eq!(corpus.weight("python", 1), 0.0);
        assert!(corpus.weight("python", JOB_DOC) > 0.0);
        assert!(corpus.weight("experi", 1) > 0.0);
    }

    #[test]
    fn invalid_documents_have_no_tokens() {
        let corpus = Corpus::build(&TextNormalizer::default(), JD, &["Error reading file: cv.pdf"]);
        assert!(corpus.document(1).map(|d| d.tokens.is_empty()).unwrap_or(false));
        assert_eq!(corpus.similarity(1), 0.0);
    }

    #[test]
    fn overlapping_resume_beats_disjoint_one() {
        let corpus = Corpus::build(
            &TextNormalizer::default(),
            JD,
            &["Python developer, Docker and AWS experience", "Chef with pastry experience in restaurants"],
        );
        assert!(corpus.similarity(1) > corpus.similarity(2));
        assert_eq!(corpus.num_docs(), 3);
    }
}
