use serde::{Deserialize, Serialize};

use crate::matcher::{KeywordMatcher, PreparedText};
use crate::model::{Keyword, ResumeReport};

/// Output caps applied to each [`ResumeReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLimits {
    pub matching: usize,
    pub missing: usize,
    pub resume_keywords: usize,
    pub feedback_terms: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self { matching: 10, missing: 10, resume_keywords: 15, feedback_terms: 5 }
    }
}

/// Job keywords split by presence in a resume. Together the two lists hold every
/// job keyword exactly once, both in job keyword order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordCoverage {
    pub matching: Vec<Keyword>,
    pub missing: Vec<Keyword>,
}

impl KeywordCoverage {
    pub fn compute(job_keywords: &[Keyword], resume: &PreparedText, matcher: &KeywordMatcher) -> Self {
        let (matching, missing): (Vec<Keyword>, Vec<Keyword>) = job_keywords
            .iter()
            .cloned()
            .partition(|k| matcher.exists_in(&k.term, resume));
        Self { matching, missing }
    }

    /// Share of job keywords found, 0 – 100, rounded.
    pub fn match_percentage(&self) -> u32 {
        let total = self.matching.len() + self.missing.len();
        if total == 0 {
            return 0;
        }
        (100.0 * self.matching.len() as f64 / total as f64).round() as u32
    }
}

/// `max(similarity * 100, match percentage)`, rounded.
pub fn combined_score(similarity: f64, match_percentage: u32) -> u32 {
    let score = (similarity * 100.0).max(match_percentage as f64).round() as u32;
    score.min(100)
}

/// Headline sentence for a similarity band, then the strongest matching and the
/// most important missing terms.
pub fn feedback(similarity: f64, matching: &[Keyword], missing: &[Keyword], terms: usize) -> Vec<String> {
    let headline = if similarity > 0.7 {
        "Excellent match! This candidate's resume aligns very well with the job requirements."
    } else if similarity > 0.5 {
        "Good match. This candidate shows strong alignment with several key requirements."
    } else if similarity > 0.3 {
        "Moderate match. Some relevant skills present, but significant gaps remain."
    } else {
        "Limited match. This candidate may need significant upskilling or may not be suitable for this role."
    };
    let mut out = vec![headline.to_string()];
    if !matching.is_empty() {
        out.push(format!("Strong areas: {}", join_terms(matching, terms)));
    }
    if !missing.is_empty() {
        out.push(format!("Areas for improvement: {}", join_terms(missing, terms)));
    }
    out
}

fn join_terms(keywords: &[Keyword], n: usize) -> String {
    keywords.iter().take(n).map(|k| k.term.as_str()).collect::<Vec<_>>().join(", ")
}

/// Score one resume against the job keywords.
pub fn score_resume(
    filename: &str,
    similarity: f64,
    job_keywords: &[Keyword],
    resume: &PreparedText,
    resume_keywords: Vec<Keyword>,
    matcher: &KeywordMatcher,
    limits: &ReportLimits,
) -> ResumeReport {
    let coverage = KeywordCoverage::compute(job_keywords, resume, matcher);
    let match_percentage = coverage.match_percentage();
    let score = combined_score(similarity, match_percentage);
    let feedback = feedback(similarity, &coverage.matching, &coverage.missing, limits.feedback_terms);
    tracing::debug!(filename, similarity, match_percentage, score, "resume scored");

    let KeywordCoverage { mut matching, mut missing } = coverage;
    matching.truncate(limits.matching);
    missing.truncate(limits.missing);
    let mut resume_keywords = resume_keywords;
    resume_keywords.truncate(limits.resume_keywords);

    ResumeReport {
        filename: filename.to_string(),
        score,
        match_percentage,
        matching_keywords: matching,
        missing_keywords: missing,
        resume_keywords,
        feedback,
    }
}

/// Highest score first. The sort is stable, so equal scores keep submission order.
pub fn rank(reports: &mut [ResumeReport]) {
    reports.sort_by(|a, b| b.score.cmp(&a.score));
}
