use serde::{Deserialize, Serialize};

/// A candidate term and how often it was seen. Lists of keywords are unique by term
/// and ordered by descending frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub frequency: u32,
}

impl Keyword {
    pub fn new(term: impl Into<String>, frequency: u32) -> Self {
        Self { term: term.into(), frequency }
    }
}

/// One resume as handed over by the ingestion layer, text already extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeInput {
    pub filename: String,
    pub content: String,
}

impl ResumeInput {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self { filename: filename.into(), content: content.into() }
    }

    /// Stand-in for a file whose text could not be extracted. It is still scored.
    pub fn unreadable(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let content = format!("Error reading file: {filename}");
        Self { filename, content }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReport {
    pub filename: String,
    /// 0 – 100
    pub score: u32,
    /// 0 – 100
    pub match_percentage: u32,
    pub matching_keywords: Vec<Keyword>,
    pub missing_keywords: Vec<Keyword>,
    pub resume_keywords: Vec<Keyword>,
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_resumes: usize,
    pub average_score: u32,
    pub top_score: u32,
    pub top_candidate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub job_keywords: Vec<Keyword>,
    /// Descending score; equal scores keep submission order.
    pub ranked_resumes: Vec<ResumeReport>,
    pub summary: Summary,
}
