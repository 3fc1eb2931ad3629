use thiserror::Error;

/// The only way an analysis can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No meaningful keywords found in job description. Please check the file content.")]
    NoKeywords,
}
