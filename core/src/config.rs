use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::keywords::DEFAULT_TOP_N;
use crate::scorer::ReportLimits;

/// Tunables for one [`Analyzer`](crate::Analyzer). Every field has a default, so a
/// JSON file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Keywords taken from the job description.
    pub job_keyword_limit: usize,
    /// Words taken by the last-resort job keyword fallback.
    pub basic_keyword_limit: usize,
    /// Score resumes on worker threads.
    pub parallel: bool,
    #[serde(flatten)]
    pub limits: ReportLimits,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            job_keyword_limit: DEFAULT_TOP_N,
            basic_keyword_limit: 10,
            parallel: true,
            limits: ReportLimits::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json).context("invalid analysis config")?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&json)
    }
}
