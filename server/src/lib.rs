use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    routing::{get, post},
    Json, Router,
};
use ranker_core::{Analyzer, AnalysisResult, HistoryEntry, ResultStore, ResumeInput, StoredAnalysis};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod error;

pub use error::ApiError;

/// Shortest accepted job description, after trimming.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct RequestLimits {
    pub max_resumes: usize,
    /// Per resume, in bytes of UTF-8 text.
    pub max_file_bytes: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self { max_resumes: 10, max_file_bytes: 5 * 1024 * 1024 }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub store: Arc<dyn ResultStore>,
    pub limits: RequestLimits,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub job_description: String,
    #[serde(default)]
    pub resumes: Vec<ResumeUpload>,
}

/// `content` is absent when the client could not extract text from the file.
#[derive(Debug, Deserialize)]
pub struct ResumeUpload {
    pub filename: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: String,
    pub results: AnalysisResult,
}

pub fn build_app(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    // room for a full batch plus the job description and JSON framing
    let body_limit = state
        .limits
        .max_file_bytes
        .saturating_mul(state.limits.max_resumes.max(1))
        .saturating_add(1024 * 1024);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/analysis/:id", get(analysis_handler))
        .route("/api/history", get(history_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let resumes = validate(&request, &state.limits)?;
    let job_description = request.job_description;

    let AppState { analyzer, store, .. } = state;
    let record = tokio::task::spawn_blocking(move || -> Result<StoredAnalysis, ApiError> {
        let result = analyzer.analyze(&job_description, &resumes)?;
        let record = StoredAnalysis::new(job_description, result);
        store.put(record.clone())?;
        Ok(record)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))??;

    tracing::info!(id = %record.id, resumes = record.result.ranked_resumes.len(), "analysis stored");
    Ok(Json(AnalyzeResponse { analysis_id: record.id, results: record.result }))
}

pub async fn analysis_handler(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<StoredAnalysis>, ApiError> {
    let store = state.store;
    let lookup = id.clone();
    let record = tokio::task::spawn_blocking(move || store.get(&lookup))
        .await
        .map_err(|e| ApiError::Internal(e.into()))??;
    record.map(Json).ok_or(ApiError::NotFound(id))
}

pub async fn history_handler(State(state): State<AppState>) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let store = state.store;
    let entries = tokio::task::spawn_blocking(move || store.list())
        .await
        .map_err(|e| ApiError::Internal(e.into()))??;
    Ok(Json(entries))
}

/// Checks the request against `limits` and turns each upload into an engine input.
fn validate(request: &AnalyzeRequest, limits: &RequestLimits) -> Result<Vec<ResumeInput>, ApiError> {
    if request.job_description.trim().chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(ApiError::Validation("Job description is missing or too short".into()));
    }
    if request.resumes.is_empty() {
        return Err(ApiError::Validation("At least one resume is required".into()));
    }
    if request.resumes.len() > limits.max_resumes {
        return Err(ApiError::Validation(format!("At most {} resumes per analysis", limits.max_resumes)));
    }
    request
        .resumes
        .iter()
        .map(|upload| match &upload.content {
            Some(content) if content.len() > limits.max_file_bytes => Err(ApiError::Validation(format!(
                "{} exceeds the {} byte limit",
                upload.filename, limits.max_file_bytes
            ))),
            Some(content) => Ok(ResumeInput::new(upload.filename.as_str(), content.as_str())),
            None => {
                tracing::warn!(filename = %upload.filename, "resume has no text, using placeholder");
                Ok(ResumeInput::unreadable(upload.filename.as_str()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(jd: &str, resumes: Vec<ResumeUpload>) -> AnalyzeRequest {
        AnalyzeRequest { job_description: jd.to_string(), resumes }
    }

    fn upload(filename: &str, content: Option<&str>) -> ResumeUpload {
        ResumeUpload { filename: filename.to_string(), content: content.map(str::to_string) }
    }

    #[test]
    fn short_job_description_is_rejected() {
        let req = request("   rust    ", vec![upload("a.txt", Some("x"))]);
        assert!(matches!(validate(&req, &RequestLimits::default()), Err(ApiError::Validation(_))));
    }

    #[test]
    fn resume_count_is_bounded() {
        let jd = "Rust developer with Tokio experience";
        let limits = RequestLimits { max_resumes: 2, max_file_bytes: 100 };
        assert!(validate(&request(jd, vec![]), &limits).is_err());
        let three = (0..3).map(|i| upload(&format!("{i}.txt"), Some("text"))).collect();
        assert!(validate(&request(jd, three), &limits).is_err());
    }

    #[test]
    fn missing_content_becomes_placeholder() {
        let req = request("Rust developer with Tokio experience", vec![upload("scan.pdf", None)]);
        let inputs = validate(&req, &RequestLimits::default()).unwrap();
        assert_eq!(inputs[0].content, "Error reading file: scan.pdf");
    }

    #[test]
    fn oversized_content_is_rejected() {
        let req = request("Rust developer with Tokio experience", vec![upload("big.txt", Some(&"a".repeat(65)))]);
        let limits = RequestLimits { max_resumes: 10, max_file_bytes: 64 };
        assert!(validate(&req, &limits).is_err());
    }
}
