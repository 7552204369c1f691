//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::{require_text, AppError};
use crate::models::ResumeAnalysisResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume: String,
    pub job_description: String,
}

/// POST /api/v1/analyze
///
/// Scores a resume against a job description. Any stage failure fails the
/// request; there is no partial result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ResumeAnalysisResult>, AppError> {
    require_text("resume", &request.resume)?;
    require_text("job_description", &request.job_description)?;

    let result = state
        .pipeline
        .analyze_resume(&request.resume, &request.job_description)
        .await?;

    Ok(Json(result))
}
