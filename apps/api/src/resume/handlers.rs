//! Axum route handlers for the Resume API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::{require_text, AppError};
use crate::models::ResumeData;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub resume: ResumeData,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub resume: ResumeData,
    pub instruction: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ResumeData>, AppError> {
    require_text("resume_text", &request.resume_text)?;
    let resume = state.pipeline.extract_resume_data(&request.resume_text).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/tailor
///
/// Returns the tailored resume. Nothing is returned unless the whole result
/// parsed and passed the non-fabrication checks.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<ResumeData>, AppError> {
    require_text("job_description", &request.job_description)?;
    let resume = state
        .pipeline
        .tailor_resume(&request.resume, &request.job_description)
        .await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/edit
pub async fn handle_edit(
    State(state): State<AppState>,
    Json(request): Json<EditRequest>,
) -> Result<Json<ResumeData>, AppError> {
    require_text("instruction", &request.instruction)?;
    let resume = state
        .pipeline
        .edit_resume(&request.resume, &request.instruction)
        .await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/document
///
/// Renders LaTeX source. Pure; no model calls.
pub async fn handle_document(
    State(state): State<AppState>,
    Json(resume): Json<ResumeData>,
) -> Response {
    let source = state.pipeline.build_document(&resume);
    ([(header::CONTENT_TYPE, "application/x-tex")], source).into_response()
}
