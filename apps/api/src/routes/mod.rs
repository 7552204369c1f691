pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/analyze", post(matching::handle_analyze))
        // Resume API
        .route("/api/v1/resume/extract", post(resume::handle_extract))
        .route("/api/v1/resume/tailor", post(resume::handle_tailor))
        .route("/api/v1/resume/edit", post(resume::handle_edit))
        .route("/api/v1/resume/document", post(resume::handle_document))
        .with_state(state)
}
