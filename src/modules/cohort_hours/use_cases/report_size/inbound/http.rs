use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::error;

use crate::shared::infrastructure::report_store::ReportStoreError;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct ReportSizeResponse {
    pub bytes: u64,
}

/// Byte size of the stored report, so the frontend can show download
/// progress or skip an empty artifact. 404 until the first generation.
pub async fn handle(State(state): State<AppState>) -> impl IntoResponse {
    match state.reports.size_bytes().await {
        Ok(bytes) => Json(ReportSizeResponse { bytes }).into_response(),
        Err(ReportStoreError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!(error = %e, "report size lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
