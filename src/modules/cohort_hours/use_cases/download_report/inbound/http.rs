use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::error;

use crate::shared::infrastructure::report_store::ReportStoreError;
use crate::shell::state::AppState;

const REPORT_FILE_NAME: &str = "cohort.csv";

/// Serves the most recently generated report as a CSV attachment. 404 until
/// the first generation has completed.
pub async fn handle(State(state): State<AppState>) -> impl IntoResponse {
    match state.reports.read().await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(ReportStoreError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!(error = %e, "report download failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
