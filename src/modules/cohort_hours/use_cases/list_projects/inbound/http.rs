use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::shell::state::AppState;

/// Lists the distinct project names seen across all ingested entries, so the
/// frontend can offer them for report selection.
pub async fn handle(State(state): State<AppState>) -> impl IntoResponse {
    match state.time_entries.projects().await {
        Ok(projects) => Json(projects).into_response(),
        Err(e) => {
            error!(error = %e, "listing projects failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
