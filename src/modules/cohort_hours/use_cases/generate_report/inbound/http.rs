use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct GenerateReportBody {
    pub projects: Vec<String>,
    /// Cosmetic row ordering: float the projects with the most populated
    /// weeks to the top instead of keeping request order.
    #[serde(default)]
    pub densest_first: bool,
}

#[derive(Serialize)]
pub struct GenerateReportResponse {
    pub rows: usize,
    pub bytes: u64,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<GenerateReportBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state
        .generate_report
        .handle(&body.projects, body.densest_first)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(GenerateReportResponse {
                rows: outcome.rows,
                bytes: outcome.bytes,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "report generation failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
