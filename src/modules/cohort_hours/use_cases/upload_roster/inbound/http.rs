use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::modules::cohort_hours::use_cases::upload_roster::handler::IngestError;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct UploadRosterResponse {
    pub inserted: u64,
}

pub async fn handle(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let (file_name, bytes) = match read_file_part(&mut multipart).await {
        Ok(part) => part,
        Err(status) => return status.into_response(),
    };

    match state.upload_roster.handle(&file_name, &bytes).await {
        Ok(inserted) => (StatusCode::OK, Json(UploadRosterResponse { inserted })).into_response(),
        Err(IngestError::MalformedInput(reason)) => {
            warn!(file = %file_name, reason = %reason, "rejected roster upload");
            StatusCode::UNPROCESSABLE_ENTITY.into_response()
        }
        Err(IngestError::Store(e)) => {
            error!(file = %file_name, error = %e, "roster ingestion failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn read_file_part(multipart: &mut Multipart) -> Result<(String, Bytes), StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        return Ok((file_name, bytes));
    }
    Err(StatusCode::BAD_REQUEST)
}
