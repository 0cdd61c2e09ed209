use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::modules::cohort_hours::core::records::Mismatch;
use crate::modules::cohort_hours::use_cases::upload_time_entries::handler::IngestError;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct UploadTimeEntriesResponse {
    pub inserted: u64,
    pub mismatches: Vec<Mismatch>,
}

pub async fn handle(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let (file_name, bytes) = match read_file_part(&mut multipart).await {
        Ok(part) => part,
        Err(status) => return status.into_response(),
    };

    match state.upload_time_entries.handle(&file_name, &bytes).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(UploadTimeEntriesResponse {
                inserted: outcome.inserted,
                mismatches: outcome.mismatches,
            }),
        )
            .into_response(),
        Err(IngestError::MalformedInput(reason)) => {
            warn!(file = %file_name, reason = %reason, "rejected time entry upload");
            StatusCode::UNPROCESSABLE_ENTITY.into_response()
        }
        Err(IngestError::Store(e)) => {
            error!(file = %file_name, error = %e, "time entry ingestion failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Pulls the `file` part out of the multipart body. A request without one is
/// a client error, not a parse failure.
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

#[cfg(test)]
mod upload_time_entries_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::modules::cohort_hours::core::records::RosterEntry;
    use crate::modules::cohort_hours::core::week::WeekPolicy;
    use crate::modules::cohort_hours::use_cases::generate_report::handler::GenerateReportHandler;
    use crate::modules::cohort_hours::use_cases::upload_roster::handler::UploadRosterHandler;
    use crate::modules::cohort_hours::use_cases::upload_time_entries::handler::UploadTimeEntriesHandler;
    use crate::shared::infrastructure::record_store::RosterStore;
    use crate::shared::infrastructure::record_store::in_memory::InMemoryRecordStore;
    use crate::shared::infrastructure::report_store::in_memory::InMemoryReportStore;
    use crate::shell::state::AppState;

    use super::handle;

    const BOUNDARY: &str = "test-boundary";

    fn state_with(store: Arc<InMemoryRecordStore>) -> AppState {
        let reports = Arc::new(InMemoryReportStore::new());
        AppState {
            time_entries: store.clone(),
            reports: reports.clone(),
            upload_time_entries: Arc::new(UploadTimeEntriesHandler::new(
                WeekPolicy::RangeColumn,
                store.clone(),
                store.clone(),
            )),
            upload_roster: Arc::new(UploadRosterHandler::new(store.clone())),
            generate_report: Arc::new(GenerateReportHandler::new(store, reports)),
        }
    }

    fn make_test_state() -> AppState {
        state_with(Arc::new(InMemoryRecordStore::new()))
    }

    fn make_offline_record_store_state() -> AppState {
        let mut store = InMemoryRecordStore::new();
        store.toggle_offline();
        state_with(Arc::new(store))
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/upload-time-entries", post(handle))
            .with_state(state)
    }

    fn multipart_upload(file_name: &str, contents: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             content-disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             content-type: text/csv\r\n\r\n\
             {contents}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::post("/upload-time-entries")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn it_should_return_200_with_counts_on_a_valid_upload() {
        let csv = "ProjX,ClientA,2024-01-01 - 2024-01-07,Alice,05:00:00,5.0\n\
                   ProjX,ClientA,2024-01-08 - 2024-01-14,Alice,03:00:00,3.0";

        let response = app(make_test_state())
            .oneshot(multipart_upload("hours.csv", csv))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["inserted"], 2);
        assert_eq!(json["mismatches"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn it_should_list_mismatches_for_wrongly_filed_users() {
        let store = Arc::new(InMemoryRecordStore::new());
        store
            .insert_members(&[RosterEntry {
                name: "Alice".to_string(),
                project: "ProjY".to_string(),
            }])
            .await
            .unwrap();
        let csv = "ProjX,ClientA,2024-01-01 - 2024-01-07,Alice,05:00:00,5.0";

        let response = app(state_with(store))
            .oneshot(multipart_upload("hours.csv", csv))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json["mismatches"],
            serde_json::json!([{
                "user": "Alice",
                "filed_project": "ProjX",
                "correct_project": "ProjY",
            }])
        );
    }

    #[tokio::test]
    async fn it_should_return_422_on_a_malformed_csv() {
        let response = app(make_test_state())
            .oneshot(multipart_upload("hours.csv", "not,enough,columns"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_file_part_is_missing() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             content-disposition: form-data; name=\"other\"\r\n\r\n\
             x\r\n\
             --{BOUNDARY}--\r\n"
        );
        let request = Request::post("/upload-time-entries")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app(make_test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn it_should_return_500_when_the_record_store_is_offline() {
        let csv = "ProjX,ClientA,2024-01-01 - 2024-01-07,Alice,05:00:00,5.0";

        let response = app(make_offline_record_store_state())
            .oneshot(multipart_upload("hours.csv", csv))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
