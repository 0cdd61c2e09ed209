use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::cohort_hours::use_cases::download_report::inbound::http as download_report_http;
use crate::modules::cohort_hours::use_cases::generate_report::inbound::http as generate_report_http;
use crate::modules::cohort_hours::use_cases::list_projects::inbound::http as list_projects_http;
use crate::modules::cohort_hours::use_cases::report_size::inbound::http as report_size_http;
use crate::modules::cohort_hours::use_cases::upload_roster::inbound::http as upload_roster_http;
use crate::modules::cohort_hours::use_cases::upload_time_entries::inbound::http as upload_time_entries_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/upload-roster", post(upload_roster_http::handle))
        .route(
            "/upload-time-entries",
            post(upload_time_entries_http::handle),
        )
        .route("/list-projects", get(list_projects_http::handle))
        .route("/generate-report", post(generate_report_http::handle))
        .route("/download-report", get(download_report_http::handle))
        .route("/report-size", get(report_size_http::handle))
        .with_state(state)
}

async fn banner() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
