use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use cohort_hours::modules::cohort_hours::use_cases::generate_report::handler::GenerateReportHandler;
use cohort_hours::modules::cohort_hours::use_cases::upload_roster::handler::UploadRosterHandler;
use cohort_hours::modules::cohort_hours::use_cases::upload_time_entries::handler::UploadTimeEntriesHandler;
use cohort_hours::shared::infrastructure::record_store::sqlite::SqliteRecordStore;
use cohort_hours::shared::infrastructure::record_store::{RosterStore, TimeEntryStore};
use cohort_hours::shared::infrastructure::report_store::ReportStore;
use cohort_hours::shared::infrastructure::report_store::fs::FsReportStore;
use cohort_hours::shell::config::Config;
use cohort_hours::shell::http::router;
use cohort_hours::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;

    let record_store = Arc::new(SqliteRecordStore::open(&config.db_path())?);
    let time_entries: Arc<dyn TimeEntryStore> = record_store.clone();
    let roster: Arc<dyn RosterStore> = record_store;
    let reports: Arc<dyn ReportStore> = Arc::new(FsReportStore::new(config.report_path()));

    let state = AppState {
        time_entries: time_entries.clone(),
        reports: reports.clone(),
        upload_time_entries: Arc::new(UploadTimeEntriesHandler::new(
            config.week_policy,
            time_entries.clone(),
            roster.clone(),
        )),
        upload_roster: Arc::new(UploadRosterHandler::new(roster)),
        generate_report: Arc::new(GenerateReportHandler::new(time_entries, reports)),
    };

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!(
        addr = %config.bind_addr,
        policy = ?config.week_policy,
        data_dir = %config.data_dir.display(),
        "cohort hours service listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
