use std::sync::Arc;

use crate::modules::cohort_hours::use_cases::generate_report::handler::GenerateReportHandler;
use crate::modules::cohort_hours::use_cases::upload_roster::handler::UploadRosterHandler;
use crate::modules::cohort_hours::use_cases::upload_time_entries::handler::UploadTimeEntriesHandler;
use crate::shared::infrastructure::record_store::TimeEntryStore;
use crate::shared::infrastructure::report_store::ReportStore;

#[derive(Clone)]
pub struct AppState {
    pub time_entries: Arc<dyn TimeEntryStore>,
    pub reports: Arc<dyn ReportStore>,
    pub upload_time_entries: Arc<UploadTimeEntriesHandler>,
    pub upload_roster: Arc<UploadRosterHandler>,
    pub generate_report: Arc<GenerateReportHandler>,
}
