use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::modules::cohort_hours::core::report::{ReportMatrix, project_rows, render_csv};
use crate::shared::infrastructure::record_store::{StoreError, TimeEntryStore};
use crate::shared::infrastructure::report_store::{ReportStore, ReportStoreError};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Sink(#[from] ReportStoreError),
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReportOutcome {
    pub rows: usize,
    pub bytes: u64,
}

/// Builds the hours report for a list of projects and replaces the stored
/// artifact with the rendered CSV. The matrix is rebuilt from the record
/// store on every call so it always reflects the latest ingested batch.
pub struct GenerateReportHandler {
    entries: Arc<dyn TimeEntryStore>,
    reports: Arc<dyn ReportStore>,
}

impl GenerateReportHandler {
    pub fn new(entries: Arc<dyn TimeEntryStore>, reports: Arc<dyn ReportStore>) -> Self {
        Self { entries, reports }
    }

    /// Aggregates the selected projects into a matrix, one block per project
    /// in the order given. Unknown projects contribute a lone header row with
    /// no week cells.
    pub async fn aggregate(&self, projects: &[String]) -> Result<ReportMatrix, StoreError> {
        let mut matrix = ReportMatrix::default();
        for project in projects {
            let weeks = self.entries.week_starts(project).await?;
            let users = self.entries.users(project).await?;
            let entries = self.entries.entries_for_project(project).await?;
            matrix
                .rows
                .extend(project_rows(project, &weeks, &users, &entries));
        }
        Ok(matrix)
    }

    pub async fn handle(
        &self,
        projects: &[String],
        densest_first: bool,
    ) -> Result<ReportOutcome, ReportError> {
        let mut matrix = self.aggregate(projects).await?;
        if densest_first {
            matrix.sort_densest_first();
        }

        let bytes = render_csv(&matrix).map_err(|e| ReportError::Render(e.to_string()))?;
        self.reports.replace(&bytes).await?;

        info!(
            projects = projects.len(),
            rows = matrix.rows.len(),
            bytes = bytes.len(),
            "report rendered"
        );

        Ok(ReportOutcome {
            rows: matrix.rows.len(),
            bytes: bytes.len() as u64,
        })
    }
}
