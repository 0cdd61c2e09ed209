use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::modules::cohort_hours::core::ingest::{WeekSource, parse_time_entries};
use crate::modules::cohort_hours::core::reconcile::reconcile;
use crate::modules::cohort_hours::core::records::Mismatch;
use crate::modules::cohort_hours::core::week::{WeekPolicy, week_start_from_file_name};
use crate::shared::infrastructure::record_store::{RosterStore, StoreError, TimeEntryStore};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, PartialEq, Eq)]
pub struct IngestOutcome {
    pub inserted: u64,
    pub mismatches: Vec<Mismatch>,
}

/// Ingests one time-tracking export: parse, reconcile against the roster,
/// insert with duplicate skipping. Parsing and reconciliation both run before
/// any write, so a malformed file never leaves a partial batch behind.
pub struct UploadTimeEntriesHandler {
    policy: WeekPolicy,
    entries: Arc<dyn TimeEntryStore>,
    roster: Arc<dyn RosterStore>,
}

impl UploadTimeEntriesHandler {
    pub fn new(
        policy: WeekPolicy,
        entries: Arc<dyn TimeEntryStore>,
        roster: Arc<dyn RosterStore>,
    ) -> Self {
        Self {
            policy,
            entries,
            roster,
        }
    }

    pub async fn handle(&self, file_name: &str, bytes: &[u8]) -> Result<IngestOutcome, IngestError> {
        let week = match self.policy {
            WeekPolicy::RangeColumn => WeekSource::RangeColumn,
            WeekPolicy::FileName => WeekSource::Uniform(
                week_start_from_file_name(file_name)
                    .map_err(|e| IngestError::MalformedInput(e.to_string()))?,
            ),
        };

        let parsed = parse_time_entries(bytes, &week)
            .map_err(|e| IngestError::MalformedInput(e.to_string()))?;

        let roster = self.roster.members().await?;
        let mismatches = reconcile(&parsed, &roster);
        let inserted = self.entries.insert_entries(&parsed).await?;

        info!(
            file = %file_name,
            rows = parsed.len(),
            inserted,
            mismatches = mismatches.len(),
            "time entries ingested"
        );

        Ok(IngestOutcome {
            inserted,
            mismatches,
        })
    }
}
