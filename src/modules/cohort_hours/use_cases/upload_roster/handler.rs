use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::modules::cohort_hours::core::ingest::parse_roster;
use crate::shared::infrastructure::record_store::{RosterStore, StoreError};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ingests a roster export, skipping `(name, project)` pairs that are
/// already present.
pub struct UploadRosterHandler {
    roster: Arc<dyn RosterStore>,
}

impl UploadRosterHandler {
    pub fn new(roster: Arc<dyn RosterStore>) -> Self {
        Self { roster }
    }

    pub async fn handle(&self, file_name: &str, bytes: &[u8]) -> Result<u64, IngestError> {
        let parsed =
            parse_roster(bytes).map_err(|e| IngestError::MalformedInput(e.to_string()))?;
        let inserted = self.roster.insert_members(&parsed).await?;

        info!(
            file = %file_name,
            rows = parsed.len(),
            inserted,
            "roster ingested"
        );

        Ok(inserted)
    }
}
