// Port for the single well-known report artifact. The latest rendered CSV
// replaces the previous one; downloads always see the most recent complete
// write.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportStoreError {
    #[error("no report has been generated yet")]
    NotFound,

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Replaces the stored report with `bytes`.
    async fn replace(&self, bytes: &[u8]) -> Result<(), ReportStoreError>;

    /// Returns the most recently stored report.
    async fn read(&self) -> Result<Vec<u8>, ReportStoreError>;

    /// Byte length of the most recently stored report.
    async fn size_bytes(&self) -> Result<u64, ReportStoreError>;
}

pub mod fs;
pub mod in_memory;
