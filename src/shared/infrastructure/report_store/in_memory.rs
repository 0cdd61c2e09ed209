use tokio::sync::RwLock;

use crate::shared::infrastructure::report_store::{ReportStore, ReportStoreError};

#[derive(Default)]
pub struct InMemoryReportStore {
    bytes: RwLock<Option<Vec<u8>>>,
    is_offline: bool,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn check_online(&self) -> Result<(), ReportStoreError> {
        if self.is_offline {
            return Err(ReportStoreError::Backend("report store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn replace(&self, bytes: &[u8]) -> Result<(), ReportStoreError> {
        self.check_online()?;
        *self.bytes.write().await = Some(bytes.to_vec());
        Ok(())
    }

    async fn read(&self) -> Result<Vec<u8>, ReportStoreError> {
        self.check_online()?;
        self.bytes
            .read()
            .await
            .clone()
            .ok_or(ReportStoreError::NotFound)
    }

    async fn size_bytes(&self) -> Result<u64, ReportStoreError> {
        self.check_online()?;
        self.bytes
            .read()
            .await
            .as_ref()
            .map(|b| b.len() as u64)
            .ok_or(ReportStoreError::NotFound)
    }
}
