use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::info;

use crate::shared::infrastructure::report_store::{ReportStore, ReportStoreError};

/// Filesystem-backed report store writing one well-known path. All access
/// goes through a single async mutex so concurrent generate requests cannot
/// interleave partial writes on the shared file.
pub struct FsReportStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FsReportStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn backend(e: std::io::Error) -> ReportStoreError {
    ReportStoreError::Backend(e.to_string())
}

#[async_trait::async_trait]
impl ReportStore for FsReportStore {
    async fn replace(&self, bytes: &[u8]) -> Result<(), ReportStoreError> {
        let _guard = self.lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(backend)?;
            }
        }
        tokio::fs::write(&self.path, bytes).await.map_err(backend)?;
        info!(path = %self.path.display(), bytes = bytes.len(), "report written");
        Ok(())
    }

    async fn read(&self) -> Result<Vec<u8>, ReportStoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ReportStoreError::NotFound),
            Err(e) => Err(backend(e)),
        }
    }

    async fn size_bytes(&self) -> Result<u64, ReportStoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ReportStoreError::NotFound),
            Err(e) => Err(backend(e)),
        }
    }
}
