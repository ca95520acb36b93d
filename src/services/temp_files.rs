use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Scratch directory for generated documents. Every file written here is
/// deleted shortly after it has been read back.
#[derive(Clone, Debug)]
pub struct TempFileStore {
    dir: PathBuf,
    cleanup_delay: Duration,
}

impl TempFileStore {
    pub fn new(dir: impl Into<PathBuf>, cleanup_delay: Duration) -> Self {
        Self {
            dir: dir.into(),
            cleanup_delay,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Unique per call, so concurrent requests never share a file.
    pub fn unique_name(stem: &str) -> String {
        format!(
            "{}-{}-{}.pptx",
            stem,
            Utc::now().format("%Y%m%dT%H%M%S%3f"),
            Uuid::new_v4()
        )
    }

    pub async fn write(&self, stem: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        let path = self.dir.join(Self::unique_name(stem));
        self.write_at(&path, bytes).await?;
        Ok(path)
    }

    async fn write_at(&self, path: &Path, bytes: &[u8]) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::FilesystemError(format!(
                "Failed to create output directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;
        tokio::fs::write(path, bytes).await.map_err(|e| {
            AppError::FilesystemError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    pub async fn read(&self, path: &Path) -> AppResult<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| {
            AppError::FilesystemError(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    /// Deletes `path` after the configured delay on a detached task.
    /// Failures are logged and never reach the caller.
    pub fn schedule_cleanup(&self, path: PathBuf) {
        let delay = self.cleanup_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => log::debug!("Removed temporary file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("Failed to remove temporary file {}: {}", path.display(), e),
            }
        });
    }

    /// Writes the document to disk and reads it back for the response.
    /// The round trip runs on its own task so that dropping the caller's
    /// future cannot skip the cleanup, and a failed write is cleaned up too.
    pub async fn persist_and_load(&self, stem: &str, bytes: &[u8]) -> AppResult<Vec<u8>> {
        let store = self.clone();
        let path = self.dir.join(Self::unique_name(stem));
        let bytes = bytes.to_vec();

        let round_trip = tokio::spawn(async move {
            let loaded = match store.write_at(&path, &bytes).await {
                Ok(()) => store.read(&path).await,
                Err(e) => Err(e),
            };
            store.schedule_cleanup(path);
            loaded
        });

        round_trip
            .await
            .map_err(|e| AppError::InternalError(format!("Temporary file task failed: {}", e)))?
    }
}
