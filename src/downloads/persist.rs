// Download counter persistence
// Flat JSON file on disk, or nothing at all on read-only deployments

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

/// Counter snapshot as persisted
pub type Counts = BTreeMap<String, u64>;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Failed to access counter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Counter file {path} is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where counter snapshots are loaded from and flushed to
#[async_trait]
pub trait CounterPersistence: Send + Sync {
    /// Short description for logs
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Counts, DownloadError>;

    async fn flush(&self, counts: &Counts) -> Result<(), DownloadError>;
}

/// Persistence for environments without durable storage
pub struct NoopPersistence;

#[async_trait]
impl CounterPersistence for NoopPersistence {
    fn describe(&self) -> String {
        "in-memory only".to_string()
    }

    async fn load(&self) -> Result<Counts, DownloadError> {
        Ok(Counts::new())
    }

    async fn flush(&self, _counts: &Counts) -> Result<(), DownloadError> {
        Ok(())
    }
}

/// JSON file holding `{ "assetId": count }`
pub struct FilePersistence {
    path: PathBuf,
    /// One writer at a time on the shared temp file
    write_lock: Mutex<()>,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn io_error(&self, source: io::Error) -> DownloadError {
        DownloadError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl CounterPersistence for FilePersistence {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn load(&self) -> Result<Counts, DownloadError> {
        let content = match fs::read(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Counts::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Counts::new());
        }
        serde_json::from_slice(&content).map_err(|source| DownloadError::Format {
            path: self.path.clone(),
            source,
        })
    }

    async fn flush(&self, counts: &Counts) -> Result<(), DownloadError> {
        let content = serde_json::to_vec_pretty(counts).map_err(|source| DownloadError::Format {
            path: self.path.clone(),
            source,
        })?;

        // Write beside the target, then swap it in
        let _guard = self.write_lock.lock().await;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }
}
