//! Counter Store - the one durable piece of state.
//!
//! Persists the number of job applications marked as applied today.
//! `FileCounterStore` keeps the tally as the decimal content of a single
//! text file; a missing file is a valid initial state and reads as zero.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("persisted counter is corrupt: `{content}` is not a non-negative integer")]
    Corrupt { content: String },
    #[error("counter storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Read, increment, and reset the daily application tally.
///
/// Implementations must make `increment` atomic with respect to concurrent
/// callers; two simultaneous clicks must never collapse into one count.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn read(&self) -> Result<u64, StoreError>;
    async fn increment(&self) -> Result<u64, StoreError>;
    async fn reset(&self) -> Result<u64, StoreError>;
}

/// File-backed store. All operations serialize behind one mutex so the
/// read-modify-write in `increment` cannot interleave.
pub struct FileCounterStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_unlocked(&self) -> Result<u64, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(0),
            Err(error) => return Err(StoreError::Io(error)),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StoreError::Corrupt { content: raw });
        }

        trimmed.parse::<u64>().map_err(|_| StoreError::Corrupt { content: trimmed.to_string() })
    }

    async fn persist_unlocked(&self, value: u64) -> Result<(), StoreError> {
        // Write to a sibling temp file and rename, so a crash mid-write
        // cannot leave a half-written counter behind.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, value.to_string()).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CounterStore for FileCounterStore {
    async fn read(&self) -> Result<u64, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    async fn increment(&self) -> Result<u64, StoreError> {
        let _guard = self.lock.lock().await;
        let next = self.read_unlocked().await?.saturating_add(1);
        self.persist_unlocked(next).await?;
        Ok(next)
    }

    async fn reset(&self) -> Result<u64, StoreError> {
        let _guard = self.lock.lock().await;
        self.persist_unlocked(0).await?;
        Ok(0)
    }
}

/// In-memory store for tests and wiring without durable state.
#[derive(Default)]
pub struct InMemoryCounterStore {
    count: Mutex<u64>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(count: u64) -> Self {
        Self { count: Mutex::new(count) }
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn read(&self) -> Result<u64, StoreError> {
        Ok(*self.count.lock().await)
    }

    async fn increment(&self) -> Result<u64, StoreError> {
        let mut count = self.count.lock().await;
        *count = count.saturating_add(1);
        Ok(*count)
    }

    async fn reset(&self) -> Result<u64, StoreError> {
        let mut count = self.count.lock().await;
        *count = 0;
        Ok(0)
    }
}
