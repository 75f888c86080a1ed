use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::task::JoinError;

/// Single-slot-per-key durable storage.
///
/// `put` replaces the value atomically: a concurrent `get` observes either the previous or the new value, never a
/// partial write.
#[async_trait]
pub trait KeyValueStore: Debug + Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Returns `None` when nothing was ever stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not read '{}': {}", path.display(), source)]
    Read { source: io::Error, path: PathBuf },
    #[error("could not write '{}': {}", path.display(), source)]
    Write { source: io::Error, path: PathBuf },
    #[error(transparent)]
    JoinError(#[from] JoinError),
}
