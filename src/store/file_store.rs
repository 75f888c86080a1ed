use crate::store::key_value::{KeyValueStore, StoreError};
use async_trait::async_trait;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};
use tracing::{debug, instrument};

const EXTENSION: &str = "fix";

/// Stores every key as a one-line file `<key>.fix` inside `directory`.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        FileStore {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", key, EXTENSION))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self, value))]
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let directory = self.directory.clone();
        let contents = format!("{}\n", value.trim_end());

        task::spawn_blocking(move || {
            write_atomically(&directory, &path, contents.as_bytes()).map_err(|source| StoreError::Write { source, path })
        })
        .await??;

        debug!("💾 Stored '{}'", key);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(contents.lines().next().map(str::to_string)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("💾 Nothing stored for '{}'", key);
                Ok(None)
            }
            Err(source) => Err(StoreError::Read { source, path }),
        }
    }
}

/// Writes to a temporary file next to `path`, syncs it, then renames it over `path`.
fn write_atomically(directory: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    std::fs::create_dir_all(directory)?;

    let mut temp = NamedTempFile::new_in(directory)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    #[cfg(unix)]
    if let Ok(dir) = std::fs::File::open(directory) {
        let _ = dir.sync_all();
    }
    Ok(())
}
