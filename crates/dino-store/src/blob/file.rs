//! Filesystem-backed table storage
//!
//! Each table is a single file `{data_dir}/{table}`. Writes go to `{table}.tmp`
//! first and are renamed over the target, so readers never see a partial table.

use async_trait::async_trait;
use dino_core::{BlobStore, DomainError, StoreResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Stores tables as files in a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open (and create if needed) the data directory
    pub async fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("create data directory", &dir, &e))?;
        info!("Table storage directory: {}", dir.display());
        Ok(Self { dir })
    }

    /// Path to the file for a given table
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(table)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn load(&self, table: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.table_path(table);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(table, "Table file missing, treating as empty");
                Ok(None)
            }
            Err(e) => Err(storage_error("read", &path, &e)),
        }
    }

    async fn save(&self, table: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.table_path(table);
        let tmp = self.dir.join(format!("{table}.tmp"));

        fs::write(&tmp, bytes)
            .await
            .map_err(|e| storage_error("write", &tmp, &e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| storage_error("replace", &path, &e))?;

        debug!(table, bytes = bytes.len(), "Table written");
        Ok(())
    }
}

fn storage_error(action: &str, path: &Path, err: &std::io::Error) -> DomainError {
    DomainError::Storage(format!("failed to {action} {}: {err}", path.display()))
}
