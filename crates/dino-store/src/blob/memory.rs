//! In-memory table storage

use async_trait::async_trait;
use dino_core::{BlobStore, StoreResult};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Keeps tables in process memory
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    tables: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw contents of a table
    pub fn snapshot(&self, table: &str) -> Option<Vec<u8>> {
        self.tables.lock().get(table).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn load(&self, table: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.snapshot(table))
    }

    async fn save(&self, table: &str, bytes: &[u8]) -> StoreResult<()> {
        self.tables.lock().insert(table.to_string(), bytes.to_vec());
        Ok(())
    }
}
