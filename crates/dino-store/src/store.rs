//! Typed table access over a blob store

use dino_core::{BlobStore, DomainError, Snowflake, StoreResult};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::locks::{TableGuard, TableLocks};
use crate::tables::{Table, TableRow};

/// A table with its rows still undecoded
type RawTable = BTreeMap<Snowflake, Box<RawValue>>;

/// Handle to the persistent tables.
///
/// Cheap to clone; clones share the same backing store and lock registry.
/// Nothing is cached between calls: every read loads the full table and
/// every write replaces it. Rows are decoded one guild at a time, so a row
/// that fails to decode only affects its own guild.
#[derive(Clone)]
pub struct Store {
    blobs: Arc<dyn BlobStore>,
    locks: Arc<TableLocks>,
}

impl Store {
    pub fn new(blobs: impl BlobStore + 'static) -> Self {
        Self::from_arc(Arc::new(blobs))
    }

    pub fn from_arc(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            locks: Arc::new(TableLocks::new()),
        }
    }

    /// Load a table with undecoded rows. A missing or blank table is empty.
    async fn read_raw<T: Table>(&self) -> StoreResult<RawTable> {
        let Some(bytes) = self.blobs.load(T::NAME).await? else {
            return Ok(BTreeMap::new());
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn decode_row<T: Table>(guild_id: Snowflake, raw: &RawValue) -> StoreResult<T::Row> {
        serde_json::from_str(raw.get()).map_err(|e| {
            DomainError::Serialization(format!("{} row of guild {guild_id}: {e}", T::KIND))
        })
    }

    /// Load every decodable row of a table. Rows that fail to decode are
    /// logged and left out.
    pub async fn read_all<T: Table>(&self) -> StoreResult<BTreeMap<Snowflake, T::Row>> {
        let raw = self.read_raw::<T>().await?;
        let mut table = BTreeMap::new();
        for (guild_id, value) in raw {
            match Self::decode_row::<T>(guild_id, &value) {
                Ok(row) => {
                    table.insert(guild_id, row);
                }
                Err(e) => warn!(table = %T::KIND, guild_id = %guild_id, error = %e, "Skipping undecodable row"),
            }
        }
        Ok(table)
    }

    /// Load one guild's row, or the default row if the guild has none.
    ///
    /// Only this guild's row is decoded.
    pub async fn read_row<T: Table>(&self, guild_id: Snowflake) -> StoreResult<T::Row> {
        match self.read_raw::<T>().await?.get(&guild_id) {
            Some(raw) => Self::decode_row::<T>(guild_id, raw),
            None => Ok(T::Row::default()),
        }
    }

    /// Guild ids that currently have a row in the table
    pub async fn guild_ids<T: Table>(&self) -> StoreResult<Vec<Snowflake>> {
        Ok(self.read_raw::<T>().await?.into_keys().collect())
    }

    /// Replace one guild's row. A vacant row removes the guild from the table.
    ///
    /// The whole table is re-read and rewritten under the table's file lock, so
    /// writes for different guilds never overwrite each other. Other guilds'
    /// rows are written back exactly as they were read.
    #[instrument(skip(self, row), fields(table = %T::KIND))]
    pub async fn write_row<T: Table>(&self, guild_id: Snowflake, row: T::Row) -> StoreResult<()> {
        let _file = self.locks.lock_file(T::KIND).await;

        let mut table = self.read_raw::<T>().await?;
        if row.is_vacant() {
            table.remove(&guild_id);
        } else {
            table.insert(guild_id, serde_json::value::to_raw_value(&row)?);
        }

        let bytes = serde_json::to_vec_pretty(&table)?;
        self.blobs.save(T::NAME, &bytes).await?;
        debug!(guild_id = %guild_id, guilds = table.len(), "Row written");
        Ok(())
    }

    /// Drop a guild's row entirely
    pub async fn remove_row<T: Table>(&self, guild_id: Snowflake) -> StoreResult<()> {
        self.write_row::<T>(guild_id, T::Row::default()).await
    }

    /// Take the guild-scoped lock for a table.
    ///
    /// Hold the guard across a read, any external calls, and the final write.
    pub async fn lock<T: Table>(&self, guild_id: Snowflake) -> TableGuard {
        self.locks.lock_guild(T::KIND, guild_id).await
    }

    /// Lock, read, mutate and write back one guild's row
    pub async fn modify_row<T, R, F>(&self, guild_id: Snowflake, f: F) -> StoreResult<R>
    where
        T: Table,
        F: FnOnce(&mut T::Row) -> R,
    {
        let _guard = self.lock::<T>(guild_id).await;
        let mut row = self.read_row::<T>(guild_id).await?;
        let result = f(&mut row);
        self.write_row::<T>(guild_id, row).await?;
        Ok(result)
    }

    pub fn locks(&self) -> &TableLocks {
        &self.locks
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("guild_locks", &self.locks.guild_lock_count())
            .finish_non_exhaustive()
    }
}
