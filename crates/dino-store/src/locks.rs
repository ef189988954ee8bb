//! Lock registry for table access
//!
//! Uses `DashMap` so locks are created lazily per guild without a global lock.

use dashmap::DashMap;
use dino_core::Snowflake;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::tables::TableKind;

/// Holds a guild-scoped table lock until dropped
#[derive(Debug)]
pub struct TableGuard {
    kind: TableKind,
    guild_id: Snowflake,
    _guard: OwnedMutexGuard<()>,
}

impl TableGuard {
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }
}

impl Drop for TableGuard {
    fn drop(&mut self) {
        tracing::trace!(table = %self.kind, guild_id = %self.guild_id, "Table lock released");
    }
}

/// Lock registry
///
/// - Guild locks (`(table, guild)`): held across a whole read-modify-write sequence,
///   including the external calls made in between.
/// - File locks (`table`): held only while a table file is rewritten.
///
/// Acquisition order is always guild lock first, then file lock.
#[derive(Debug, Default)]
pub struct TableLocks {
    guilds: DashMap<(TableKind, Snowflake), Arc<Mutex<()>>>,
    files: DashMap<TableKind, Arc<Mutex<()>>>,
}

impl TableLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one guild's row of a table
    pub async fn lock_guild(&self, kind: TableKind, guild_id: Snowflake) -> TableGuard {
        // Clone the Arc out so no DashMap shard lock is held while awaiting
        let mutex = self
            .guilds
            .entry((kind, guild_id))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;
        tracing::trace!(table = %kind, guild_id = %guild_id, "Table lock acquired");

        TableGuard {
            kind,
            guild_id,
            _guard: guard,
        }
    }

    /// Acquire the lock for rewriting a whole table file
    pub async fn lock_file(&self, kind: TableKind) -> OwnedMutexGuard<()> {
        let mutex = self
            .files
            .entry(kind)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }

    /// Number of guild locks created so far
    pub fn guild_lock_count(&self) -> usize {
        self.guilds.len()
    }
}
