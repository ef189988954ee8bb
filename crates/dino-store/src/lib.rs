//! # dino-store
//!
//! Persistent Store: three JSON tables (role catalog, managed role assignments,
//! birthdays), each read fully on every access and rewritten fully on every mutation.
//!
//! ## Overview
//!
//! - **Blob stores**: `FileBlobStore` (one file per table, atomic replace) and
//!   `MemoryBlobStore` (tests, dry runs)
//! - **Tables**: typed rows keyed by guild id
//! - **Locks**: a guild-scoped lock per table for read-modify-write sequences that
//!   span external calls, plus a short file lock that serializes whole-table rewrites
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dino_store::{FileBlobStore, Store, RoleCatalog};
//!
//! let store = Store::new(FileBlobStore::open("./data").await?);
//! let options = store.read_row::<RoleCatalog>(guild_id).await?;
//!
//! let _guard = store.lock::<RoleCatalog>(guild_id).await;
//! let mut options = store.read_row::<RoleCatalog>(guild_id).await?;
//! options.push(option);
//! store.write_row::<RoleCatalog>(guild_id, options).await?;
//! ```

pub mod blob;
pub mod locks;
pub mod store;
pub mod tables;

// Re-export commonly used types
pub use blob::{FileBlobStore, MemoryBlobStore};
pub use locks::{TableGuard, TableLocks};
pub use store::Store;
pub use tables::{Birthdays, ManagedRoles, RoleCatalog, Table, TableKind, TableRow};
