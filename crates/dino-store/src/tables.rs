//! Table definitions
//!
//! Every table is a JSON object keyed by guild id. A guild's row is the unit of
//! locking; the table file is the unit of I/O.

use dino_core::{GuildBirthdays, RoleOption, Snowflake};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Identifies a table for locking and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    RoleCatalog,
    ManagedRoles,
    Birthdays,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoleCatalog => write!(f, "role_catalog"),
            Self::ManagedRoles => write!(f, "managed_roles"),
            Self::Birthdays => write!(f, "birthdays"),
        }
    }
}

/// A guild's slice of a table
pub trait TableRow: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// A vacant row is dropped from the table instead of being written
    fn is_vacant(&self) -> bool;
}

impl TableRow for Vec<RoleOption> {
    fn is_vacant(&self) -> bool {
        self.is_empty()
    }
}

impl TableRow for BTreeMap<Snowflake, Snowflake> {
    fn is_vacant(&self) -> bool {
        self.is_empty()
    }
}

impl TableRow for GuildBirthdays {
    fn is_vacant(&self) -> bool {
        self.is_empty()
    }
}

/// A persisted table: `{guild_id: Row}` stored under `NAME`
pub trait Table: Send + Sync + 'static {
    const NAME: &'static str;
    const KIND: TableKind;
    type Row: TableRow;
}

/// Role catalog: ordered self-assignable roles per guild (`roles.json`)
pub struct RoleCatalog;

impl Table for RoleCatalog {
    const NAME: &'static str = "roles.json";
    const KIND: TableKind = TableKind::RoleCatalog;
    type Row = Vec<RoleOption>;
}

/// Managed role assignments: `user_id -> role_id` per guild (`user_roles.json`)
pub struct ManagedRoles;

impl Table for ManagedRoles {
    const NAME: &'static str = "user_roles.json";
    const KIND: TableKind = TableKind::ManagedRoles;
    type Row = BTreeMap<Snowflake, Snowflake>;
}

/// Birthday records, list channel and list anchor per guild (`birthdays.json`)
pub struct Birthdays;

impl Table for Birthdays {
    const NAME: &'static str = "birthdays.json";
    const KIND: TableKind = TableKind::Birthdays;
    type Row = GuildBirthdays;
}
