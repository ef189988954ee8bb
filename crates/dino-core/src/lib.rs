//! # dino-core
//!
//! Domain layer containing entities, value objects, errors and the collaborator traits
//! (storage, membership, messaging, clock). This crate has zero dependencies on
//! infrastructure (filesystem, Discord client, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    BirthdayEntry, ChannelInfo, Embed, EmbedAnchor, EmbedField, GuildBirthdays, GuildInfo,
    MemberInfo, MessageContent, PostedMessage, RoleInfo, RoleOption,
};
pub use error::{DomainError, ExternalError, ExternalResult};
pub use traits::{
    BlobStore, Clock, FixedClock, MembershipSystem, MessagingSystem, StoreResult, SystemClock,
};
pub use value_objects::{MonthDay, Snowflake, SnowflakeParseError, REFERENCE_YEAR};
