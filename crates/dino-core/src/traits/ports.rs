//! Collaborator traits (ports) - define what the domain needs from the outside world
//!
//! The domain layer defines what it needs, and the storage and chat-platform
//! adapters provide the implementation.

use async_trait::async_trait;

use crate::entities::{ChannelInfo, GuildInfo, MemberInfo, MessageContent, PostedMessage, RoleInfo};
use crate::error::{DomainError, ExternalResult};
use crate::value_objects::Snowflake;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, DomainError>;

// ============================================================================
// Durable Storage
// ============================================================================

/// Byte store keyed by table name. Tables are read and written whole.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Load a table's full contents, `None` if it was never written
    async fn load(&self, table: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replace a table's full contents
    async fn save(&self, table: &str, bytes: &[u8]) -> StoreResult<()>;
}

// ============================================================================
// Membership / Role System
// ============================================================================

#[async_trait]
pub trait MembershipSystem: Send + Sync {
    /// Resolve a guild the bot can see
    async fn resolve_guild(&self, guild_id: Snowflake) -> ExternalResult<GuildInfo>;

    /// Resolve a role that currently exists in a guild
    async fn resolve_role(&self, guild_id: Snowflake, role_id: Snowflake) -> ExternalResult<RoleInfo>;

    /// Resolve a member from the local view (cache)
    async fn resolve_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ExternalResult<MemberInfo>;

    /// Resolve a member bypassing any cache
    async fn fetch_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ExternalResult<MemberInfo>;

    /// Grant a role to a member
    async fn add_role(&self, guild_id: Snowflake, user_id: Snowflake, role_id: Snowflake) -> ExternalResult<()>;

    /// Take a role away from a member
    async fn remove_role(&self, guild_id: Snowflake, user_id: Snowflake, role_id: Snowflake) -> ExternalResult<()>;

    /// Resolve a text channel within a guild
    async fn resolve_channel(&self, guild_id: Snowflake, channel_id: Snowflake) -> ExternalResult<ChannelInfo>;
}

// ============================================================================
// Messaging System
// ============================================================================

#[async_trait]
pub trait MessagingSystem: Send + Sync {
    /// Post a new message
    async fn send_message(&self, channel_id: Snowflake, content: &MessageContent) -> ExternalResult<PostedMessage>;

    /// Fetch an existing message by id
    async fn fetch_message(&self, channel_id: Snowflake, message_id: Snowflake) -> ExternalResult<PostedMessage>;

    /// Replace an existing message's content
    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        content: &MessageContent,
    ) -> ExternalResult<PostedMessage>;
}
