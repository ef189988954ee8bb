//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Guild not found: {0}")]
    GuildNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Role not found: {0}")]
    RoleNotFound(Snowflake),

    #[error("Member not found in guild")]
    MemberNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid birthday: {0}")]
    InvalidBirthday(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Message has no embed to update")]
    NoEmbed,

    #[error("Nothing to update: provide a title or a description")]
    NothingToUpdate,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Birthday already set")]
    BirthdayAlreadySet,

    #[error("Role already in catalog: {0}")]
    DuplicateRole(Snowflake),

    #[error("Role not in catalog: {0}")]
    RoleNotCataloged(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Get an error code string for logs and responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::GuildNotFound(_) => "UNKNOWN_GUILD",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::MemberNotFound => "UNKNOWN_MEMBER",

            // Validation
            Self::InvalidBirthday(_) => "INVALID_BIRTHDAY",
            Self::InvalidId(_) => "INVALID_ID",
            Self::NoEmbed => "NO_EMBED",
            Self::NothingToUpdate => "NOTHING_TO_UPDATE",

            // Conflict
            Self::BirthdayAlreadySet => "BIRTHDAY_ALREADY_SET",
            Self::DuplicateRole(_) => "DUPLICATE_ROLE",
            Self::RoleNotCataloged(_) => "ROLE_NOT_CATALOGED",

            // Infrastructure
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GuildNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MessageNotFound(_)
                | Self::RoleNotFound(_)
                | Self::MemberNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidBirthday(_) | Self::InvalidId(_) | Self::NoEmbed | Self::NothingToUpdate
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::BirthdayAlreadySet | Self::DuplicateRole(_) | Self::RoleNotCataloged(_)
        )
    }

    /// Check if this is an infrastructure error
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Serialization(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
