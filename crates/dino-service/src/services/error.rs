//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use dino_common::AppError;
use dino_core::{DomainError, ExternalError};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Chat platform call failed and could not be recovered from
    External(ExternalError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Conflict (e.g., duplicate resource)
    Conflict(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::External(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::External(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if the bot lacked a permission on the chat platform
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::External(e) if e.is_permission_denied())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::External(e) => e.code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Acknowledgment text shown to the member who triggered the operation
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => match e {
                DomainError::InvalidBirthday(_) => {
                    "Invalid date format. Please use MM/DD (e.g., 01/15).".to_string()
                }
                DomainError::BirthdayAlreadySet => {
                    "You have already added your birthday. You can only set it once.".to_string()
                }
                DomainError::DuplicateRole(_) => "That role is already in the dropdown.".to_string(),
                DomainError::RoleNotCataloged(_) => "That role is not in the dropdown.".to_string(),
                DomainError::RoleNotFound(_) => {
                    "The selected role was not found on this server.".to_string()
                }
                DomainError::GuildNotFound(_) => "This server is not available.".to_string(),
                DomainError::ChannelNotFound(_) => "That channel could not be found.".to_string(),
                DomainError::MemberNotFound => "Could not find you in this server.".to_string(),
                DomainError::MessageNotFound(_) => {
                    "Message not found in the specified channel.".to_string()
                }
                DomainError::NoEmbed => {
                    "The specified message does not contain any embeds.".to_string()
                }
                DomainError::NothingToUpdate => {
                    "Please provide either a `title` or `description` to update the embed."
                        .to_string()
                }
                DomainError::InvalidId(_) => {
                    "Invalid Message ID. Please provide a valid numerical ID.".to_string()
                }
                DomainError::Storage(_) | DomainError::Serialization(_) => {
                    "Something went wrong while saving. Please try again later.".to_string()
                }
            },
            Self::External(ExternalError::PermissionDenied(_)) => {
                "I don't have the permissions needed to do that.".to_string()
            }
            Self::External(ExternalError::NotFound(what)) => format!("{what} no longer exists."),
            Self::External(ExternalError::Other(msg)) => format!("An error occurred: {msg}"),
            Self::NotFound { resource, .. } => format!("{resource} not found."),
            Self::Validation(msg) | Self::Conflict(msg) => msg.clone(),
            Self::Internal(_) => "Something went wrong. Please try again later.".to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ExternalError> for ServiceError {
    fn from(err: ExternalError) -> Self {
        Self::External(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::External(e) => AppError::gateway(e),
            other => AppError::Internal(anyhow::anyhow!(other.to_string())),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
