//! Failures reported by the chat platform (membership, roles, channels, messages)

use thiserror::Error;

/// Outcome of a failed call to an external collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalError {
    /// The referenced guild, role, member, channel or message no longer exists
    #[error("Not found: {0}")]
    NotFound(String),

    /// The bot lacks the permission needed for the call
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Any other failure (network, rate limit, server error)
    #[error("External call failed: {0}")]
    Other(String),
}

impl ExternalError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn permission_denied(what: impl Into<String>) -> Self {
        Self::PermissionDenied(what.into())
    }

    pub fn other(what: impl Into<String>) -> Self {
        Self::Other(what.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// Get an error code string for logs and responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "EXTERNAL_NOT_FOUND",
            Self::PermissionDenied(_) => "EXTERNAL_PERMISSION_DENIED",
            Self::Other(_) => "EXTERNAL_FAILURE",
        }
    }
}

/// Result type for collaborator calls
pub type ExternalResult<T> = Result<T, ExternalError>;
