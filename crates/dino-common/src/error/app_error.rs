//! Application error types
//!
//! Errors that can stop the bot process: configuration, storage setup and the gateway connection.
//! Per-interaction failures never reach this type; they are reported to the invoking user.

use dino_core::DomainError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Discord gateway errors
    #[error("Gateway error: {0}")]
    Gateway(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Gateway(_) => "GATEWAY_ERROR",
            Self::Domain(e) => e.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Process exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78, // EX_CONFIG
            Self::Storage(_) | Self::Domain(_) => 74, // EX_IOERR
            Self::Gateway(_) => 69, // EX_UNAVAILABLE
            Self::Internal(_) => 70, // EX_SOFTWARE
        }
    }

    /// Create a gateway error
    #[must_use]
    pub fn gateway(msg: impl std::fmt::Display) -> Self {
        Self::Gateway(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
