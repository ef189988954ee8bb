//! Handler error types

use thiserror::Error;

/// Failures while answering an interaction.
///
/// Service failures are reported to the member and never surface here; these
/// are problems talking back to Discord or malformed interactions.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Discord rejected the response
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// A required option was missing or had the wrong type
    #[error("Missing option: {0}")]
    MissingOption(&'static str),

    /// Interaction type or name this bot does not handle
    #[error("Unknown interaction: {0}")]
    Unknown(String),
}

/// Result type for handlers
pub type HandlerResult<T> = Result<T, HandlerError>;
