//! Operation inputs that carry more than ids

use dino_core::Snowflake;

/// Admin edit of an existing message's first embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEmbedRequest {
    pub channel_id: Snowflake,
    /// Raw message id as typed by the admin
    pub message_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
}
