//! Message entities - outgoing message content and fetched messages

use crate::value_objects::Snowflake;

/// Rich embed attached to a message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Content to send or to replace an existing message with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageContent {
    pub text: Option<String>,
    pub embed: Option<Embed>,
}

impl MessageContent {
    /// Plain text message
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            embed: None,
        }
    }

    /// Embed-only message
    pub fn embed(embed: Embed) -> Self {
        Self {
            text: None,
            embed: Some(embed),
        }
    }
}

/// A message that exists in a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub text: String,
    pub embeds: Vec<Embed>,
}
