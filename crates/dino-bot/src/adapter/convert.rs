//! Conversions between serenity models and domain types

use dino_core::{Embed, EmbedField, ExternalError, MessageContent, PostedMessage, Snowflake};
use serenity::all::{
    ChannelId, Colour, CreateEmbed, CreateMessage, EditMessage, GuildId, Message, MessageId,
    RoleId, UserId,
};
use serenity::http::HttpError;
use serenity::model::ModelError;
use std::fmt;

pub fn guild_id(id: Snowflake) -> GuildId {
    GuildId::new(id.get())
}

pub fn user_id(id: Snowflake) -> UserId {
    UserId::new(id.get())
}

pub fn role_id(id: Snowflake) -> RoleId {
    RoleId::new(id.get())
}

pub fn channel_id(id: Snowflake) -> ChannelId {
    ChannelId::new(id.get())
}

pub fn message_id(id: Snowflake) -> MessageId {
    MessageId::new(id.get())
}

/// Any serenity id type into a domain id
pub fn snowflake(id: impl Into<u64>) -> Snowflake {
    Snowflake::new(id.into())
}

/// HTTP status of a failed REST call
fn http_status(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    }
}

/// Classify a serenity failure.
///
/// - HTTP 404 => `NotFound`
/// - HTTP 403 or a failed client-side permission check => `PermissionDenied`
/// - anything else => `Other`
pub fn external_error(err: serenity::Error, what: &str) -> ExternalError {
    if let serenity::Error::Model(ModelError::InvalidPermissions { .. }) = &err {
        return ExternalError::permission_denied(what);
    }
    status_error(http_status(&err), what, &err)
}

/// Classify a failed guild lookup.
///
/// Discord answers 403 Missing Access for a guild the bot is no longer a
/// member of, so both 403 and 404 mean the guild is gone.
pub fn guild_error(err: serenity::Error) -> ExternalError {
    guild_status_error(http_status(&err), &err)
}

fn status_error(status: Option<u16>, what: &str, err: &dyn fmt::Display) -> ExternalError {
    match status {
        Some(404) => ExternalError::not_found(what),
        Some(403) => ExternalError::permission_denied(what),
        _ => ExternalError::other(format!("{what}: {err}")),
    }
}

fn guild_status_error(status: Option<u16>, err: &dyn fmt::Display) -> ExternalError {
    match status {
        Some(403 | 404) => ExternalError::not_found("guild"),
        _ => status_error(status, "guild", err),
    }
}

pub fn create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    if let Some(color) = embed.color {
        builder = builder.colour(Colour::new(color));
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    builder
}

pub fn create_message(content: &MessageContent) -> CreateMessage {
    let mut builder = CreateMessage::new();
    if let Some(text) = &content.text {
        builder = builder.content(text);
    }
    if let Some(embed) = &content.embed {
        builder = builder.embed(create_embed(embed));
    }
    builder
}

/// Edit builder; parts left as `None` keep their current value
pub fn edit_message(content: &MessageContent) -> EditMessage {
    let mut builder = EditMessage::new();
    if let Some(text) = &content.text {
        builder = builder.content(text);
    }
    if let Some(embed) = &content.embed {
        builder = builder.embed(create_embed(embed));
    }
    builder
}

pub fn posted_message(message: Message) -> PostedMessage {
    PostedMessage {
        id: snowflake(message.id),
        channel_id: snowflake(message.channel_id),
        text: message.content,
        embeds: message
            .embeds
            .into_iter()
            .map(|embed| Embed {
                title: embed.title,
                description: embed.description,
                color: embed.colour.map(|c| c.0),
                fields: embed
                    .fields
                    .into_iter()
                    .map(|field| EmbedField {
                        name: field.name,
                        value: field.value,
                        inline: field.inline,
                    })
                    .collect(),
            })
            .collect(),
    }
}
