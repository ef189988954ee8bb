//! Interaction response helpers

use dino_core::Snowflake;
use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, Permissions, ResolvedOption, ResolvedValue,
};

use super::error::HandlerResult;
use crate::adapter::convert::snowflake;

/// Answer with a message only the invoking member sees
pub async fn ephemeral(
    ctx: &Context,
    command: &CommandInteraction,
    text: impl Into<String>,
) -> HandlerResult<()> {
    let message = CreateInteractionResponseMessage::new()
        .content(text)
        .ephemeral(true);
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

/// Acknowledge now and answer later with `finish`
pub async fn defer(ctx: &Context, command: &CommandInteraction) -> HandlerResult<()> {
    command.defer_ephemeral(&ctx.http).await?;
    Ok(())
}

/// Replace the deferred acknowledgment with the final text
pub async fn finish(
    ctx: &Context,
    command: &CommandInteraction,
    text: impl Into<String>,
) -> HandlerResult<()> {
    command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(text))
        .await?;
    Ok(())
}

/// Check the invoking member's permissions in the channel
pub fn has_permission(command: &CommandInteraction, required: Permissions) -> bool {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|perms| perms.administrator() || perms.contains(required))
}

fn find<'a>(options: &'a [ResolvedOption<'a>], name: &str) -> Option<&'a ResolvedValue<'a>> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub fn string_option<'a>(options: &'a [ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    match find(options, name)? {
        ResolvedValue::String(value) => Some(*value),
        _ => None,
    }
}

/// Role option as `(id, name)`
pub fn role_option(options: &[ResolvedOption<'_>], name: &str) -> Option<(Snowflake, String)> {
    match find(options, name)? {
        ResolvedValue::Role(role) => Some((snowflake(role.id), role.name.clone())),
        _ => None,
    }
}

pub fn channel_option(options: &[ResolvedOption<'_>], name: &str) -> Option<Snowflake> {
    match find(options, name)? {
        ResolvedValue::Channel(channel) => Some(snowflake(channel.id)),
        _ => None,
    }
}

/// `<#id>` channel mention
pub fn channel_mention(channel_id: Snowflake) -> String {
    format!("<#{channel_id}>")
}
