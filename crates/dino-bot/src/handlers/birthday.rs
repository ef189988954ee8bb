//! Birthday commands

use dino_core::Snowflake;
use dino_service::{
    display, BirthdayService, EditEmbedRequest, EmbedService, RenderOutcome, ServiceContext,
};
use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Permissions,
};
use tracing::warn;

use super::error::{HandlerError, HandlerResult};
use super::reply;
use crate::adapter::convert::{self, snowflake};

/// `/birthday <date>`
pub async fn register(
    services: &ServiceContext,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: Snowflake,
) -> HandlerResult<()> {
    let options = command.data.options();
    let date = reply::string_option(&options, "date").ok_or(HandlerError::MissingOption("date"))?;
    let user_id = snowflake(command.user.id);

    reply::defer(ctx, command).await?;

    let text = match BirthdayService::new(services)
        .set_birthday(guild_id, user_id, date)
        .await
    {
        Ok(registered) => registered.message(),
        Err(e) => e.user_message(),
    };
    reply::finish(ctx, command, text).await
}

/// `/set_birthday_channel <channel>`
pub async fn set_channel(
    services: &ServiceContext,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: Snowflake,
) -> HandlerResult<()> {
    if !reply::has_permission(command, Permissions::MANAGE_CHANNELS) {
        return reply::ephemeral(ctx, command, "You need the Manage Channels permission to do that.").await;
    }
    let options = command.data.options();
    let channel_id =
        reply::channel_option(&options, "channel").ok_or(HandlerError::MissingOption("channel"))?;

    reply::defer(ctx, command).await?;

    let text = match BirthdayService::new(services)
        .set_channel(guild_id, channel_id)
        .await
    {
        Ok(outcome) => {
            if let RenderOutcome::SendFailed { reason } = &outcome {
                warn!(guild_id = %guild_id, channel_id = %channel_id, reason = %reason, "Birthday list not posted");
            }
            format!(
                "Birthday messages will now be sent to and updated in {}.",
                reply::channel_mention(channel_id)
            )
        }
        Err(e) => e.user_message(),
    };
    reply::finish(ctx, command, text).await
}

/// `/send_birthday_embed <channel>`
pub async fn send_embed(
    services: &ServiceContext,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: Snowflake,
) -> HandlerResult<()> {
    if !reply::has_permission(command, Permissions::ADMINISTRATOR) {
        return reply::ephemeral(ctx, command, "You need administrator permissions to do that.").await;
    }
    let options = command.data.options();
    let channel_id =
        reply::channel_option(&options, "channel").ok_or(HandlerError::MissingOption("channel"))?;

    reply::defer(ctx, command).await?;

    let text = match EmbedService::new(services).publish(guild_id, channel_id).await {
        Ok(outcome) if outcome.channel_changed => format!(
            "Birthday channel set to {}. {}",
            reply::channel_mention(channel_id),
            outcome.message()
        ),
        Ok(outcome) => outcome.message(),
        Err(e) => e.user_message(),
    };
    reply::finish(ctx, command, text).await
}

/// `/birthday_help`
pub async fn help(ctx: &Context, command: &CommandInteraction) -> HandlerResult<()> {
    let embed = convert::create_embed(&display::birthday_help());
    let message = CreateInteractionResponseMessage::new().embed(embed);
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

/// `/update_embed_command <channel> <message_id> [title] [description]`
pub async fn update_embed(
    services: &ServiceContext,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: Snowflake,
) -> HandlerResult<()> {
    if !reply::has_permission(command, Permissions::ADMINISTRATOR) {
        return reply::ephemeral(ctx, command, "You need administrator permissions to do that.").await;
    }
    let options = command.data.options();
    let channel_id =
        reply::channel_option(&options, "channel").ok_or(HandlerError::MissingOption("channel"))?;
    let message_id = reply::string_option(&options, "message_id")
        .ok_or(HandlerError::MissingOption("message_id"))?;

    let request = EditEmbedRequest {
        channel_id,
        message_id: message_id.to_string(),
        title: reply::string_option(&options, "title").map(str::to_string),
        description: reply::string_option(&options, "description").map(str::to_string),
    };

    reply::defer(ctx, command).await?;

    let text = match EmbedService::new(services).edit_embed(guild_id, request).await {
        Ok(edited) => edited.message(),
        Err(e) => e.user_message(),
    };
    reply::finish(ctx, command, text).await
}
