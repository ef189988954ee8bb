//! Interaction handlers
//!
//! Routes slash commands and the role menu to the services and answers the
//! invoking member.

mod birthday;
mod error;
mod reply;
mod roles;

pub use error::{HandlerError, HandlerResult};

use crate::adapter::convert::snowflake;
use crate::commands;
use dino_service::ServiceContext;
use serenity::all::{CommandInteraction, Context, Interaction};

/// Dispatch interactions to the matching handler
pub struct InteractionDispatcher;

impl InteractionDispatcher {
    /// Handle one incoming interaction
    pub async fn dispatch(
        services: &ServiceContext,
        ctx: &Context,
        interaction: Interaction,
    ) -> HandlerResult<()> {
        match interaction {
            Interaction::Command(command) => Self::command(services, ctx, &command).await,
            Interaction::Component(component) if component.data.custom_id == commands::ROLE_SELECT => {
                roles::select(services, ctx, &component).await
            }
            Interaction::Component(component) => {
                tracing::debug!(custom_id = %component.data.custom_id, "Ignoring unknown component");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn command(
        services: &ServiceContext,
        ctx: &Context,
        command: &CommandInteraction,
    ) -> HandlerResult<()> {
        let name = command.data.name.as_str();

        // Help is the only command that works without a server
        if name == commands::BIRTHDAY_HELP {
            return birthday::help(ctx, command).await;
        }

        let Some(guild_id) = command.guild_id.map(snowflake) else {
            return reply::ephemeral(ctx, command, "This command can only be used in a server.").await;
        };

        tracing::debug!(guild_id = %guild_id, command = name, "Handling command");

        match name {
            commands::ROLES => roles::menu(services, ctx, command, guild_id).await,
            commands::ADD_ROLE => roles::add(services, ctx, command, guild_id).await,
            commands::REMOVE_ROLE => roles::remove(services, ctx, command, guild_id).await,
            commands::BIRTHDAY => birthday::register(services, ctx, command, guild_id).await,
            commands::SET_BIRTHDAY_CHANNEL => {
                birthday::set_channel(services, ctx, command, guild_id).await
            }
            commands::SEND_BIRTHDAY_EMBED => {
                birthday::send_embed(services, ctx, command, guild_id).await
            }
            commands::UPDATE_EMBED => birthday::update_embed(services, ctx, command, guild_id).await,
            other => Err(HandlerError::Unknown(other.to_string())),
        }
    }
}
