//! Role menu and role catalog commands

use dino_core::{DomainError, Snowflake};
use dino_service::{RoleService, ServiceContext, ServiceError};
use serenity::all::{
    CommandInteraction, ComponentInteraction, ComponentInteractionDataKind, Context,
    CreateActionRow, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, EditInteractionResponse,
    Permissions,
};
use tracing::{info, warn};

use super::error::{HandlerError, HandlerResult};
use super::reply;
use crate::adapter::convert::snowflake;
use crate::commands::ROLE_SELECT;

/// Discord caps select menus at 25 options
const MAX_MENU_OPTIONS: usize = 25;

/// `/roles`: show the role menu
pub async fn menu(
    services: &ServiceContext,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: Snowflake,
) -> HandlerResult<()> {
    let options = match RoleService::new(services).list_options(guild_id).await {
        Ok(options) => options,
        Err(e) => return reply::ephemeral(ctx, command, e.user_message()).await,
    };

    if options.is_empty() {
        return reply::ephemeral(ctx, command, "No roles are available to switch to.").await;
    }
    if options.len() > MAX_MENU_OPTIONS {
        warn!(guild_id = %guild_id, count = options.len(), "Role catalog exceeds menu size, truncating");
    }

    let choices = options
        .iter()
        .take(MAX_MENU_OPTIONS)
        .map(|option| CreateSelectMenuOption::new(&option.name, option.id.to_string()))
        .collect();
    let select = CreateSelectMenu::new(ROLE_SELECT, CreateSelectMenuKind::String { options: choices })
        .placeholder("Choose a role to switch to");

    let message = CreateInteractionResponseMessage::new()
        .content("Please select a role from the dropdown:")
        .components(vec![CreateActionRow::SelectMenu(select)])
        .ephemeral(true);
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

/// `/add_role <role>`
pub async fn add(
    services: &ServiceContext,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: Snowflake,
) -> HandlerResult<()> {
    if !reply::has_permission(command, Permissions::MANAGE_ROLES) {
        return reply::ephemeral(ctx, command, "You need the Manage Roles permission to do that.").await;
    }
    let options = command.data.options();
    let (role_id, name) =
        reply::role_option(&options, "role").ok_or(HandlerError::MissingOption("role"))?;

    let text = match RoleService::new(services).add_option(guild_id, role_id).await {
        Ok(option) => format!("Added {} to the dropdown.", option.name),
        Err(ServiceError::Domain(DomainError::DuplicateRole(_))) => {
            format!("{name} is already in the dropdown.")
        }
        Err(e) => e.user_message(),
    };
    reply::ephemeral(ctx, command, text).await
}

/// `/remove_role <role>`
pub async fn remove(
    services: &ServiceContext,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: Snowflake,
) -> HandlerResult<()> {
    if !reply::has_permission(command, Permissions::MANAGE_ROLES) {
        return reply::ephemeral(ctx, command, "You need the Manage Roles permission to do that.").await;
    }
    let options = command.data.options();
    let (role_id, name) =
        reply::role_option(&options, "role").ok_or(HandlerError::MissingOption("role"))?;

    let text = match RoleService::new(services).remove_option(guild_id, role_id).await {
        Ok(_) => format!("Removed {name} from the dropdown."),
        Err(ServiceError::Domain(DomainError::RoleNotCataloged(_))) => {
            format!("{name} is not in the dropdown.")
        }
        Err(e) => e.user_message(),
    };
    reply::ephemeral(ctx, command, text).await
}

/// Role menu selection
pub async fn select(
    services: &ServiceContext,
    ctx: &Context,
    component: &ComponentInteraction,
) -> HandlerResult<()> {
    let Some(guild_id) = component.guild_id.map(snowflake) else {
        return Err(HandlerError::Unknown("role menu outside a server".to_string()));
    };
    let ComponentInteractionDataKind::StringSelect { values } = &component.data.kind else {
        return Err(HandlerError::Unknown(component.data.custom_id.clone()));
    };
    let role_id = values
        .first()
        .and_then(|value| Snowflake::parse(value).ok())
        .ok_or(HandlerError::MissingOption("role"))?;
    let user_id = snowflake(component.user.id);

    component.defer_ephemeral(&ctx.http).await?;

    let text = match RoleService::new(services)
        .select_role(guild_id, user_id, role_id)
        .await
    {
        Ok(outcome) => {
            info!(guild_id = %guild_id, user_id = %user_id, role_id = %role_id, added = outcome.is_added(), "Role selection handled");
            outcome.message()
        }
        Err(e) if e.is_permission_denied() => {
            "Could not update your roles (permissions issue).".to_string()
        }
        Err(e) => {
            warn!(guild_id = %guild_id, user_id = %user_id, code = e.error_code(), error = %e, "Role selection failed");
            e.user_message()
        }
    };

    component
        .edit_response(&ctx.http, EditInteractionResponse::new().content(text))
        .await?;
    Ok(())
}
