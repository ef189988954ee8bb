//! Slash command definitions

use serenity::all::{
    ChannelType, CommandOptionType, CreateCommand, CreateCommandOption, Permissions,
};

pub const ROLES: &str = "roles";
pub const ADD_ROLE: &str = "add_role";
pub const REMOVE_ROLE: &str = "remove_role";
pub const BIRTHDAY: &str = "birthday";
pub const SET_BIRTHDAY_CHANNEL: &str = "set_birthday_channel";
pub const SEND_BIRTHDAY_EMBED: &str = "send_birthday_embed";
pub const BIRTHDAY_HELP: &str = "birthday_help";
pub const UPDATE_EMBED: &str = "update_embed_command";

/// Custom id of the role select menu
pub const ROLE_SELECT: &str = "role_select";

/// Every command registered on ready
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        guild_command(ROLES, "Switch between server roles"),
        guild_command(ADD_ROLE, "Add a role to the role switch dropdown")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(role_option()),
        guild_command(REMOVE_ROLE, "Remove a role from the role switch dropdown")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(role_option()),
        guild_command(
            BIRTHDAY,
            "Add your birthday to the server's birthday list (MM/DD)",
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "date",
                "Your birthday in MM/DD format (e.g., 01/15 for January 15)",
            )
            .required(true),
        ),
        guild_command(
            SET_BIRTHDAY_CHANNEL,
            "Set the channel where birthday messages will be sent.",
        )
        .default_member_permissions(Permissions::MANAGE_CHANNELS)
        .add_option(channel_option("The text channel for birthday messages.")),
        guild_command(
            SEND_BIRTHDAY_EMBED,
            "Sends the server's birthday list embed to a specified channel.",
        )
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(channel_option(
            "The channel where the birthday embed should be sent.",
        )),
        guild_command(BIRTHDAY_HELP, "Get help on how to use the birthday system."),
        guild_command(
            UPDATE_EMBED,
            "Update an existing embed by message ID (Admin only).",
        )
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(channel_option(
            "The channel where the embed message is located.",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "message_id",
                "The ID of the message to update.",
            )
            .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "title",
            "The new title for the embed (optional).",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "description",
            "The new description for the embed (optional).",
        )),
    ]
}

fn guild_command(name: &str, description: &str) -> CreateCommand {
    CreateCommand::new(name)
        .description(description)
        .dm_permission(false)
}

fn role_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Role, "role", "The role").required(true)
}

fn channel_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Channel, "channel", description)
        .channel_types(vec![ChannelType::Text])
        .required(true)
}
