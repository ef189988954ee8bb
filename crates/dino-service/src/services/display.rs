//! Message bodies posted by the bot

use dino_core::{Embed, MessageContent, Snowflake};

use crate::dto::ResolvedBirthday;

pub const BIRTHDAY_LIST_TITLE: &str = "🎉 Server Birthdays 🎉";
pub const BIRTHDAY_LIST_COLOR: u32 = 0x34_98DB;
pub const BIRTHDAY_LIST_EMPTY: &str = "No birthdays added yet!";
pub const HELP_COLOR: u32 = 0xF1_C40F;

/// Birthday list embed, one line per entry in the given order
pub fn birthday_list(entries: &[ResolvedBirthday]) -> MessageContent {
    let description = if entries.is_empty() {
        BIRTHDAY_LIST_EMPTY.to_string()
    } else {
        entries
            .iter()
            .map(|entry| format!("• **{}**: {}", entry.name, entry.date))
            .collect::<Vec<_>>()
            .join("\n")
    };

    MessageContent::embed(
        Embed::new()
            .title(BIRTHDAY_LIST_TITLE)
            .description(description)
            .color(BIRTHDAY_LIST_COLOR),
    )
}

/// Birthday greeting mentioning the member
pub fn birthday_greeting(user_id: Snowflake) -> MessageContent {
    MessageContent::text(format!(
        "🎉 Happy Birthday, {}! 🎉 We wish you a wonderful day filled with joy and celebration!",
        user_id.mention()
    ))
}

/// Usage help for the birthday commands
pub fn birthday_help() -> Embed {
    Embed::new()
        .title("🎂 Birthday System Help 🎂")
        .description("Here's how to use the birthday feature on this server:")
        .color(HELP_COLOR)
        .field(
            "1. Add Your Birthday",
            "Once the channel is set, you can add your birthday.\n\
             Use the command: `/birthday <MM/DD>`\n\
             Example: `/birthday 03/25` (for March 25th)\n\n\
             **Important:** You can only set your birthday once!",
            false,
        )
        .field(
            "2. See the Birthday List",
            "After you add your birthday, it will automatically appear in the designated \
             birthday channel, alongside everyone else's!",
            false,
        )
}
