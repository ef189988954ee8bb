//! Test fixtures
//!
//! A small server: one guild with three catalog-able roles, three members and
//! two text channels.

use chrono::{NaiveDate, NaiveDateTime};
use dino_core::Snowflake;

use crate::FakeDiscord;

pub const GUILD: Snowflake = Snowflake::new(100);
pub const OTHER_GUILD: Snowflake = Snowflake::new(200);

pub const RED: Snowflake = Snowflake::new(10);
pub const BLUE: Snowflake = Snowflake::new(11);
pub const GREEN: Snowflake = Snowflake::new(12);

pub const ALICE: Snowflake = Snowflake::new(1001);
pub const BOB: Snowflake = Snowflake::new(1002);
pub const CAROL: Snowflake = Snowflake::new(1003);

pub const BIRTHDAYS_CHANNEL: Snowflake = Snowflake::new(5001);
pub const GENERAL_CHANNEL: Snowflake = Snowflake::new(5002);

/// Populate `discord` with the standard server
pub fn seed_world(discord: &FakeDiscord) {
    seed_guild(discord, GUILD, "Dino Land");
}

/// Populate one guild with the standard roles, members and channels
pub fn seed_guild(discord: &FakeDiscord, guild_id: Snowflake, name: &str) {
    discord.create_guild(guild_id, name);

    discord.create_role(guild_id, RED, "Red", 0xE7_4C3C);
    discord.create_role(guild_id, BLUE, "Blue", 0x34_98DB);
    discord.create_role(guild_id, GREEN, "Green", 0x2E_CC71);

    discord.join_member(guild_id, ALICE, "alice");
    discord.join_member(guild_id, BOB, "bob");
    discord.join_member(guild_id, CAROL, "carol");

    discord.create_channel(guild_id, BIRTHDAYS_CHANNEL, "birthdays");
    discord.create_channel(guild_id, GENERAL_CHANNEL, "general");
}

/// Local time on the given day of 2024
pub fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid test date")
}
