//! Views of live guild state as reported by the chat platform

use crate::value_objects::Snowflake;

/// A guild the bot can currently see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildInfo {
    pub id: Snowflake,
    pub name: String,
}

/// A role that currently exists in a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: Snowflake,
    pub name: String,
    /// 24-bit RGB color
    pub color: u32,
}

/// A guild member and the roles they currently hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub user_id: Snowflake,
    pub name: String,
    pub role_ids: Vec<Snowflake>,
}

impl MemberInfo {
    /// Check whether the member currently holds a role
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }

    /// Mention string for greetings
    pub fn mention(&self) -> String {
        self.user_id.mention()
    }
}

/// A guild text channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: Snowflake,
    pub name: String,
}
