//! Discord implementation of the membership and messaging ports
//!
//! Lookups read the gateway cache first and fall back to the REST API when the
//! guild or member is not cached. Cache references are never held across an await.

use async_trait::async_trait;
use dino_core::{
    ChannelInfo, ExternalError, ExternalResult, GuildInfo, MemberInfo, MembershipSystem,
    MessageContent, MessagingSystem, PostedMessage, RoleInfo, Snowflake,
};
use serenity::all::{Cache, Http, Member, Role};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::convert::{self, external_error, snowflake};

/// Serenity-backed chat platform
#[derive(Clone)]
pub struct SerenityDiscord {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityDiscord {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }

    /// `None` when the guild is not cached, `Some(None)` when cached without the role
    fn cached_role(&self, guild_id: Snowflake, role_id: Snowflake) -> Option<Option<RoleInfo>> {
        let guild = self.cache.guild(convert::guild_id(guild_id))?;
        Some(guild.roles.get(&convert::role_id(role_id)).map(role_info))
    }

    fn cached_member(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<MemberInfo> {
        let guild = self.cache.guild(convert::guild_id(guild_id))?;
        guild.members.get(&convert::user_id(user_id)).map(member_info)
    }
}

impl std::fmt::Debug for SerenityDiscord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenityDiscord").finish_non_exhaustive()
    }
}

fn role_info(role: &Role) -> RoleInfo {
    RoleInfo {
        id: snowflake(role.id),
        name: role.name.clone(),
        color: role.colour.0,
    }
}

fn member_info(member: &Member) -> MemberInfo {
    MemberInfo {
        user_id: snowflake(member.user.id),
        name: member.user.name.clone(),
        role_ids: member.roles.iter().map(|r| snowflake(*r)).collect(),
    }
}

#[async_trait]
impl MembershipSystem for SerenityDiscord {
    async fn resolve_guild(&self, guild_id: Snowflake) -> ExternalResult<GuildInfo> {
        let cached = self
            .cache
            .guild(convert::guild_id(guild_id))
            .map(|guild| GuildInfo {
                id: guild_id,
                name: guild.name.clone(),
            });
        if let Some(info) = cached {
            return Ok(info);
        }

        let guild = self
            .http
            .get_guild(convert::guild_id(guild_id))
            .await
            .map_err(convert::guild_error)?;
        Ok(GuildInfo {
            id: guild_id,
            name: guild.name,
        })
    }

    async fn resolve_role(&self, guild_id: Snowflake, role_id: Snowflake) -> ExternalResult<RoleInfo> {
        if let Some(cached) = self.cached_role(guild_id, role_id) {
            return cached.ok_or_else(|| ExternalError::not_found("role"));
        }

        let roles = self
            .http
            .get_guild_roles(convert::guild_id(guild_id))
            .await
            .map_err(|e| external_error(e, "roles"))?;
        roles
            .iter()
            .find(|role| snowflake(role.id) == role_id)
            .map(role_info)
            .ok_or_else(|| ExternalError::not_found("role"))
    }

    async fn resolve_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ExternalResult<MemberInfo> {
        if let Some(member) = self.cached_member(guild_id, user_id) {
            return Ok(member);
        }
        debug!(guild_id = %guild_id, user_id = %user_id, "Member not cached, fetching");
        self.fetch_member(guild_id, user_id).await
    }

    #[instrument(skip(self))]
    async fn fetch_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ExternalResult<MemberInfo> {
        let member = self
            .http
            .get_member(convert::guild_id(guild_id), convert::user_id(user_id))
            .await
            .map_err(|e| external_error(e, "member"))?;
        Ok(member_info(&member))
    }

    #[instrument(skip(self))]
    async fn add_role(&self, guild_id: Snowflake, user_id: Snowflake, role_id: Snowflake) -> ExternalResult<()> {
        self.http
            .add_member_role(
                convert::guild_id(guild_id),
                convert::user_id(user_id),
                convert::role_id(role_id),
                None,
            )
            .await
            .map_err(|e| external_error(e, "add role"))
    }

    #[instrument(skip(self))]
    async fn remove_role(&self, guild_id: Snowflake, user_id: Snowflake, role_id: Snowflake) -> ExternalResult<()> {
        self.http
            .remove_member_role(
                convert::guild_id(guild_id),
                convert::user_id(user_id),
                convert::role_id(role_id),
                None,
            )
            .await
            .map_err(|e| external_error(e, "remove role"))
    }

    async fn resolve_channel(&self, guild_id: Snowflake, channel_id: Snowflake) -> ExternalResult<ChannelInfo> {
        let cached = self.cache.guild(convert::guild_id(guild_id)).map(|guild| {
            guild
                .channels
                .get(&convert::channel_id(channel_id))
                .map(|channel| ChannelInfo {
                    id: channel_id,
                    name: channel.name.clone(),
                })
        });
        if let Some(channel) = cached {
            return channel.ok_or_else(|| ExternalError::not_found("channel"));
        }

        let channel = self
            .http
            .get_channel(convert::channel_id(channel_id))
            .await
            .map_err(|e| external_error(e, "channel"))?;
        match channel.guild() {
            Some(channel) if snowflake(channel.guild_id) == guild_id => Ok(ChannelInfo {
                id: channel_id,
                name: channel.name,
            }),
            _ => Err(ExternalError::not_found("channel")),
        }
    }
}

#[async_trait]
impl MessagingSystem for SerenityDiscord {
    #[instrument(skip(self, content))]
    async fn send_message(&self, channel_id: Snowflake, content: &MessageContent) -> ExternalResult<PostedMessage> {
        convert::channel_id(channel_id)
            .send_message(&self.http, convert::create_message(content))
            .await
            .map(convert::posted_message)
            .map_err(|e| external_error(e, "send message"))
    }

    async fn fetch_message(&self, channel_id: Snowflake, message_id: Snowflake) -> ExternalResult<PostedMessage> {
        convert::channel_id(channel_id)
            .message(&self.http, convert::message_id(message_id))
            .await
            .map(convert::posted_message)
            .map_err(|e| external_error(e, "message"))
    }

    #[instrument(skip(self, content))]
    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        content: &MessageContent,
    ) -> ExternalResult<PostedMessage> {
        convert::channel_id(channel_id)
            .edit_message(
                &self.http,
                convert::message_id(message_id),
                convert::edit_message(content),
            )
            .await
            .map(convert::posted_message)
            .map_err(|e| external_error(e, "edit message"))
    }
}
