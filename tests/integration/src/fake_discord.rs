//! In-process Discord stand-in
//!
//! Implements the membership and messaging ports over plain maps so tests can
//! delete channels, kick members or revoke permissions between operations.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use dino_core::{
    ChannelInfo, Embed, ExternalError, ExternalResult, GuildInfo, MemberInfo, MembershipSystem,
    MessageContent, MessagingSystem, PostedMessage, RoleInfo, Snowflake,
};
use parking_lot::Mutex;

/// First id handed out to posted messages
const FIRST_MESSAGE_ID: u64 = 900_000;

/// A role change the fake applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleOp {
    Added { user_id: Snowflake, role_id: Snowflake },
    Removed { user_id: Snowflake, role_id: Snowflake },
}

#[derive(Debug, Default)]
struct FakeGuild {
    name: String,
    roles: HashMap<Snowflake, RoleInfo>,
    members: HashMap<Snowflake, MemberInfo>,
    channels: HashMap<Snowflake, ChannelInfo>,
}

#[derive(Debug)]
struct FakeState {
    guilds: HashMap<Snowflake, FakeGuild>,
    messages: HashMap<Snowflake, PostedMessage>,
    next_message_id: u64,
    sent: Vec<PostedMessage>,
    edits: Vec<Snowflake>,
    role_ops: Vec<RoleOp>,
    protected_roles: HashSet<Snowflake>,
    unreachable_guilds: HashSet<Snowflake>,
    unreachable_members: HashSet<Snowflake>,
    fail_sends: bool,
    deny_edits: bool,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            guilds: HashMap::new(),
            messages: HashMap::new(),
            next_message_id: FIRST_MESSAGE_ID,
            sent: Vec::new(),
            edits: Vec::new(),
            role_ops: Vec::new(),
            protected_roles: HashSet::new(),
            unreachable_guilds: HashSet::new(),
            unreachable_members: HashSet::new(),
            fail_sends: false,
            deny_edits: false,
        }
    }
}

impl FakeState {
    fn guild(&self, guild_id: Snowflake) -> ExternalResult<&FakeGuild> {
        if self.unreachable_guilds.contains(&guild_id) {
            return Err(ExternalError::other("guild unavailable"));
        }
        self.guilds
            .get(&guild_id)
            .ok_or_else(|| ExternalError::not_found("guild"))
    }

    fn guild_mut(&mut self, guild_id: Snowflake) -> ExternalResult<&mut FakeGuild> {
        self.guilds
            .get_mut(&guild_id)
            .ok_or_else(|| ExternalError::not_found("guild"))
    }

    fn next_id(&mut self) -> Snowflake {
        let id = Snowflake::new(self.next_message_id);
        self.next_message_id += 1;
        id
    }
}

/// Fake chat platform with mutable server state
#[derive(Debug, Default)]
pub struct FakeDiscord {
    state: Mutex<FakeState>,
}

impl FakeDiscord {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // World setup
    // ------------------------------------------------------------------------

    pub fn create_guild(&self, guild_id: Snowflake, name: &str) {
        self.state.lock().guilds.insert(
            guild_id,
            FakeGuild {
                name: name.to_string(),
                ..FakeGuild::default()
            },
        );
    }

    pub fn delete_guild(&self, guild_id: Snowflake) {
        self.state.lock().guilds.remove(&guild_id);
    }

    pub fn create_role(&self, guild_id: Snowflake, role_id: Snowflake, name: &str, color: u32) {
        if let Some(guild) = self.state.lock().guilds.get_mut(&guild_id) {
            guild.roles.insert(
                role_id,
                RoleInfo {
                    id: role_id,
                    name: name.to_string(),
                    color,
                },
            );
        }
    }

    /// Delete a role and strip it from every member
    pub fn delete_role(&self, guild_id: Snowflake, role_id: Snowflake) {
        if let Some(guild) = self.state.lock().guilds.get_mut(&guild_id) {
            guild.roles.remove(&role_id);
            for member in guild.members.values_mut() {
                member.role_ids.retain(|r| *r != role_id);
            }
        }
    }

    pub fn join_member(&self, guild_id: Snowflake, user_id: Snowflake, name: &str) {
        if let Some(guild) = self.state.lock().guilds.get_mut(&guild_id) {
            guild.members.insert(
                user_id,
                MemberInfo {
                    user_id,
                    name: name.to_string(),
                    role_ids: Vec::new(),
                },
            );
        }
    }

    pub fn kick_member(&self, guild_id: Snowflake, user_id: Snowflake) {
        if let Some(guild) = self.state.lock().guilds.get_mut(&guild_id) {
            guild.members.remove(&user_id);
        }
    }

    /// Give a member a role outside the bot
    pub fn grant_directly(&self, guild_id: Snowflake, user_id: Snowflake, role_id: Snowflake) {
        if let Some(member) = self
            .state
            .lock()
            .guilds
            .get_mut(&guild_id)
            .and_then(|g| g.members.get_mut(&user_id))
        {
            if !member.role_ids.contains(&role_id) {
                member.role_ids.push(role_id);
            }
        }
    }

    pub fn create_channel(&self, guild_id: Snowflake, channel_id: Snowflake, name: &str) {
        if let Some(guild) = self.state.lock().guilds.get_mut(&guild_id) {
            guild.channels.insert(
                channel_id,
                ChannelInfo {
                    id: channel_id,
                    name: name.to_string(),
                },
            );
        }
    }

    /// Delete a channel together with its messages
    pub fn delete_channel(&self, guild_id: Snowflake, channel_id: Snowflake) {
        let mut state = self.state.lock();
        if let Some(guild) = state.guilds.get_mut(&guild_id) {
            guild.channels.remove(&channel_id);
        }
        state.messages.retain(|_, m| m.channel_id != channel_id);
    }

    pub fn delete_message(&self, message_id: Snowflake) {
        self.state.lock().messages.remove(&message_id);
    }

    /// Place a message posted by someone else, e.g. an announcement embed
    pub fn post_foreign(&self, channel_id: Snowflake, text: &str, embeds: Vec<Embed>) -> Snowflake {
        let mut state = self.state.lock();
        let id = state.next_id();
        state.messages.insert(
            id,
            PostedMessage {
                id,
                channel_id,
                text: text.to_string(),
                embeds,
            },
        );
        id
    }

    // ------------------------------------------------------------------------
    // Failure injection
    // ------------------------------------------------------------------------

    /// Role changes involving this role fail with a permission error
    pub fn protect_role(&self, role_id: Snowflake) {
        self.state.lock().protected_roles.insert(role_id);
    }

    /// Guild lookups fail with a transient error
    pub fn make_guild_unreachable(&self, guild_id: Snowflake) {
        self.state.lock().unreachable_guilds.insert(guild_id);
    }

    /// Member lookups fail with a transient error
    pub fn make_member_unreachable(&self, user_id: Snowflake) {
        self.state.lock().unreachable_members.insert(user_id);
    }

    pub fn fail_sends(&self, fail: bool) {
        self.state.lock().fail_sends = fail;
    }

    /// Message edits are rejected as if the bot lost access to them
    pub fn deny_edits(&self, deny: bool) {
        self.state.lock().deny_edits = deny;
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn member_roles(&self, guild_id: Snowflake, user_id: Snowflake) -> Vec<Snowflake> {
        self.state
            .lock()
            .guilds
            .get(&guild_id)
            .and_then(|g| g.members.get(&user_id))
            .map(|m| m.role_ids.clone())
            .unwrap_or_default()
    }

    /// Every message the bot sent, in order
    pub fn sent(&self) -> Vec<PostedMessage> {
        self.state.lock().sent.clone()
    }

    /// Messages currently present in a channel, oldest first
    pub fn messages_in(&self, channel_id: Snowflake) -> Vec<PostedMessage> {
        let mut messages: Vec<_> = self
            .state
            .lock()
            .messages
            .values()
            .filter(|m| m.channel_id == channel_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.id);
        messages
    }

    pub fn message(&self, message_id: Snowflake) -> Option<PostedMessage> {
        self.state.lock().messages.get(&message_id).cloned()
    }

    /// Ids of messages edited, in order
    pub fn edits(&self) -> Vec<Snowflake> {
        self.state.lock().edits.clone()
    }

    pub fn role_ops(&self) -> Vec<RoleOp> {
        self.state.lock().role_ops.clone()
    }
}

fn apply(message: &mut PostedMessage, content: &MessageContent) {
    if let Some(text) = &content.text {
        message.text.clone_from(text);
    }
    if let Some(embed) = &content.embed {
        message.embeds = vec![embed.clone()];
    }
}

#[async_trait]
impl MembershipSystem for FakeDiscord {
    async fn resolve_guild(&self, guild_id: Snowflake) -> ExternalResult<GuildInfo> {
        let state = self.state.lock();
        let guild = state.guild(guild_id)?;
        Ok(GuildInfo {
            id: guild_id,
            name: guild.name.clone(),
        })
    }

    async fn resolve_role(&self, guild_id: Snowflake, role_id: Snowflake) -> ExternalResult<RoleInfo> {
        let state = self.state.lock();
        state
            .guild(guild_id)?
            .roles
            .get(&role_id)
            .cloned()
            .ok_or_else(|| ExternalError::not_found("role"))
    }

    async fn resolve_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ExternalResult<MemberInfo> {
        let state = self.state.lock();
        if state.unreachable_members.contains(&user_id) {
            return Err(ExternalError::other("member lookup timed out"));
        }
        state
            .guild(guild_id)?
            .members
            .get(&user_id)
            .cloned()
            .ok_or_else(|| ExternalError::not_found("member"))
    }

    async fn fetch_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ExternalResult<MemberInfo> {
        self.resolve_member(guild_id, user_id).await
    }

    async fn add_role(&self, guild_id: Snowflake, user_id: Snowflake, role_id: Snowflake) -> ExternalResult<()> {
        let mut state = self.state.lock();
        if state.protected_roles.contains(&role_id) {
            return Err(ExternalError::permission_denied("add role"));
        }
        let guild = state.guild_mut(guild_id)?;
        if !guild.roles.contains_key(&role_id) {
            return Err(ExternalError::not_found("role"));
        }
        let member = guild
            .members
            .get_mut(&user_id)
            .ok_or_else(|| ExternalError::not_found("member"))?;
        if !member.role_ids.contains(&role_id) {
            member.role_ids.push(role_id);
        }
        state.role_ops.push(RoleOp::Added { user_id, role_id });
        Ok(())
    }

    async fn remove_role(&self, guild_id: Snowflake, user_id: Snowflake, role_id: Snowflake) -> ExternalResult<()> {
        let mut state = self.state.lock();
        if state.protected_roles.contains(&role_id) {
            return Err(ExternalError::permission_denied("remove role"));
        }
        let guild = state.guild_mut(guild_id)?;
        if !guild.roles.contains_key(&role_id) {
            return Err(ExternalError::not_found("role"));
        }
        let member = guild
            .members
            .get_mut(&user_id)
            .ok_or_else(|| ExternalError::not_found("member"))?;
        member.role_ids.retain(|r| *r != role_id);
        state.role_ops.push(RoleOp::Removed { user_id, role_id });
        Ok(())
    }

    async fn resolve_channel(&self, guild_id: Snowflake, channel_id: Snowflake) -> ExternalResult<ChannelInfo> {
        let state = self.state.lock();
        state
            .guild(guild_id)?
            .channels
            .get(&channel_id)
            .cloned()
            .ok_or_else(|| ExternalError::not_found("channel"))
    }
}

#[async_trait]
impl MessagingSystem for FakeDiscord {
    async fn send_message(&self, channel_id: Snowflake, content: &MessageContent) -> ExternalResult<PostedMessage> {
        let mut state = self.state.lock();
        if state.fail_sends {
            return Err(ExternalError::permission_denied("send message"));
        }
        let channel_exists = state
            .guilds
            .values()
            .any(|g| g.channels.contains_key(&channel_id));
        if !channel_exists {
            return Err(ExternalError::not_found("channel"));
        }

        let mut message = PostedMessage {
            id: state.next_id(),
            channel_id,
            text: String::new(),
            embeds: Vec::new(),
        };
        apply(&mut message, content);
        state.messages.insert(message.id, message.clone());
        state.sent.push(message.clone());
        Ok(message)
    }

    async fn fetch_message(&self, channel_id: Snowflake, message_id: Snowflake) -> ExternalResult<PostedMessage> {
        self.state
            .lock()
            .messages
            .get(&message_id)
            .filter(|m| m.channel_id == channel_id)
            .cloned()
            .ok_or_else(|| ExternalError::not_found("message"))
    }

    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        content: &MessageContent,
    ) -> ExternalResult<PostedMessage> {
        let mut state = self.state.lock();
        if state.deny_edits {
            return Err(ExternalError::permission_denied("edit message"));
        }
        let message = state
            .messages
            .get_mut(&message_id)
            .filter(|m| m.channel_id == channel_id)
            .ok_or_else(|| ExternalError::not_found("message"))?;
        apply(message, content);
        let edited = message.clone();
        state.edits.push(message_id);
        Ok(edited)
    }
}
