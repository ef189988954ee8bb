//! Operation outcomes returned by the services
//!
//! Each outcome knows how to describe itself to the member who triggered it.

use dino_core::{EmbedAnchor, MonthDay, PostedMessage, RoleInfo, Snowflake};

// ============================================================================
// Role Selection
// ============================================================================

/// What happened to the previously managed role while switching roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousRole {
    /// No previous managed role, or it was the chosen role
    None,
    /// The previous role no longer exists on the server
    Vanished,
    /// Removed the previous role
    Removed { name: String },
    /// The bot is not allowed to remove the previous role
    PermissionDenied,
    /// Removal failed for another reason
    Failed { reason: String },
}

impl PreviousRole {
    fn prefix(&self) -> String {
        match self {
            Self::None | Self::Vanished => String::new(),
            Self::Removed { name } => format!("Removed previous role: {name}. "),
            Self::PermissionDenied => {
                "Could not remove previous role (permissions issue). ".to_string()
            }
            Self::Failed { reason } => format!("Error removing previous role: {reason}. "),
        }
    }
}

/// Result of a role menu selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The chosen role was granted and is now the member's managed role
    Added { role: RoleInfo, previous: PreviousRole },
    /// The member already held the chosen role; it was taken away
    Removed { role: RoleInfo },
}

impl SelectionOutcome {
    pub fn role(&self) -> &RoleInfo {
        match self {
            Self::Added { role, .. } | Self::Removed { role } => role,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }

    /// Acknowledgment for the member
    pub fn message(&self) -> String {
        match self {
            Self::Added { role, previous } => {
                format!("{}Added {} to you.", previous.prefix(), role.name)
            }
            Self::Removed { role } => format!("Removed {} from you.", role.name),
        }
    }
}

// ============================================================================
// Birthdays
// ============================================================================

/// A birthday record whose member is still present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBirthday {
    pub user_id: Snowflake,
    /// Member's display name at resolution time
    pub name: String,
    pub date: MonthDay,
}

/// Result of registering a birthday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayRegistered {
    pub date: MonthDay,
    /// `None` when the list could not be refreshed afterwards
    pub render: Option<RenderOutcome>,
}

impl BirthdayRegistered {
    pub fn message(&self) -> String {
        format!(
            "Your birthday ({}) has been added! The birthday list will be updated.",
            self.date
        )
    }
}

// ============================================================================
// Birthday List
// ============================================================================

/// Result of one list render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No list channel configured
    NoChannel,
    /// The configured channel is gone; channel and anchor were cleared
    ChannelCleared { channel_id: Snowflake },
    /// The live list message was edited in place
    Edited { anchor: EmbedAnchor },
    /// A new list message was sent and anchored
    Sent {
        anchor: EmbedAnchor,
        /// Anchor that was dropped because it could not be edited
        replaced: Option<EmbedAnchor>,
    },
    /// Posting the list failed; no anchor is stored
    SendFailed { reason: String },
}

impl RenderOutcome {
    /// Anchor of the live list message after this render
    pub fn anchor(&self) -> Option<EmbedAnchor> {
        match self {
            Self::Edited { anchor } | Self::Sent { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.anchor().is_some()
    }
}

/// Result of the admin "send list" operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub channel_id: Snowflake,
    /// The list channel was changed by this call
    pub channel_changed: bool,
    pub render: RenderOutcome,
}

impl PublishOutcome {
    pub fn message(&self) -> String {
        let mention = format!("<#{}>", self.channel_id);
        if self.render.is_live() {
            format!("Birthday embed sent to {mention} successfully!")
        } else {
            format!("Could not post the birthday embed in {mention}.")
        }
    }
}

/// Result of the admin raw embed edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedEdited {
    pub message: PostedMessage,
}

impl EmbedEdited {
    pub fn message(&self) -> String {
        format!(
            "Embed in message `{}` updated successfully in <#{}>.",
            self.message.id, self.message.channel_id
        )
    }
}

// ============================================================================
// Daily Notifier
// ============================================================================

/// What one notifier tick did for one guild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildTick {
    pub guild_id: Snowflake,
    /// The guild is gone and its birthday data was dropped
    pub dropped: bool,
    /// The greeting channel was gone and was cleared
    pub channel_cleared: bool,
    /// Members greeted this tick
    pub greeted: Vec<Snowflake>,
    /// Records removed because the member left
    pub removed: Vec<Snowflake>,
    pub render: Option<RenderOutcome>,
}

impl GuildTick {
    pub fn new(guild_id: Snowflake) -> Self {
        Self {
            guild_id,
            ..Self::default()
        }
    }
}

/// Summary of one notifier tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub date: Option<chrono::NaiveDate>,
    pub guilds: Vec<GuildTick>,
    /// Guilds whose processing failed, with the reason
    pub failures: Vec<(Snowflake, String)>,
}

impl TickReport {
    pub fn greetings(&self) -> usize {
        self.guilds.iter().map(|g| g.greeted.len()).sum()
    }

    pub fn guild(&self, guild_id: Snowflake) -> Option<&GuildTick> {
        self.guilds.iter().find(|g| g.guild_id == guild_id)
    }
}
