//! Birthday service
//!
//! One write-once birthday per member per guild, plus the "upcoming" view used
//! by the birthday list.

use chrono::NaiveDateTime;
use dino_core::{BirthdayEntry, DomainError, ExternalError, GuildBirthdays, MonthDay, Snowflake};
use dino_store::Birthdays;
use tracing::{info, instrument, warn};

use crate::dto::{BirthdayRegistered, RenderOutcome, ResolvedBirthday};

use super::context::ServiceContext;
use super::embed::EmbedService;
use super::error::{ServiceError, ServiceResult};

/// Birthday service
pub struct BirthdayService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BirthdayService<'a> {
    /// Create a new BirthdayService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a member's birthday from `MM/DD` text, then refresh the list.
    ///
    /// A member's birthday can only be set once.
    #[instrument(skip(self))]
    pub async fn set_birthday(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        text: &str,
    ) -> ServiceResult<BirthdayRegistered> {
        let date = {
            let store = self.ctx.store();
            let _guard = store.lock::<Birthdays>(guild_id).await;
            let mut row = store.read_row::<Birthdays>(guild_id).await?;

            if row.contains(user_id) {
                return Err(DomainError::BirthdayAlreadySet.into());
            }

            let date = MonthDay::parse(text)?;
            row.insert(BirthdayEntry::new(user_id, date));
            store.write_row::<Birthdays>(guild_id, row).await?;
            date
        };

        info!(guild_id = %guild_id, user_id = %user_id, date = %date, "Birthday registered");

        let render = match EmbedService::new(self.ctx).render(guild_id).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(guild_id = %guild_id, error = %e, "Failed to refresh birthday list");
                None
            }
        };

        Ok(BirthdayRegistered { date, render })
    }

    /// A member's stored record
    pub async fn get_birthday(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Option<BirthdayEntry>> {
        let row = self.ctx.store().read_row::<Birthdays>(guild_id).await?;
        Ok(row.get(user_id).cloned())
    }

    /// Remove records whose member left or whose date no longer parses.
    ///
    /// Returns the removed member ids.
    #[instrument(skip(self))]
    pub async fn prune_invalid_or_absent(&self, guild_id: Snowflake) -> ServiceResult<Vec<Snowflake>> {
        let store = self.ctx.store();
        let _guard = store.lock::<Birthdays>(guild_id).await;
        let mut row = store.read_row::<Birthdays>(guild_id).await?;

        let (_, removed) = prune_row(self.ctx, guild_id, &mut row).await;
        if !removed.is_empty() {
            store.write_row::<Birthdays>(guild_id, row).await?;
        }
        Ok(removed)
    }

    /// Remaining records ordered by next occurrence, after pruning
    #[instrument(skip(self))]
    pub async fn upcoming(&self, guild_id: Snowflake) -> ServiceResult<Vec<ResolvedBirthday>> {
        let store = self.ctx.store();
        let _guard = store.lock::<Birthdays>(guild_id).await;
        let mut row = store.read_row::<Birthdays>(guild_id).await?;

        let (mut entries, removed) = prune_row(self.ctx, guild_id, &mut row).await;
        if !removed.is_empty() {
            store.write_row::<Birthdays>(guild_id, row).await?;
        }
        sort_upcoming(&mut entries, self.ctx.now());
        Ok(entries)
    }

    /// Set the channel for the list and greetings, then refresh the list there
    #[instrument(skip(self))]
    pub async fn set_channel(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<RenderOutcome> {
        self.store_channel(guild_id, channel_id).await?;
        EmbedService::new(self.ctx).render(guild_id).await
    }

    /// Store the list channel. Returns whether it changed.
    pub(crate) async fn store_channel(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<bool> {
        match self
            .ctx
            .membership()
            .resolve_channel(guild_id, channel_id)
            .await
        {
            Ok(_) => {}
            Err(ExternalError::NotFound(_)) => {
                return Err(DomainError::ChannelNotFound(channel_id).into())
            }
            Err(e) => return Err(e.into()),
        }

        let changed = self
            .ctx
            .store()
            .modify_row::<Birthdays, _, _>(guild_id, |row| {
                if row.birthday_channel_id == Some(channel_id) {
                    false
                } else {
                    row.birthday_channel_id = Some(channel_id);
                    true
                }
            })
            .await
            .map_err(ServiceError::from)?;

        if changed {
            info!(guild_id = %guild_id, channel_id = %channel_id, "Birthday channel set");
        }
        Ok(changed)
    }
}

/// Order records by next occurrence relative to `now`.
///
/// The sort is stable, so records falling on the same day keep registration order.
pub fn sort_upcoming(entries: &mut [ResolvedBirthday], now: NaiveDateTime) {
    entries.sort_by_key(|entry| entry.date.next_occurrence(now));
}

/// Drop records whose member cannot be resolved or whose date fails to parse.
///
/// Returns the surviving records in stored order and the removed member ids.
/// Only a definite "not found" removes a record; other lookup failures keep it
/// (and leave it off this render).
pub(crate) async fn prune_row(
    ctx: &ServiceContext,
    guild_id: Snowflake,
    row: &mut GuildBirthdays,
) -> (Vec<ResolvedBirthday>, Vec<Snowflake>) {
    let mut kept = Vec::with_capacity(row.users.len());
    let mut removed = Vec::new();

    for entry in &row.users {
        let Some(date) = entry.date() else {
            warn!(guild_id = %guild_id, user_id = %entry.user_id, birthday = %entry.birthday, "Removing unparseable birthday");
            removed.push(entry.user_id);
            continue;
        };

        match ctx.membership().resolve_member(guild_id, entry.user_id).await {
            Ok(member) => kept.push(ResolvedBirthday {
                user_id: entry.user_id,
                name: member.name,
                date,
            }),
            Err(ExternalError::NotFound(_)) => {
                info!(guild_id = %guild_id, user_id = %entry.user_id, "Removing birthday of member who left");
                removed.push(entry.user_id);
            }
            Err(e) => {
                warn!(guild_id = %guild_id, user_id = %entry.user_id, error = %e, "Could not resolve member, keeping record");
            }
        }
    }

    for user_id in &removed {
        row.remove(*user_id);
    }

    (kept, removed)
}
