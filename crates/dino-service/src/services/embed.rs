//! Embed service
//!
//! Keeps exactly one live birthday list message per guild, recreating it when
//! the anchored message disappears or can no longer be edited.

use dino_core::{DomainError, EmbedAnchor, ExternalError, MessageContent, Snowflake};
use dino_store::Birthdays;
use tracing::{debug, info, instrument, warn};

use crate::dto::{EditEmbedRequest, EmbedEdited, PublishOutcome, RenderOutcome};

use super::birthday::{prune_row, sort_upcoming, BirthdayService};
use super::context::ServiceContext;
use super::display;
use super::error::{ServiceError, ServiceResult};

/// Embed service
pub struct EmbedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EmbedService<'a> {
    /// Create a new EmbedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Render the guild's birthday list into its configured channel.
    ///
    /// Holds the guild's birthday lock for the whole sequence, so concurrent
    /// renders are serialized and never post two list messages.
    #[instrument(skip(self))]
    pub async fn render(&self, guild_id: Snowflake) -> ServiceResult<RenderOutcome> {
        let store = self.ctx.store();
        let _guard = store.lock::<Birthdays>(guild_id).await;
        let mut row = store.read_row::<Birthdays>(guild_id).await?;

        let (mut entries, removed) = prune_row(self.ctx, guild_id, &mut row).await;
        let mut dirty = !removed.is_empty();

        let outcome = 'render: {
            let Some(channel_id) = row.birthday_channel_id else {
                debug!(guild_id = %guild_id, "No birthday channel configured");
                break 'render RenderOutcome::NoChannel;
            };

            match self
                .ctx
                .membership()
                .resolve_channel(guild_id, channel_id)
                .await
            {
                Ok(_) => {}
                Err(ExternalError::NotFound(_)) => {
                    info!(guild_id = %guild_id, channel_id = %channel_id, "Birthday channel is gone, clearing it");
                    row.clear_channel();
                    dirty = true;
                    break 'render RenderOutcome::ChannelCleared { channel_id };
                }
                Err(e) => {
                    warn!(guild_id = %guild_id, channel_id = %channel_id, error = %e, "Could not resolve birthday channel");
                    break 'render RenderOutcome::SendFailed {
                        reason: e.to_string(),
                    };
                }
            }

            sort_upcoming(&mut entries, self.ctx.now());
            let content = display::birthday_list(&entries);

            let mut replaced = None;
            if let Some(anchor) = row.embed_info.filter(|a| a.channel_id == channel_id) {
                match self
                    .ctx
                    .messaging()
                    .edit_message(anchor.channel_id, anchor.message_id, &content)
                    .await
                {
                    Ok(_) => {
                        debug!(guild_id = %guild_id, message_id = %anchor.message_id, "Birthday list updated");
                        break 'render RenderOutcome::Edited { anchor };
                    }
                    Err(e) => {
                        warn!(
                            guild_id = %guild_id,
                            message_id = %anchor.message_id,
                            error = %e,
                            "Birthday list message could not be edited, sending a new one"
                        );
                        row.embed_info = None;
                        dirty = true;
                        replaced = Some(anchor);
                    }
                }
            }

            match self.ctx.messaging().send_message(channel_id, &content).await {
                Ok(message) => {
                    let anchor = EmbedAnchor {
                        channel_id,
                        message_id: message.id,
                    };
                    row.embed_info = Some(anchor);
                    dirty = true;
                    info!(guild_id = %guild_id, channel_id = %channel_id, message_id = %message.id, "Birthday list sent");
                    RenderOutcome::Sent { anchor, replaced }
                }
                Err(e) => {
                    warn!(guild_id = %guild_id, channel_id = %channel_id, error = %e, "Failed to send birthday list");
                    RenderOutcome::SendFailed {
                        reason: e.to_string(),
                    }
                }
            }
        };

        if dirty {
            store.write_row::<Birthdays>(guild_id, row).await?;
        }

        Ok(outcome)
    }

    /// Point the list at `channel_id` and render it there
    #[instrument(skip(self))]
    pub async fn publish(
        &self,
        guild_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<PublishOutcome> {
        let channel_changed = BirthdayService::new(self.ctx)
            .store_channel(guild_id, channel_id)
            .await?;
        let render = self.render(guild_id).await?;

        Ok(PublishOutcome {
            channel_id,
            channel_changed,
            render,
        })
    }

    /// Replace the title and/or description of a message's first embed
    #[instrument(skip(self))]
    pub async fn edit_embed(
        &self,
        guild_id: Snowflake,
        request: EditEmbedRequest,
    ) -> ServiceResult<EmbedEdited> {
        let message_id = Snowflake::parse(&request.message_id)
            .map_err(|_| DomainError::InvalidId(request.message_id.clone()))?;

        if request.title.is_none() && request.description.is_none() {
            return Err(DomainError::NothingToUpdate.into());
        }

        let channel_id = request.channel_id;
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

        let message = match self
            .ctx
            .messaging()
            .fetch_message(channel_id, message_id)
            .await
        {
            Ok(message) => message,
            Err(ExternalError::NotFound(_)) => {
                return Err(DomainError::MessageNotFound(message_id).into())
            }
            Err(e) => return Err(e.into()),
        };

        let mut embed = message
            .embeds
            .into_iter()
            .next()
            .ok_or(DomainError::NoEmbed)?;
        if let Some(title) = request.title {
            embed.title = Some(title);
        }
        if let Some(description) = request.description {
            embed.description = Some(description);
        }

        let edited = self
            .ctx
            .messaging()
            .edit_message(channel_id, message_id, &MessageContent::embed(embed))
            .await
            .map_err(|e| match e {
                ExternalError::NotFound(_) => {
                    ServiceError::from(DomainError::MessageNotFound(message_id))
                }
                other => ServiceError::from(other),
            })?;

        info!(guild_id = %guild_id, channel_id = %channel_id, message_id = %message_id, "Embed updated");

        Ok(EmbedEdited { message: edited })
    }
}
