//! Daily notifier
//!
//! Periodic scan of every guild with birthday data: greets members whose
//! birthday is today, prunes stale records and refreshes the birthday list.

use chrono::NaiveDate;
use dino_core::{ExternalError, Snowflake};
use dino_store::Birthdays;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

use crate::dto::{GuildTick, TickReport};

use super::context::ServiceContext;
use super::display;
use super::embed::EmbedService;
use super::error::ServiceResult;

/// Scans all guilds once per tick
pub struct DailyNotifier {
    ctx: ServiceContext,
}

impl DailyNotifier {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start ticking every `period`; the first tick runs immediately
    pub fn spawn(self: Arc<Self>, period: Duration) -> NotifierHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let running = Arc::new(AtomicBool::new(true));

        let task = {
            let running = running.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let report = self.run_tick().await;
                            info!(
                                guilds = report.guilds.len(),
                                greetings = report.greetings(),
                                failures = report.failures.len(),
                                "Birthday check finished"
                            );
                        }
                        changed = shutdown_rx.changed() => {
                            if changed.is_err() || *shutdown_rx.borrow() {
                                break;
                            }
                        }
                    }
                }

                running.store(false, Ordering::SeqCst);
                info!("Daily notifier stopped");
            })
        };

        info!(period_secs = period.as_secs(), "Daily notifier started");

        NotifierHandle {
            shutdown: shutdown_tx,
            running,
            task,
        }
    }

    /// Run one scan over every guild that has birthday data.
    ///
    /// A failure in one guild is recorded and does not stop the others.
    #[instrument(skip(self))]
    pub async fn run_tick(&self) -> TickReport {
        let today = self.ctx.now().date();
        let mut report = TickReport {
            date: Some(today),
            ..TickReport::default()
        };

        let guild_ids = match self.ctx.store().guild_ids::<Birthdays>().await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "Failed to load birthday table");
                return report;
            }
        };

        for guild_id in guild_ids {
            match self.process_guild(guild_id, today).await {
                Ok(tick) => report.guilds.push(tick),
                Err(e) => {
                    warn!(guild_id = %guild_id, error = %e, "Birthday check failed for guild");
                    report.failures.push((guild_id, e.to_string()));
                }
            }
        }

        report
    }

    async fn process_guild(&self, guild_id: Snowflake, today: NaiveDate) -> ServiceResult<GuildTick> {
        let mut tick = GuildTick::new(guild_id);
        let store = self.ctx.store();

        {
            let _guard = store.lock::<Birthdays>(guild_id).await;

            match self.ctx.membership().resolve_guild(guild_id).await {
                Ok(_) => {}
                Err(ExternalError::NotFound(_)) => {
                    info!(guild_id = %guild_id, "Guild is gone, dropping its birthday data");
                    store.remove_row::<Birthdays>(guild_id).await?;
                    tick.dropped = true;
                    return Ok(tick);
                }
                Err(e) => return Err(e.into()),
            }

            let mut row = store.read_row::<Birthdays>(guild_id).await?;
            let mut dirty = false;

            let channel_id = match row.birthday_channel_id {
                Some(channel_id) => match self
                    .ctx
                    .membership()
                    .resolve_channel(guild_id, channel_id)
                    .await
                {
                    Ok(_) => Some(channel_id),
                    Err(ExternalError::NotFound(_)) => {
                        info!(guild_id = %guild_id, channel_id = %channel_id, "Birthday channel is gone, clearing it");
                        row.clear_channel();
                        dirty = true;
                        tick.channel_cleared = true;
                        None
                    }
                    Err(e) => {
                        warn!(guild_id = %guild_id, channel_id = %channel_id, error = %e, "Could not resolve birthday channel");
                        None
                    }
                },
                None => None,
            };

            if let Some(channel_id) = channel_id {
                let celebrants: Vec<Snowflake> = row
                    .users
                    .iter()
                    .filter(|entry| entry.date().is_some_and(|date| date.matches(today)))
                    .map(|entry| entry.user_id)
                    .collect();

                for user_id in celebrants {
                    match self.ctx.membership().fetch_member(guild_id, user_id).await {
                        Ok(member) => {
                            let greeting = display::birthday_greeting(member.user_id);
                            match self.ctx.messaging().send_message(channel_id, &greeting).await {
                                Ok(_) => {
                                    info!(guild_id = %guild_id, user_id = %user_id, "Birthday greeting sent");
                                    tick.greeted.push(user_id);
                                }
                                Err(e) => {
                                    warn!(guild_id = %guild_id, user_id = %user_id, error = %e, "Failed to send birthday greeting");
                                }
                            }
                        }
                        Err(ExternalError::NotFound(_)) => {
                            info!(guild_id = %guild_id, user_id = %user_id, "Member left, removing birthday");
                            row.remove(user_id);
                            dirty = true;
                            tick.removed.push(user_id);
                        }
                        Err(e) => {
                            warn!(guild_id = %guild_id, user_id = %user_id, error = %e, "Could not fetch member for greeting");
                        }
                    }
                }
            } else {
                debug!(guild_id = %guild_id, "No usable birthday channel, skipping greetings");
            }

            if dirty {
                store.write_row::<Birthdays>(guild_id, row).await?;
            }
        }

        tick.render = Some(EmbedService::new(&self.ctx).render(guild_id).await?);
        Ok(tick)
    }
}

/// Control handle for a spawned notifier
#[derive(Debug)]
pub struct NotifierHandle {
    shutdown: watch::Sender<bool>,
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl NotifierHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Signal the loop to stop and wait for it to finish the current tick
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Daily notifier task ended abnormally");
        }
    }
}
