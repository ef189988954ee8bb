//! Gateway event handler

use crate::commands;
use crate::handlers::InteractionDispatcher;
use crate::server::BotState;
use async_trait::async_trait;
use serenity::all::{Command, Context, EventHandler, Interaction, Ready};

/// Serenity event handler
#[derive(Debug)]
pub struct Handler {
    state: BotState,
}

impl Handler {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Connected to Discord"
        );

        match Command::set_global_commands(&ctx.http, commands::definitions()).await {
            Ok(registered) => tracing::info!(count = registered.len(), "Slash commands registered"),
            Err(e) => tracing::error!(error = %e, "Failed to register slash commands"),
        }

        // Ready fires again after a reconnect; keep a single notifier
        if self.state.start_notifier(&ctx) {
            tracing::info!("Birthday checks scheduled");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let interaction_id = interaction.id();
        let services = self.state.services(&ctx);

        if let Err(e) = InteractionDispatcher::dispatch(services, &ctx, interaction).await {
            tracing::error!(interaction_id = %interaction_id, error = %e, "Failed to handle interaction");
        }
    }
}
