//! Bot setup
//!
//! Opens the store, connects to Discord and runs until the gateway closes or
//! the process receives Ctrl-C.

mod handler;
mod state;

pub use handler::Handler;
pub use state::{BotState, NotifierSlot};

use dino_common::{AppError, BotConfig};
use dino_store::{FileBlobStore, Store};
use serenity::all::{Client, GatewayIntents};

/// Gateway intents the bot needs: guild structure and member roles
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS
}

/// Open the persistent store and create the bot state
pub async fn create_bot_state(config: &BotConfig) -> Result<BotState, AppError> {
    tracing::info!(data_dir = %config.storage.data_dir.display(), "Opening data directory...");
    let blobs = FileBlobStore::open(config.storage.data_dir.clone())
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    Ok(BotState::new(Store::new(blobs), config.scheduler.interval()))
}

/// Run the bot with configuration
pub async fn run(config: BotConfig) -> Result<(), AppError> {
    let state = create_bot_state(&config).await?;
    let notifier = state.notifier();

    let mut client = Client::builder(&config.token, intents())
        .event_handler(Handler::new(state))
        .await
        .map_err(AppError::gateway)?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received");

        let handle = notifier.lock().take();
        if let Some(handle) = handle {
            handle.stop().await;
        }
        shard_manager.shutdown_all().await;
    });

    tracing::info!("Connecting to Discord...");
    client.start().await.map_err(AppError::gateway)?;

    tracing::info!("Disconnected from Discord");
    Ok(())
}
