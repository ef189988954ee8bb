//! Dino bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p dino-bot
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` when present).

use dino_common::{try_init_tracing_with_config, AppError, BotConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration before tracing so the log format can follow it
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let e = AppError::from(e);
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(
        config.env,
        config.log_json,
    )) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.env,
        data_dir = %config.storage.data_dir.display(),
        check_interval_secs = config.scheduler.birthday_check_interval_secs,
        "Configuration loaded"
    );

    if let Err(e) = dino_bot::server::run(config).await {
        error!(error = %e, code = e.error_code(), "Bot stopped with an error");
        std::process::exit(e.exit_code());
    }
}
