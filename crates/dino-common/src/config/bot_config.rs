//! Bot configuration
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Main bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token
    pub token: String,
    pub env: Environment,
    pub storage: StorageConfig,
    pub scheduler: SchedulerConfig,
    /// Emit JSON logs
    pub log_json: bool,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Where the JSON tables live
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Daily notifier settings
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub birthday_check_interval_secs: u64,
}

impl SchedulerConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.birthday_check_interval_secs)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_check_interval_secs() -> u64 {
    86_400 // 24 hours
}

impl BotConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = var("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("DISCORD_TOKEN"))?;

        let env = match var("APP_ENV") {
            Some(s) => Environment::parse(&s).ok_or(ConfigError::InvalidValue("APP_ENV", s))?,
            None => Environment::default(),
        };

        let birthday_check_interval_secs = match var("BIRTHDAY_CHECK_INTERVAL_SECS") {
            Some(s) => s
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue("BIRTHDAY_CHECK_INTERVAL_SECS", s))?,
            None => default_check_interval_secs(),
        };

        let log_json = match var("LOG_JSON") {
            Some(s) => match s.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidValue("LOG_JSON", s)),
            },
            None => env.is_production(),
        };

        Ok(Self {
            token,
            env,
            storage: StorageConfig {
                data_dir: var("DATA_DIR").map_or_else(default_data_dir, PathBuf::from),
            },
            scheduler: SchedulerConfig {
                birthday_check_interval_secs,
            },
            log_json,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
