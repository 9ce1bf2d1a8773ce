//! # rf-config
//!
//! Layered settings: built-in defaults, then `config/default.toml`, then
//! `config/local.toml`, then `RF__SECTION__KEY` environment variables.
//! A `.env` file, if present, is loaded into the environment first.

use std::path::Path;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "RF";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub rewards: RewardSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// May carry credentials for non-file backends, hence secret.
    pub url: SecretString,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RewardSettings {
    /// Point cost of one reward
    pub unit: u64,
    /// Entries kept in the activity feed
    pub feed_window: usize,
}

impl Settings {
    /// Loads `.env`, then the layered settings from `./config`.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("loaded environment from {}", path.display());
        }
        Self::load_from(Path::new("config"), ENV_PREFIX)
    }

    pub fn load_from(dir: &Path, env_prefix: &str) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite:rusty_feedback.db")?
            .set_default("rewards.unit", 100)?
            .set_default("rewards.feed_window", 5)?
            .add_source(File::from(dir.join("default.toml")).required(false))
            .add_source(File::from(dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.rewards.unit == 0 {
            return Err(ConfigError::Invalid("rewards.unit must be positive".into()));
        }
        if self.rewards.feed_window == 0 {
            return Err(ConfigError::Invalid("rewards.feed_window must be positive".into()));
        }
        Ok(())
    }
}
