//! Configuration management for telelog
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all dispatcher settings. It uses the `figment`
//! crate to load configuration from a TOML file and merge it with
//! environment variables. A `Config` is validated before any dispatcher is
//! constructed from it; an invalid configuration never reaches delivery
//! code.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
///
/// These are fatal: construction of a dispatcher fails atomically and no
/// delivery capability exists afterwards.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration sources could not be read or deserialized. This
    /// also covers an unsupported `environment` value, which the closed
    /// [`Environment`] enum rejects during deserialization.
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
    /// The destination list was empty.
    #[error("at least one destination must be configured")]
    NoDestinations,
    /// A required credential field was missing or blank.
    #[error("destination {index}: {field} must not be blank")]
    BlankCredential { index: usize, field: &'static str },
    /// A destination's per-attempt timeout was zero.
    #[error("destination {index}: timeout_ms must be greater than zero")]
    InvalidTimeout { index: usize },
}

/// The deployment environment. Closed enum with a single supported value;
/// anything else fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
}

/// Settings for one Telegram destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    pub bot_token: String,
    /// Chat or channel the bot posts into.
    pub chat_id: String,
    /// Base URL of the Bot API server. Defaults to the public
    /// `https://api.telegram.org`; self-hosted Bot API servers override it.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Per-attempt request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Total transport attempts per delivery. `0` disables retries, which
    /// still performs the one unconditional initial attempt.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_attempts() -> u32 {
    3
}

/// One configured destination, discriminated by `kind`.
///
/// Unknown kinds deserialize to `Unsupported` instead of failing, so a
/// configuration written for a newer version of this crate still loads;
/// the dispatcher skips such entries at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DestinationConfig {
    Telegram(TelegramConfig),
    #[serde(other)]
    Unsupported,
}

/// The main configuration struct for the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The deployment environment.
    pub environment: Environment,
    /// Ordered list of destinations to fan out to.
    pub destinations: Vec<DestinationConfig>,
}

impl Config {
    /// Loads the configuration by layering sources: a TOML file, then
    /// environment variables prefixed with `TELELOG_`.
    ///
    /// # Arguments
    /// * `config_path` - The path to the TOML configuration file.
    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        let config: Config = Figment::new()
            .merge(Toml::file(config_path))
            // Allow overriding with environment variables, e.g. TELELOG_ENVIRONMENT=production
            .merge(Env::prefixed("TELELOG_"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from an in-memory TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = Figment::new().merge(Toml::string(toml)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants a dispatcher relies on: a non-empty destination
    /// list, non-blank credentials, and positive timeouts. Unsupported
    /// destination kinds are not validated; they are skipped at dispatcher
    /// construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.destinations.is_empty() {
            return Err(ConfigError::NoDestinations);
        }

        for (index, destination) in self.destinations.iter().enumerate() {
            let telegram = match destination {
                DestinationConfig::Telegram(telegram) => telegram,
                DestinationConfig::Unsupported => continue,
            };

            if telegram.bot_token.trim().is_empty() {
                return Err(ConfigError::BlankCredential {
                    index,
                    field: "bot_token",
                });
            }
            if telegram.chat_id.trim().is_empty() {
                return Err(ConfigError::BlankCredential {
                    index,
                    field: "chat_id",
                });
            }
            if let Some(api_url) = &telegram.api_url {
                if api_url.trim().is_empty() {
                    return Err(ConfigError::BlankCredential {
                        index,
                        field: "api_url",
                    });
                }
            }
            if telegram.timeout_ms == 0 {
                return Err(ConfigError::InvalidTimeout { index });
            }
        }

        Ok(())
    }
}
