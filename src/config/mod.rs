//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WAIFU_API` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use waifu_api::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Completion backend at {}", config.model.url);
//! ```

mod database;
mod dialog;
mod error;
mod model;
mod server;
mod translation;

pub use database::DatabaseConfig;
pub use dialog::DialogConfig;
pub use error::{ConfigError, ValidationError};
pub use model::ModelConfig;
pub use server::{Environment, ServerConfig};
pub use translation::{TranslationConfig, TranslationProvider};

use serde::Deserialize;
use std::time::Duration;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup backed by `dialogs.db` in the working directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Transcript store configuration (SQLite)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Completion backend configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Translation service configuration
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Transcript budgets and input limits
    #[serde(default)]
    pub dialog: DialogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WAIFU_API` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WAIFU_API__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WAIFU_API__MODEL__URL=...` -> `model.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WAIFU_API")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.model.validate()?;
        self.translation.validate()?;
        self.dialog.validate()?;

        let turn_budget = self.turn_budget();
        if !self.server.outlasts(turn_budget) {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                turn_secs: turn_budget.as_secs(),
            });
        }
        Ok(())
    }

    /// Longest a turn may wait on the network: the completion backend plus
    /// inbound and outbound translation.
    pub fn turn_budget(&self) -> Duration {
        self.model.timeout() + self.translation.turn_allowance()
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
