//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Server host and port do not form a bind address")]
    InvalidBindAddress,

    #[error("Request timeout of {request_secs}s must exceed the {turn_secs}s a turn may take")]
    RequestTimeoutTooShort { request_secs: u64, turn_secs: u64 },

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("Model URL must start with http:// or https://")]
    InvalidModelUrl,

    #[error("Translation base URL must start with http:// or https://")]
    InvalidTranslationUrl,

    #[error("Limit '{0}' must be greater than zero")]
    NonPositiveLimit(&'static str),

    #[error("Default page size cannot exceed the maximum page size")]
    InvalidPageSize,

    #[error("Stored transcript ceiling cannot be smaller than the dialog budget")]
    StorageCeilingTooSmall,
}
