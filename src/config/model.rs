//! Completion backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Completion backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Endpoint receiving the assembled prompt as the `input` form field
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Genre written into the scenario preamble of every prompt
    #[serde(default = "default_genre")]
    pub default_genre: String,

    /// Reply substituted when the backend answers with an error page
    #[serde(default = "default_unavailable_message")]
    pub unavailable_message: String,
}

impl ModelConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate completion backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("MODEL_URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidModelUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.unavailable_message.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MODEL_UNAVAILABLE_MESSAGE"));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
            default_genre: default_genre(),
            unavailable_message: default_unavailable_message(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:80/path/".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_genre() -> String {
    "Romance".to_string()
}

fn default_unavailable_message() -> String {
    "The AI model is currently unavailable. Please try again later.".to_string()
}
