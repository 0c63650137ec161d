//! HTTP listener configuration

use http::HeaderValue;
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for `request_timeout_secs`.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Listener, logging and request-deadline settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Deadline for a whole request, turns included.
    ///
    /// Must outlast the completion backend plus both translation legs, or
    /// slow turns are cut off before they can answer with a notice.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins; unset allows any origin
    pub cors_origins: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn bind_address(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// True when a turn taking `turn_budget` finishes before the request deadline.
    pub fn outlasts(&self, turn_budget: Duration) -> bool {
        self.request_timeout() > turn_budget
    }

    /// Configured origins as header values. Entries that are not valid header
    /// values are skipped; an empty list means any origin.
    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.bind_address().is_err() {
            return Err(ValidationError::InvalidBindAddress);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info,waifu_api=debug,sqlx=warn".to_string()
}

// Model timeout (120s) plus two translation legs (15s each), with headroom.
fn default_request_timeout() -> u64 {
    180
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_port_5000() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address().unwrap().to_string(), "0.0.0.0:5000");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.request_timeout(), Duration::from_secs(180));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deadline_must_strictly_outlast_the_turn() {
        let config = ServerConfig {
            request_timeout_secs: 150,
            ..Default::default()
        };
        assert!(config.outlasts(Duration::from_secs(149)));
        assert!(!config.outlasts(Duration::from_secs(150)));
    }

    #[test]
    fn origins_skip_blanks_and_invalid_values() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173, ,bad\norigin,https://chat.example".to_string()),
            ..Default::default()
        };
        let origins = config.allowed_origins();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:5173");
        assert_eq!(origins[1], "https://chat.example");
    }

    #[test]
    fn unset_origins_mean_any() {
        assert!(ServerConfig::default().allowed_origins().is_empty());
    }

    #[test]
    fn rejects_unusable_listener_settings() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(zero_port.validate(), Err(ValidationError::InvalidPort)));

        let bad_host = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_host.validate(), Err(ValidationError::InvalidBindAddress)));
    }

    #[test]
    fn rejects_timeouts_outside_range() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
    }
}
