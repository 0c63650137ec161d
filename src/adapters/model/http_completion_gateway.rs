//! HTTP Completion Gateway - posts the assembled prompt to a text-generation endpoint.
//!
//! The endpoint receives a single form field named `input` and answers with
//! the raw completion as the response body.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpGatewayConfig::new("http://localhost:80/path/")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let gateway = HttpCompletionGateway::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::config::ModelConfig;
use crate::ports::{CompletionGateway, GatewayError};

/// Configuration for the HTTP completion gateway.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Endpoint receiving the prompt.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpGatewayConfig {
    /// Creates a new configuration for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ModelConfig> for HttpGatewayConfig {
    fn from(config: &ModelConfig) -> Self {
        Self::new(config.url.clone()).with_timeout(config.timeout())
    }
}

/// Completion gateway over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpCompletionGateway {
    config: HttpGatewayConfig,
    client: Client,
}

impl HttpCompletionGateway {
    /// Creates a new gateway with the given configuration.
    pub fn new(config: HttpGatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn map_request_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            GatewayError::connection(format!("Connection failed: {}", e))
        } else {
            GatewayError::connection(e.to_string())
        }
    }

    /// Rejects non-success statuses.
    fn check_status(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(GatewayError::HttpStatus {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl CompletionGateway for HttpCompletionGateway {
    async fn complete(&self, input: &str) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(&self.config.url)
            .form(&[("input", input)])
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let response = Self::check_status(response)?;

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else {
                GatewayError::Body(e.to_string())
            }
        })
    }
}
