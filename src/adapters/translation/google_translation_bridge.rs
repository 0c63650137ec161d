//! Google Translation Bridge - Cloud Translation v2 REST implementation.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GoogleTranslationConfig::new(api_key)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let bridge = GoogleTranslationBridge::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::TranslationConfig;
use crate::ports::{Translation, TranslationBridge, TranslationError, TranslationRequest};

/// Configuration for the Google translation bridge.
#[derive(Debug, Clone)]
pub struct GoogleTranslationConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Endpoint (default: https://translation.googleapis.com/language/translate/v2).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GoogleTranslationConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Builds a configuration from application settings.
    pub fn from_config(config: &TranslationConfig) -> Result<Self, TranslationError> {
        let api_key = config
            .api_key
            .as_ref()
            .filter(|key| !key.is_empty())
            .ok_or(TranslationError::NotConfigured)?;

        Ok(Self::new(api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout()))
    }

    /// Sets the endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Translation bridge backed by Google Cloud Translation.
pub struct GoogleTranslationBridge {
    config: GoogleTranslationConfig,
    client: Client,
}

impl GoogleTranslationBridge {
    /// Creates a new bridge with the given configuration.
    pub fn new(config: GoogleTranslationConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslationError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn to_google_request<'a>(request: &'a TranslationRequest) -> GoogleRequest<'a> {
        GoogleRequest {
            q: &request.text,
            target: request.target.as_str(),
            source: (!request.source.is_auto()).then(|| request.source.as_str()),
            format: "text",
        }
    }

    fn map_request_error(&self, e: reqwest::Error) -> TranslationError {
        if e.is_timeout() {
            TranslationError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            TranslationError::Connection(e.to_string())
        }
    }
}

/// Converts a parsed Google response into a [`Translation`].
///
/// The service only reports a detected language when no source was given.
fn parse_response(
    response: GoogleResponse,
    request: &TranslationRequest,
) -> Result<Translation, TranslationError> {
    let first = response
        .data
        .translations
        .into_iter()
        .next()
        .ok_or_else(|| TranslationError::Parse("response contained no translations".to_string()))?;

    let detected = first
        .detected_source_language
        .or_else(|| (!request.source.is_auto()).then(|| request.source.as_str().to_string()));

    Ok(Translation::detected(first.translated_text, detected.as_deref()))
}

#[async_trait]
impl TranslationBridge for GoogleTranslationBridge {
    async fn translate(&self, request: TranslationRequest) -> Result<Translation, TranslationError> {
        if request.is_pivot_passthrough() {
            return Ok(request.passthrough());
        }

        let response = self
            .client
            .post(&self.config.base_url)
            .query(&[("key", self.config.api_key())])
            .json(&Self::to_google_request(&request))
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body: GoogleResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Parse(e.to_string()))?;

        parse_response(body, &request)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Google API types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GoogleRequest<'a> {
    q: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    data: GoogleData,
}

#[derive(Debug, Deserialize)]
struct GoogleData {
    translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
    detected_source_language: Option<String>,
}
