//! Translation service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Translation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    /// Which translation backend to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Google Cloud Translation API key
    pub api_key: Option<String>,

    /// Base URL of the translation endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Translation backend type
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// Text passes through untranslated
    #[default]
    None,
    Google,
}

impl TranslationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Time a turn may spend translating: one inbound and one outbound call.
    pub fn turn_allowance(&self) -> Duration {
        match self.provider {
            TranslationProvider::None => Duration::ZERO,
            TranslationProvider::Google => self.timeout() * 2,
        }
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate translation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == TranslationProvider::Google {
            if !self.has_api_key() {
                return Err(ValidationError::MissingRequired("TRANSLATION_API_KEY"));
            }
            if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
                return Err(ValidationError::InvalidTranslationUrl);
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_timeout() -> u64 {
    15
}
