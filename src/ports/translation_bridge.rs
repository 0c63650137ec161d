//! Translation Bridge port.
//!
//! Optional machine translation around the prompt assembler. Prompts are
//! assembled in the pivot language; the bridge moves user text into it and
//! completions back out of it.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::language::{resolve, LanguageTag};

/// A single translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub target: LanguageTag,
    pub text: String,
    /// `auto` asks the service to detect the source language.
    pub source: LanguageTag,
}

impl TranslationRequest {
    pub fn new(target: LanguageTag, text: impl Into<String>, source: LanguageTag) -> Self {
        Self {
            target,
            text: text.into(),
            source,
        }
    }

    /// Pivot-to-pivot requests are answered without calling any service.
    pub fn is_pivot_passthrough(&self) -> bool {
        self.source.is_pivot() && self.target.is_pivot()
    }

    /// The answer to a passthrough request.
    pub fn passthrough(&self) -> Translation {
        Translation {
            translated_text: self.text.clone(),
            detected_source_language: self.source,
        }
    }
}

/// Result of a translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub translated_text: String,
    /// Resolved against the supported set; `auto` when the service named
    /// a language outside it or none at all.
    pub detected_source_language: LanguageTag,
}

impl Translation {
    /// Builds a result from a raw detected-language string reported by a service.
    pub fn detected(translated_text: impl Into<String>, detected: Option<&str>) -> Self {
        Self {
            translated_text: translated_text.into(),
            detected_source_language: resolve(detected.unwrap_or_default()),
        }
    }
}

/// Port for a machine translation service.
#[async_trait]
pub trait TranslationBridge: Send + Sync {
    /// Translate `request.text` into `request.target`.
    ///
    /// Must be idempotent for same-language pairs and must answer pivot-to-pivot
    /// requests as a no-op.
    async fn translate(&self, request: TranslationRequest) -> Result<Translation, TranslationError>;
}

/// Failures of the translation service.
#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    #[error("translation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("translation service unreachable: {0}")]
    Connection(String),

    #[error("translation service returned status {status}")]
    HttpStatus { status: u16 },

    #[error("could not parse translation response: {0}")]
    Parse(String),

    #[error("translation service is not configured")]
    NotConfigured,
}

impl From<TranslationError> for DomainError {
    fn from(err: TranslationError) -> Self {
        DomainError::new(ErrorCode::TranslationFailed, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_bridge_is_object_safe() {
        fn _accepts_dyn(_bridge: &dyn TranslationBridge) {}
    }

    #[test]
    fn pivot_to_pivot_is_passthrough() {
        let request = TranslationRequest::new(LanguageTag::PIVOT, "hi", LanguageTag::PIVOT);
        assert!(request.is_pivot_passthrough());
        let translation = request.passthrough();
        assert_eq!(translation.translated_text, "hi");
        assert_eq!(translation.detected_source_language, LanguageTag::PIVOT);
    }

    #[test]
    fn auto_source_is_not_passthrough() {
        let request = TranslationRequest::new(LanguageTag::PIVOT, "hola", LanguageTag::AUTO);
        assert!(!request.is_pivot_passthrough());
    }

    #[test]
    fn detected_language_is_resolved() {
        assert_eq!(
            Translation::detected("x", Some("fr")).detected_source_language.as_str(),
            "fr"
        );
        assert_eq!(
            Translation::detected("x", Some("xx-unknown")).detected_source_language,
            LanguageTag::AUTO
        );
        assert_eq!(Translation::detected("x", None).detected_source_language, LanguageTag::AUTO);
    }
}
