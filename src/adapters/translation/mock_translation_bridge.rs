//! Mock Translation Bridge for testing.
//!
//! Marks translated text with its target (`[fr] hello`) so tests can see which
//! direction a text travelled, reports a configurable detected language, and
//! records every call.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::language::LanguageTag;
use crate::ports::{Translation, TranslationBridge, TranslationError, TranslationRequest};

/// Mock translation bridge for testing.
#[derive(Debug, Clone)]
pub struct MockTranslationBridge {
    /// Language reported for `auto` sources.
    detected: LanguageTag,
    /// Failures to return before answering normally.
    errors: Arc<Mutex<VecDeque<TranslationError>>>,
    calls: Arc<Mutex<Vec<TranslationRequest>>>,
}

impl Default for MockTranslationBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranslationBridge {
    /// Creates a mock that detects the pivot language.
    pub fn new() -> Self {
        Self {
            detected: LanguageTag::PIVOT,
            errors: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the language reported for `auto` sources.
    pub fn detecting(mut self, language: LanguageTag) -> Self {
        self.detected = language;
        self
    }

    /// Queues a failure for the next call.
    pub fn with_error(self, error: TranslationError) -> Self {
        self.errors.lock().unwrap().push_back(error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<TranslationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationBridge for MockTranslationBridge {
    async fn translate(&self, request: TranslationRequest) -> Result<Translation, TranslationError> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some(err) = self.errors.lock().unwrap().pop_front() {
            return Err(err);
        }
        if request.is_pivot_passthrough() {
            return Ok(request.passthrough());
        }

        let detected = if request.source.is_auto() {
            self.detected
        } else {
            request.source
        };
        Ok(Translation {
            translated_text: format!("[{}] {}", request.target, request.text),
            detected_source_language: detected,
        })
    }
}
