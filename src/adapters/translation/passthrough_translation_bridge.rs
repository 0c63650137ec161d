//! Passthrough Translation Bridge - used when no translation service is configured.

use async_trait::async_trait;

use crate::ports::{Translation, TranslationBridge, TranslationError, TranslationRequest};

/// Returns every text unchanged and reports the requested source as detected.
///
/// With an `auto` source nothing is detected, so outbound translation is
/// skipped and replies come back in the pivot language.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslationBridge;

impl PassthroughTranslationBridge {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TranslationBridge for PassthroughTranslationBridge {
    async fn translate(&self, request: TranslationRequest) -> Result<Translation, TranslationError> {
        Ok(request.passthrough())
    }
}
