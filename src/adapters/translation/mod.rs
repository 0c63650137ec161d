//! Translation service adapters.
//!
//! - `GoogleTranslationBridge` - Google Cloud Translation v2 REST API
//! - `PassthroughTranslationBridge` - Translation disabled; text is returned unchanged
//! - `MockTranslationBridge` - Scripted translations for tests

mod google_translation_bridge;
mod mock_translation_bridge;
mod passthrough_translation_bridge;

pub use google_translation_bridge::{GoogleTranslationBridge, GoogleTranslationConfig};
pub use mock_translation_bridge::MockTranslationBridge;
pub use passthrough_translation_bridge::PassthroughTranslationBridge;
