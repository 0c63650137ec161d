//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TranscriptStore` - Persistence of conversation records per (tenant, user)
//! - `CompletionGateway` - The text-generation backend
//! - `TranslationBridge` - Machine translation into and out of the pivot language

mod completion_gateway;
mod transcript_store;
mod translation_bridge;

pub use completion_gateway::{CompletionGateway, GatewayError};
pub use transcript_store::{StoreError, TranscriptStore};
pub use translation_bridge::{Translation, TranslationBridge, TranslationError, TranslationRequest};
