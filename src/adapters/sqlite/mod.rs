//! SQLite adapters - Database implementations for repository ports.
//!
//! - `SqliteTranscriptStore` - Conversation records keyed by (tenant, user)

mod transcript_store;

pub use transcript_store::SqliteTranscriptStore;
