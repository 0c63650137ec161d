//! In-memory adapters for tests and local development.

mod in_memory_transcript_store;

pub use in_memory_transcript_store::InMemoryTranscriptStore;
