//! Domain layer containing conversation logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, errors)
//! - `text` - Character filtering and suffix-keeping truncation
//! - `language` - Supported language tags and outbound translation target selection
//! - `dialog` - Turn requests, prompt assembly, transcripts and records

pub mod dialog;
pub mod foundation;
pub mod language;
pub mod text;
