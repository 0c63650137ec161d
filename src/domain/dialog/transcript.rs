//! Conversion between a raw transcript and its structured turn list.
//!
//! A transcript is a sequence of `<name> said: "<message>"` fragments joined by
//! single spaces. Reading picks out every complete fragment in order and is
//! the exact inverse of [`join_entries`]: names come back byte for byte, empty
//! or padded ones included. An unterminated trailing fragment (a turn still
//! awaiting its completion) is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::text::sanitize;

static TURN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([^"]*?) said: "([^"]*)"(?: |$)"#).expect("turn pattern is valid"));

/// One turn of a conversation in structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogEntry {
    #[serde(default)]
    pub index: usize,
    pub name: String,
    pub message: String,
}

impl DialogEntry {
    pub fn new(index: usize, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Renders the entry as a transcript fragment.
    pub fn to_fragment(&self) -> String {
        format!("{} said: \"{}\"", self.name, self.message)
    }
}

/// Limits applied to a structured dialog before it replaces a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLimits {
    pub max_entries: usize,
    pub max_name_length: usize,
    pub max_message_length: usize,
}

impl Default for DialogLimits {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            max_name_length: 50,
            max_message_length: 1250,
        }
    }
}

/// Splits a transcript into its complete turns, indexed from zero.
///
/// Each match consumes the separator space after its closing quote, so the
/// next name starts exactly where the previous fragment ended.
pub fn parse_transcript(transcript: &str) -> Vec<DialogEntry> {
    TURN_PATTERN
        .captures_iter(transcript)
        .enumerate()
        .map(|(index, caps)| DialogEntry::new(index, &caps[1], &caps[2]))
        .collect()
}

/// Joins entries into transcript text, in the order given.
pub fn join_entries(entries: &[DialogEntry]) -> String {
    entries
        .iter()
        .map(DialogEntry::to_fragment)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sanitizes a submitted dialog and re-indexes it in submission order.
///
/// Control characters, line breaks included, are stripped from both fields.
/// Neither may be empty after sanitation, and neither may contain `"`, which would split a turn.
pub fn normalize_entries(
    entries: Vec<DialogEntry>,
    limits: &DialogLimits,
) -> Result<Vec<DialogEntry>, ValidationError> {
    if entries.len() > limits.max_entries {
        return Err(ValidationError::too_many(
            "dialog",
            limits.max_entries,
            entries.len(),
        ));
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = sanitize(&entry.name, limits.max_name_length);
            let message = sanitize(&entry.message, limits.max_message_length);
            if name.is_empty() {
                return Err(ValidationError::empty_field(format!("dialog[{index}].name")));
            }
            if message.is_empty() {
                return Err(ValidationError::empty_field(format!("dialog[{index}].message")));
            }
            if name.contains('"') || message.contains('"') {
                return Err(ValidationError::invalid_format(
                    format!("dialog[{index}]"),
                    "double quotes are not allowed",
                ));
            }
            Ok(DialogEntry::new(index, name, message))
        })
        .collect()
}
