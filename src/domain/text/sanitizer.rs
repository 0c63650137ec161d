//! Character filtering for free-text fields.
//!
//! Every truncation in this crate keeps the *suffix* of a string: the most
//! recent part of a conversation is the part worth keeping. Lengths are
//! counted in characters, never bytes.

use crate::domain::foundation::{UserId, ValidationError};

/// Per-field limits applied when a turn request is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub max_message_length: usize,
    pub max_name_length: usize,
    pub max_user_id_length: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_message_length: 1250,
            max_name_length: 20,
            max_user_id_length: 256,
        }
    }
}

/// Returns the last `max_chars` characters of `text`.
pub fn tail_chars(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    match text.char_indices().nth(total - max_chars) {
        Some((start, _)) => &text[start..],
        None => "",
    }
}

/// Strips non-printable characters, trims, and keeps the last `max_length` characters.
///
/// Only printable ASCII (`' '..='~'`) survives. Everything below code point
/// 32, line breaks and tabs included, is dropped along with non-ASCII.
pub fn sanitize(text: &str, max_length: usize) -> String {
    let filtered: String = text.chars().filter(|c| is_printable_ascii(*c)).collect();
    tail_chars(filtered.trim(), max_length).to_string()
}

/// Like [`sanitize`], failing when nothing is left of a required field.
pub fn sanitize_required(
    field: &str,
    text: &str,
    max_length: usize,
) -> Result<String, ValidationError> {
    let cleaned = sanitize(text, max_length);
    if cleaned.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(cleaned)
}

/// Keeps alphanumerics, whitespace and `'?,!`; drops everything else.
///
/// Quotes and colons never survive, so cleaned text cannot forge a
/// `name said: "..."` boundary inside a transcript.
pub fn clean_paragraph(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '\'' | '?' | ',' | '!'))
        .collect()
}

/// Trims and length-checks a raw user id taken from a URL path.
///
/// Unlike turn requests, which keep the suffix of an over-long id, lookups by
/// id reject ids longer than `max_length`.
pub fn validate_user_id(raw: &str, max_length: usize) -> Result<UserId, ValidationError> {
    let cleaned = raw.trim();
    if cleaned.chars().count() > max_length {
        return Err(ValidationError::invalid_format(
            "user_id",
            format!("must be at most {max_length} characters"),
        ));
    }
    UserId::new(cleaned)
}

fn is_printable_ascii(c: char) -> bool {
    matches!(c, ' '..='~')
}
