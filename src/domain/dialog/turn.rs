//! The validated input of a single turn.

use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::language::{resolve, LanguageTag};
use crate::domain::text::{sanitize, InputLimits};

/// User id assumed when a turn names none.
pub const DEFAULT_USER_ID: &str = "default2";

/// Respondent label assumed when a turn names none.
pub const DEFAULT_RESPONDENT: &str = "Waifu";

/// Raw turn fields as received; every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct TurnFields {
    pub user_id: Option<String>,
    pub message: Option<String>,
    pub from_name: Option<String>,
    pub to_name: Option<String>,
    pub situation: Option<String>,
    pub translate_from: Option<String>,
    pub translate_to: Option<String>,
}

/// A sanitized turn with defaults applied and language tags resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub user_id: UserId,
    pub message: String,
    /// Empty means the speaker is implicit.
    pub from_name: String,
    pub to_name: String,
    pub situation: String,
    pub translate_from: LanguageTag,
    pub translate_to: LanguageTag,
}

impl TurnRequest {
    /// Builds a turn from raw fields.
    ///
    /// Only the user id can be rejected: an over-long id keeps its suffix,
    /// then must consist of letters, digits, `_` and `-`. Free-text fields are
    /// sanitized and may end up empty.
    pub fn from_fields(fields: TurnFields, limits: &InputLimits) -> Result<Self, ValidationError> {
        let raw_user = fields
            .user_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        let user_id = UserId::new(sanitize(&raw_user, limits.max_user_id_length))?;

        let to_name = sanitize_name(fields.to_name.as_deref(), limits.max_name_length);
        let to_name = if to_name.is_empty() {
            DEFAULT_RESPONDENT.to_string()
        } else {
            to_name
        };

        Ok(Self {
            user_id,
            message: sanitize(
                fields.message.as_deref().unwrap_or_default(),
                limits.max_message_length,
            ),
            from_name: sanitize_name(fields.from_name.as_deref(), limits.max_name_length),
            to_name,
            situation: sanitize(
                fields.situation.as_deref().unwrap_or_default(),
                limits.max_message_length,
            ),
            translate_from: resolve(fields.translate_from.as_deref().unwrap_or_default()),
            translate_to: resolve(fields.translate_to.as_deref().unwrap_or_default()),
        })
    }
}

/// Speaker labels delimit turns, so quotes are dropped along with control characters.
fn sanitize_name(raw: Option<&str>, max_length: usize) -> String {
    let without_quotes: String = raw.unwrap_or_default().chars().filter(|c| *c != '"').collect();
    sanitize(&without_quotes, max_length)
}
