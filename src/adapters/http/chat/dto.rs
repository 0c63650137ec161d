//! Request and response types for the turn endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::dialog::TurnFields;

/// Turn fields as sent by clients, in the query string or a JSON body.
///
/// Every field is optional; defaults are applied when the turn is built.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnParams {
    pub user_id: Option<String>,
    pub message: Option<String>,
    pub from_name: Option<String>,
    pub to_name: Option<String>,
    pub situation: Option<String>,
    pub translate_from: Option<String>,
    pub translate_to: Option<String>,
}

impl From<TurnParams> for TurnFields {
    fn from(params: TurnParams) -> Self {
        TurnFields {
            user_id: params.user_id,
            message: params.message,
            from_name: params.from_name,
            to_name: params.to_name,
            situation: params.situation,
            translate_from: params.translate_from,
            translate_to: params.translate_to,
        }
    }
}

/// Envelope returned by `POST /v1/waifu`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub user_id: String,
    pub response: String,
}
