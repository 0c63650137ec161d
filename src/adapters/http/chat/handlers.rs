//! HTTP handlers for chat turns.
//!
//! Both endpoints always answer 200: failures surface as one of the fixed
//! notices in the reply text.

use std::sync::Arc;

use axum::extract::{Json, Query, State};

use crate::adapters::http::middleware::CurrentTenant;
use crate::application::handlers::chat::{ProcessTurnCommand, ProcessTurnHandler};

use super::dto::{TurnParams, TurnResponse};

#[derive(Clone)]
pub struct ChatAppState {
    pub turns: Arc<ProcessTurnHandler>,
}

impl ChatAppState {
    pub fn new(turns: Arc<ProcessTurnHandler>) -> Self {
        Self { turns }
    }
}

/// POST /path - Turn fields in the query string, reply as plain text
pub async fn post_turn_query(
    State(state): State<ChatAppState>,
    CurrentTenant(tenant): CurrentTenant,
    Query(params): Query<TurnParams>,
) -> String {
    let cmd = ProcessTurnCommand {
        tenant,
        fields: params.into(),
    };
    state.turns.handle(cmd).await.reply
}

/// POST /v1/waifu - Turn fields in a JSON body, reply in a JSON envelope
///
/// A missing or unreadable body is treated as a turn without fields.
pub async fn post_turn_json(
    State(state): State<ChatAppState>,
    CurrentTenant(tenant): CurrentTenant,
    body: Option<Json<TurnParams>>,
) -> Json<TurnResponse> {
    let params = body.map(|Json(params)| params).unwrap_or_default();
    let cmd = ProcessTurnCommand {
        tenant,
        fields: params.into(),
    };
    let result = state.turns.handle(cmd).await;
    Json(TurnResponse {
        user_id: result.user_id,
        response: result.reply,
    })
}
