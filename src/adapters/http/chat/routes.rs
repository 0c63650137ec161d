//! Axum router configuration for chat endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{post_turn_json, post_turn_query, ChatAppState};

/// Creates the chat router.
///
/// Routes:
/// - `POST /path` - Turn from query parameters, plain-text reply
/// - `POST /v1/waifu` - Turn from a JSON body, JSON reply
pub fn chat_router() -> Router<ChatAppState> {
    Router::new()
        .route("/path", post(post_turn_query))
        .route("/v1/waifu", post(post_turn_json))
}
