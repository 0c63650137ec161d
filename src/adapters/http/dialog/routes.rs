//! Axum router configuration for dialog endpoints.

use axum::routing::{delete, get};
use axum::Router;

use super::handlers::{
    get_dialog_json, get_dialog_str, put_dialog_json, reset_dialog, DialogAppState,
};

/// Creates the dialog router.
///
/// Routes:
/// - `GET /v1/user/dialog/json/:user_id` - Structured turns
/// - `PUT /v1/user/dialog/json/:user_id` - Replace with structured turns
/// - `GET /v1/user/dialog/str/:user_id` - Raw transcript
/// - `DELETE /v1/user/dialog/:user_id` - Reset to empty
pub fn dialog_router() -> Router<DialogAppState> {
    Router::new()
        .route(
            "/v1/user/dialog/json/:user_id",
            get(get_dialog_json).put(put_dialog_json),
        )
        .route("/v1/user/dialog/str/:user_id", get(get_dialog_str))
        .route("/v1/user/dialog/:user_id", delete(reset_dialog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryTranscriptStore;
    use crate::domain::dialog::DialogLimits;
    use crate::domain::foundation::{TenantId, UserId};
    use crate::ports::TranscriptStore;

    fn app(store: InMemoryTranscriptStore) -> Router {
        dialog_router().with_state(DialogAppState::new(Arc::new(store), DialogLimits::default()))
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seeded(transcript: &str) -> InMemoryTranscriptStore {
        let store = InMemoryTranscriptStore::new();
        store
            .put(&TenantId::unspecified(), &UserId::new("erin").unwrap(), transcript)
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn reads_dialog_as_entries() {
        let store = seeded(r#" Erin said: "Hi" Waifu said: "Hello""#).await;

        let response = app(store)
            .oneshot(
                Request::builder()
                    .uri("/v1/user/dialog/json/erin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["dialog"][1]["name"], "Waifu");
        assert_eq!(body["dialog"][1]["index"], 1);
    }

    #[tokio::test]
    async fn rejects_dialog_with_quotes() {
        let store = seeded("").await;

        let response = app(store)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/v1/user/dialog/json/erin")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"dialog":[{"name":"Erin","message":"say \"hi\""}]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reset_of_unknown_user_is_not_found() {
        let response = app(InMemoryTranscriptStore::new())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/user/dialog/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["user_id"], "ghost");
    }
}
