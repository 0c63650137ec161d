//! HTTP adapters - REST API implementations.
//!
//! Each area has its own router; [`api_router`] merges them behind the
//! shared middleware stack.

pub mod chat;
pub mod dialog;
pub mod error;
pub mod middleware;
pub mod status;
pub mod users;

use std::sync::Arc;

use axum::Router;
use http::{HeaderName, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::handlers::chat::ProcessTurnHandler;
use crate::config::{DialogConfig, ServerConfig};
use crate::ports::TranscriptStore;

pub use chat::{chat_router, ChatAppState};
pub use dialog::{dialog_router, DialogAppState};
pub use error::{ApiError, ErrorResponse};
pub use middleware::CurrentTenant;
pub use status::status_router;
pub use users::{users_router, UsersAppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// State of every router, built from the shared store and turn handler.
#[derive(Clone)]
pub struct ApiState {
    pub chat: ChatAppState,
    pub users: UsersAppState,
    pub dialog: DialogAppState,
}

impl ApiState {
    pub fn new(
        store: Arc<dyn TranscriptStore>,
        turns: Arc<ProcessTurnHandler>,
        dialog_config: &DialogConfig,
    ) -> Self {
        Self {
            chat: ChatAppState::new(turns),
            users: UsersAppState::new(store.clone()).with_limits(
                dialog_config.max_user_id_length,
                dialog_config.default_page_size,
                dialog_config.max_page_size,
            ),
            dialog: DialogAppState::new(store, dialog_config.dialog_limits())
                .with_max_user_id_length(dialog_config.max_user_id_length),
        }
    }
}

/// All endpoints, without middleware.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .merge(chat_router().with_state(state.chat))
        .merge(users_router().with_state(state.users))
        .merge(dialog_router().with_state(state.dialog))
        .merge(status_router())
}

/// Wraps a router in tracing, request ids, a request timeout and CORS.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(config))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Any origin unless `cors_origins` lists specific ones.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = config.allowed_origins();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static(middleware::TENANT_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryTranscriptStore;
    use crate::adapters::model::MockCompletionGateway;
    use crate::adapters::translation::MockTranslationBridge;
    use crate::domain::dialog::{PromptAssembler, PromptBudget};
    use crate::domain::text::InputLimits;

    fn app() -> Router {
        app_with(MockCompletionGateway::new(), &ServerConfig::default())
    }

    fn app_with(gateway: MockCompletionGateway, server: &ServerConfig) -> Router {
        let store: Arc<dyn TranscriptStore> = Arc::new(InMemoryTranscriptStore::new());
        let turns = ProcessTurnHandler::new(
            store.clone(),
            Arc::new(gateway),
            Arc::new(MockTranslationBridge::new()),
            PromptAssembler::new(PromptBudget::default(), "Romance"),
            InputLimits::default(),
        );
        let state = ApiState::new(store, Arc::new(turns), &DialogConfig::default());
        with_middleware(api_router(state), server)
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/server/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn incoming_request_id_is_kept() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/server/status")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn slow_completion_inside_the_deadline_is_answered() {
        let gateway = MockCompletionGateway::new()
            .with_completion("Took a moment")
            .with_delay(std::time::Duration::from_millis(200));
        let server = ServerConfig {
            request_timeout_secs: 1,
            ..Default::default()
        };

        let response = with_deadline(gateway, &server).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Took a moment");
    }

    #[tokio::test]
    async fn completion_past_the_deadline_is_cut_off() {
        let gateway = MockCompletionGateway::new()
            .with_completion("Too late")
            .with_delay(std::time::Duration::from_millis(1500));
        let server = ServerConfig {
            request_timeout_secs: 1,
            ..Default::default()
        };

        let response = with_deadline(gateway, &server).await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    async fn with_deadline(
        gateway: MockCompletionGateway,
        server: &ServerConfig,
    ) -> axum::response::Response {
        app_with(gateway, server)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/path?user_id=amy&message=Hi&translate_from=en")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
