//! Shared error response for the JSON endpoints.
//!
//! Store and backend failures are reported with fixed texts; their details
//! only reach the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::UserNotice;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// JSON body of a failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A `DomainError` rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        self.0.code
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.code {
            ErrorCode::ValidationFailed => (StatusCode::BAD_REQUEST, self.0.message.clone()),
            ErrorCode::UserNotFound => (StatusCode::NOT_FOUND, self.0.message.clone()),
            ErrorCode::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                UserNotice::STORE_ERROR.to_string(),
            ),
            ErrorCode::GatewayUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                UserNotice::DEFAULT_MODEL_UNAVAILABLE.to_string(),
            ),
            ErrorCode::TranslationFailed => (
                StatusCode::SERVICE_UNAVAILABLE,
                UserNotice::TRANSLATION_ERROR.to_string(),
            ),
            ErrorCode::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        (status, Json(ErrorResponse::new(self.0.code.to_string(), message))).into_response()
    }
}
