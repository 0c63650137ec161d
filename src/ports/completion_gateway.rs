//! Completion Gateway port.
//!
//! The text-generation backend is a black box: one prompt string in, raw
//! completion text out. The gateway performs no retries; a timeout is a
//! failure like any other.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for the text-generation backend.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send the assembled model input and return the raw completion text.
    async fn complete(&self, input: &str) -> Result<String, GatewayError>;
}

/// Failures of the completion backend, distinguished for logging only.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Backend could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Backend answered with a non-success status.
    #[error("unexpected status {status}")]
    HttpStatus { status: u16 },

    /// Response body could not be read.
    #[error("unreadable response body: {0}")]
    Body(String),
}

impl GatewayError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Timeout { .. } => "timeout",
            GatewayError::Connection(_) => "connection",
            GatewayError::HttpStatus { .. } => "http_status",
            GatewayError::Body(_) => "body",
        }
    }
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        DomainError::new(ErrorCode::GatewayUnavailable, err.to_string())
            .with_detail("kind", err.kind())
    }
}
