//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps and error types used across the dialog domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ConversationKey, TenantId, UserId};
pub use timestamp::Timestamp;
