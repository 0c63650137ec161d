//! Strongly-typed identifier value objects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

static USER_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("user id pattern is valid"));

/// Identity namespace of the calling application.
///
/// Every record is partitioned by tenant; handlers receive it explicitly
/// rather than reading it from request context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Tenant used when the caller does not name one.
    pub const UNSPECIFIED: &'static str = "0_no_current_user_specified";

    /// Creates a new TenantId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("tenant_id"));
        }
        Ok(Self(id))
    }

    /// The fallback tenant for callers that send no tenant header.
    pub fn unspecified() -> Self {
        Self(Self::UNSPECIFIED.to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an end user within a tenant.
///
/// Restricted to ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty or malformed.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        if !USER_ID_PATTERN.is_match(&id) {
            return Err(ValidationError::invalid_format(
                "user_id",
                "only letters, digits, '_' and '-' are allowed",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite key of a conversation record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub tenant: TenantId,
    pub user: UserId,
}

impl ConversationKey {
    pub fn new(tenant: TenantId, user: UserId) -> Self {
        Self { tenant, user }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant, self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_valid_string() {
        let id = UserId::new("user-123_abc").unwrap();
        assert_eq!(id.as_str(), "user-123_abc");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        let result = UserId::new("");
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "user_id"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn user_id_rejects_disallowed_characters() {
        for raw in ["alice bob", "alice;drop", "ünï", "a/b", "x.y"] {
            assert!(
                matches!(UserId::new(raw), Err(ValidationError::InvalidFormat { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn user_id_displays_correctly() {
        let id = UserId::new("user-456").unwrap();
        assert_eq!(format!("{}", id), "user-456");
    }

    #[test]
    fn tenant_id_rejects_blank() {
        assert!(TenantId::new("   ").is_err());
        assert_eq!(TenantId::new("acme").unwrap().as_str(), "acme");
    }

    #[test]
    fn tenant_id_unspecified_uses_fallback_name() {
        assert_eq!(TenantId::unspecified().as_str(), "0_no_current_user_specified");
    }

    #[test]
    fn conversation_key_displays_tenant_and_user() {
        let key = ConversationKey::new(TenantId::new("acme").unwrap(), UserId::new("bob").unwrap());
        assert_eq!(key.to_string(), "acme/bob");
    }
}
