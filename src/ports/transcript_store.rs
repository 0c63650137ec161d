//! Transcript Store port.
//!
//! Persistence contract for conversation records, keyed by (tenant, user).
//! Every operation takes the tenant explicitly; implementations never infer
//! it from ambient context.
//!
//! # Design
//!
//! - **One record per key**: `create` is insert-if-absent, `put` is an upsert
//! - **Whole-string writes**: the transcript is replaced, never patched
//! - **No locking**: concurrent writers to one key resolve last-write-wins

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::dialog::ConversationRecord;
use crate::domain::foundation::{DomainError, ErrorCode, TenantId, UserId};

/// Repository port for conversation records.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Load the transcript of a user, `None` when the user is unknown.
    async fn get(&self, tenant: &TenantId, user: &UserId) -> Result<Option<String>, StoreError>;

    /// Load the full record of a user, including modification metadata.
    async fn find(
        &self,
        tenant: &TenantId,
        user: &UserId,
    ) -> Result<Option<ConversationRecord>, StoreError>;

    /// Replace the transcript, creating the record if needed.
    ///
    /// Refreshes both modification fields and leaves `context` untouched.
    async fn put(&self, tenant: &TenantId, user: &UserId, transcript: &str)
        -> Result<(), StoreError>;

    /// Create an empty record unless one exists. Returns whether a record was created.
    async fn create(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError>;

    /// Check whether a record exists.
    async fn exists(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError>;

    /// Remove a record. Returns whether one was removed.
    async fn delete(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError>;

    /// Number of records held for a tenant.
    async fn count(&self, tenant: &TenantId) -> Result<u64, StoreError>;

    /// One page of user ids, most recently modified first.
    ///
    /// Pages are zero-based. Records modified in the same second are ordered by user id.
    async fn list_page(
        &self,
        tenant: &TenantId,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<UserId>, StoreError>;
}

/// Failures of the backing store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store connection failed: {0}")]
    Connection(String),

    /// A statement failed.
    #[error("store query failed: {0}")]
    Query(String),

    /// A stored row could not be mapped back to a record.
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),

    /// Schema migration failed.
    #[error("store migration failed: {0}")]
    Migration(String),
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::new(ErrorCode::StoreUnavailable, err.to_string())
    }
}
