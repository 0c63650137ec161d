//! GetUserMetadataHandler - Query handler for record modification times.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, TenantId, Timestamp, UserId};
use crate::ports::TranscriptStore;

#[derive(Debug, Clone)]
pub struct GetUserMetadataQuery {
    pub tenant: TenantId,
    pub user_id: UserId,
}

/// When a user's transcript last changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMetadata {
    pub user_id: UserId,
    pub last_modified_at: Timestamp,
    pub last_modified_epoch: i64,
}

pub struct GetUserMetadataHandler {
    store: Arc<dyn TranscriptStore>,
}

impl GetUserMetadataHandler {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }

    /// Returns `None` for unknown users.
    pub async fn handle(&self, query: GetUserMetadataQuery) -> Result<Option<UserMetadata>, DomainError> {
        let record = self.store.find(&query.tenant, &query.user_id).await?;
        Ok(record.map(|record| UserMetadata {
            user_id: record.user_id,
            last_modified_at: record.last_modified_at,
            last_modified_epoch: record.last_modified_epoch,
        }))
    }
}
