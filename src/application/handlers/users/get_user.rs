//! GetUserHandler - Query handler checking that a user exists.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, TenantId, UserId};
use crate::ports::TranscriptStore;

#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub tenant: TenantId,
    pub user_id: UserId,
}

pub struct GetUserHandler {
    store: Arc<dyn TranscriptStore>,
}

impl GetUserHandler {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }

    /// Returns whether the user has a record under the tenant.
    pub async fn handle(&self, query: GetUserQuery) -> Result<bool, DomainError> {
        Ok(self.store.exists(&query.tenant, &query.user_id).await?)
    }
}
