//! CountUsersHandler and ListUsersHandler - Query handlers over a tenant's users.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, TenantId, UserId, ValidationError};
use crate::ports::TranscriptStore;

#[derive(Debug, Clone)]
pub struct CountUsersQuery {
    pub tenant: TenantId,
}

pub struct CountUsersHandler {
    store: Arc<dyn TranscriptStore>,
}

impl CountUsersHandler {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: CountUsersQuery) -> Result<u64, DomainError> {
        Ok(self.store.count(&query.tenant).await?)
    }
}

/// Query for one zero-based page of user ids.
#[derive(Debug, Clone)]
pub struct ListUsersQuery {
    pub tenant: TenantId,
    pub page: u32,
    /// Falls back to the handler's default page size.
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub page: u32,
    pub users: Vec<UserId>,
}

pub struct ListUsersHandler {
    store: Arc<dyn TranscriptStore>,
    default_page_size: u32,
    max_page_size: u32,
}

impl ListUsersHandler {
    pub fn new(store: Arc<dyn TranscriptStore>, default_page_size: u32, max_page_size: u32) -> Self {
        Self {
            store,
            default_page_size,
            max_page_size,
        }
    }

    /// Lists users most recently modified first.
    pub async fn handle(&self, query: ListUsersQuery) -> Result<UserPage, DomainError> {
        let page_size = query.page_size.unwrap_or(self.default_page_size);
        if page_size == 0 || page_size > self.max_page_size {
            return Err(ValidationError::invalid_format(
                "page_size",
                format!("must be between 1 and {}", self.max_page_size),
            )
            .into());
        }

        let users = self
            .store
            .list_page(&query.tenant, query.page, page_size)
            .await?;
        Ok(UserPage {
            page: query.page,
            users,
        })
    }
}
