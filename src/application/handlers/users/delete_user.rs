//! DeleteUserHandler - Command handler removing a user's record.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, TenantId, UserId};
use crate::ports::TranscriptStore;

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub tenant: TenantId,
    pub user_id: UserId,
}

pub struct DeleteUserHandler {
    store: Arc<dyn TranscriptStore>,
}

impl DeleteUserHandler {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }

    /// Fails with `UserNotFound` when there is nothing to delete.
    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), DomainError> {
        if !self.store.delete(&cmd.tenant, &cmd.user_id).await? {
            return Err(DomainError::user_not_found(cmd.user_id.as_str()));
        }
        tracing::info!(tenant = %cmd.tenant, user = %cmd.user_id, "Deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTranscriptStore;
    use crate::domain::foundation::ErrorCode;

    fn command() -> DeleteUserCommand {
        DeleteUserCommand {
            tenant: TenantId::new("acme").unwrap(),
            user_id: UserId::new("dave").unwrap(),
        }
    }

    #[tokio::test]
    async fn removes_existing_user() {
        let store = InMemoryTranscriptStore::new();
        let cmd = command();
        store.create(&cmd.tenant, &cmd.user_id).await.unwrap();
        let handler = DeleteUserHandler::new(Arc::new(store.clone()));

        handler.handle(cmd.clone()).await.unwrap();

        assert!(!store.exists(&cmd.tenant, &cmd.user_id).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let handler = DeleteUserHandler::new(Arc::new(InMemoryTranscriptStore::new()));
        let err = handler.handle(command()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
