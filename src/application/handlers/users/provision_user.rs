//! ProvisionUserHandler - Command handler creating an empty conversation record.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, TenantId, UserId};
use crate::ports::TranscriptStore;

/// Command to provision a user. Provisioning an existing user is a no-op.
#[derive(Debug, Clone)]
pub struct ProvisionUserCommand {
    pub tenant: TenantId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionUserResult {
    pub user_id: UserId,
    /// False when the user already existed.
    pub created: bool,
}

pub struct ProvisionUserHandler {
    store: Arc<dyn TranscriptStore>,
}

impl ProvisionUserHandler {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ProvisionUserCommand) -> Result<ProvisionUserResult, DomainError> {
        let created = self.store.create(&cmd.tenant, &cmd.user_id).await?;
        if created {
            tracing::info!(tenant = %cmd.tenant, user = %cmd.user_id, "Provisioned user");
        }
        Ok(ProvisionUserResult {
            user_id: cmd.user_id,
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTranscriptStore;

    fn command(user: &str) -> ProvisionUserCommand {
        ProvisionUserCommand {
            tenant: TenantId::new("acme").unwrap(),
            user_id: UserId::new(user).unwrap(),
        }
    }

    #[tokio::test]
    async fn creates_empty_record() {
        let store = InMemoryTranscriptStore::new();
        let handler = ProvisionUserHandler::new(Arc::new(store.clone()));

        let result = handler.handle(command("alice")).await.unwrap();

        assert!(result.created);
        let cmd = command("alice");
        assert_eq!(store.get(&cmd.tenant, &cmd.user_id).await.unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn existing_transcript_is_kept() {
        let store = InMemoryTranscriptStore::new();
        let cmd = command("alice");
        store.put(&cmd.tenant, &cmd.user_id, "history").await.unwrap();
        let handler = ProvisionUserHandler::new(Arc::new(store.clone()));

        let result = handler.handle(command("alice")).await.unwrap();

        assert!(!result.created);
        assert_eq!(
            store.get(&cmd.tenant, &cmd.user_id).await.unwrap().as_deref(),
            Some("history")
        );
    }
}
