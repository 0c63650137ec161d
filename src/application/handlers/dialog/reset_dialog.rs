//! ResetDialogHandler - Command handler emptying a transcript while keeping the user.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, TenantId, UserId};
use crate::ports::TranscriptStore;

#[derive(Debug, Clone)]
pub struct ResetDialogCommand {
    pub tenant: TenantId,
    pub user_id: UserId,
}

pub struct ResetDialogHandler {
    store: Arc<dyn TranscriptStore>,
}

impl ResetDialogHandler {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ResetDialogCommand) -> Result<(), DomainError> {
        if !self.store.exists(&cmd.tenant, &cmd.user_id).await? {
            return Err(DomainError::user_not_found(cmd.user_id.as_str()));
        }
        self.store.put(&cmd.tenant, &cmd.user_id, "").await?;
        tracing::info!(tenant = %cmd.tenant, user = %cmd.user_id, "Dialog reset");
        Ok(())
    }
}
