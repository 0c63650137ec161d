//! SetDialogHandler - Command handler replacing a transcript with structured entries.

use std::sync::Arc;

use crate::domain::dialog::{join_entries, normalize_entries, DialogEntry, DialogLimits};
use crate::domain::foundation::{DomainError, TenantId, UserId};
use crate::ports::TranscriptStore;

#[derive(Debug, Clone)]
pub struct SetDialogCommand {
    pub tenant: TenantId,
    pub user_id: UserId,
    pub dialog: Vec<DialogEntry>,
}

pub struct SetDialogHandler {
    store: Arc<dyn TranscriptStore>,
    limits: DialogLimits,
}

impl SetDialogHandler {
    pub fn new(store: Arc<dyn TranscriptStore>, limits: DialogLimits) -> Self {
        Self { store, limits }
    }

    /// Validates the entries and stores them joined in submission order.
    ///
    /// Only existing users can have their dialog replaced. Returns the number
    /// of entries written.
    pub async fn handle(&self, cmd: SetDialogCommand) -> Result<usize, DomainError> {
        if !self.store.exists(&cmd.tenant, &cmd.user_id).await? {
            return Err(DomainError::user_not_found(cmd.user_id.as_str()));
        }

        let entries = normalize_entries(cmd.dialog, &self.limits)?;
        let transcript = join_entries(&entries);
        self.store.put(&cmd.tenant, &cmd.user_id, &transcript).await?;

        tracing::info!(
            tenant = %cmd.tenant,
            user = %cmd.user_id,
            entries = entries.len(),
            "Dialog replaced"
        );
        Ok(entries.len())
    }
}
