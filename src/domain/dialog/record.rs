//! Persisted conversation state for one (tenant, user) pair.

use serde::Serialize;

use crate::domain::foundation::{TenantId, Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationRecord {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub transcript: String,
    pub last_modified_at: Timestamp,
    pub last_modified_epoch: i64,
    /// Opaque caller data, stored but never read by the assembler.
    pub context: Option<String>,
}

impl ConversationRecord {
    /// A freshly provisioned record with an empty transcript.
    pub fn new(tenant_id: TenantId, user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            tenant_id,
            user_id,
            transcript: String::new(),
            last_modified_at: now,
            last_modified_epoch: now.as_unix_secs(),
            context: None,
        }
    }

    /// Replaces the transcript and refreshes both modification fields.
    pub fn replace_transcript(&mut self, transcript: impl Into<String>) {
        let now = Timestamp::now();
        self.transcript = transcript.into();
        self.last_modified_at = now;
        self.last_modified_epoch = now.as_unix_secs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ConversationRecord {
        ConversationRecord::new(TenantId::new("acme").unwrap(), UserId::new("bob").unwrap())
    }

    #[test]
    fn new_record_starts_empty() {
        let record = record();
        assert!(record.transcript.is_empty());
        assert!(record.context.is_none());
        assert_eq!(record.last_modified_epoch, record.last_modified_at.as_unix_secs());
    }

    #[test]
    fn replace_transcript_keeps_context() {
        let mut record = record();
        record.context = Some("ctx".to_string());
        record.replace_transcript("Bob said: \"hi\"");
        assert_eq!(record.transcript, "Bob said: \"hi\"");
        assert_eq!(record.context.as_deref(), Some("ctx"));
    }
}
