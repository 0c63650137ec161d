//! GetDialogHandler - Query handler reading a transcript, raw or as structured entries.

use std::sync::Arc;

use crate::domain::dialog::{parse_transcript, DialogEntry};
use crate::domain::foundation::{DomainError, TenantId, UserId};
use crate::ports::TranscriptStore;

#[derive(Debug, Clone)]
pub struct GetDialogQuery {
    pub tenant: TenantId,
    pub user_id: UserId,
}

pub struct GetDialogHandler {
    store: Arc<dyn TranscriptStore>,
}

impl GetDialogHandler {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }

    /// The stored transcript as-is; `None` for unknown users.
    pub async fn transcript(&self, query: GetDialogQuery) -> Result<Option<String>, DomainError> {
        Ok(self.store.get(&query.tenant, &query.user_id).await?)
    }

    /// The complete turns of the stored transcript, indexed from zero.
    ///
    /// A partial turn at the start of a truncated transcript is skipped.
    /// Transcripts written by turns open with a separator space, so names are
    /// trimmed; names stored through the dialog API are already trimmed.
    pub async fn entries(&self, query: GetDialogQuery) -> Result<Option<Vec<DialogEntry>>, DomainError> {
        let transcript = self.transcript(query).await?;
        Ok(transcript.as_deref().map(|text| {
            parse_transcript(text)
                .into_iter()
                .map(|entry| DialogEntry {
                    name: entry.name.trim().to_string(),
                    ..entry
                })
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTranscriptStore;

    fn query() -> GetDialogQuery {
        GetDialogQuery {
            tenant: TenantId::new("acme").unwrap(),
            user_id: UserId::new("erin").unwrap(),
        }
    }

    #[tokio::test]
    async fn returns_raw_and_parsed_transcript() {
        let store = InMemoryTranscriptStore::new();
        let q = query();
        store
            .put(&q.tenant, &q.user_id, r#" Erin said: "Hi" Waifu said: "Hello""#)
            .await
            .unwrap();
        let handler = GetDialogHandler::new(Arc::new(store));

        let raw = handler.transcript(query()).await.unwrap();
        let entries = handler.entries(query()).await.unwrap().unwrap();

        assert_eq!(raw.as_deref(), Some(r#" Erin said: "Hi" Waifu said: "Hello""#));
        assert_eq!(
            entries,
            vec![
                DialogEntry::new(0, "Erin", "Hi"),
                DialogEntry::new(1, "Waifu", "Hello"),
            ]
        );
    }

    #[tokio::test]
    async fn truncated_transcript_names_are_trimmed() {
        let store = InMemoryTranscriptStore::new();
        let q = query();
        store
            .put(&q.tenant, &q.user_id, r#"ay" Erin said: "Again" Waifu said: "Sure""#)
            .await
            .unwrap();
        let handler = GetDialogHandler::new(Arc::new(store));

        let entries = handler.entries(query()).await.unwrap().unwrap();

        assert_eq!(
            entries,
            vec![
                DialogEntry::new(0, "Erin", "Again"),
                DialogEntry::new(1, "Waifu", "Sure"),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_user_has_no_dialog() {
        let handler = GetDialogHandler::new(Arc::new(InMemoryTranscriptStore::new()));
        assert!(handler.entries(query()).await.unwrap().is_none());
    }
}
