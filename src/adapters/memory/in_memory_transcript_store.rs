//! In-Memory Transcript Store Adapter
//!
//! Keeps conversation records in a map shared between clones.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialog::ConversationRecord;
use crate::domain::foundation::{TenantId, UserId};
use crate::ports::{StoreError, TranscriptStore};

type RecordKey = (TenantId, UserId);

/// In-memory storage for conversation records
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptStore {
    records: Arc<RwLock<HashMap<RecordKey, ConversationRecord>>>,
}

impl InMemoryTranscriptStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record as-is, keeping its modification fields (useful for tests)
    pub async fn insert_record(&self, record: ConversationRecord) {
        let key = (record.tenant_id.clone(), record.user_id.clone());
        self.records.write().await.insert(key, record);
    }

    /// Total number of records across all tenants
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

fn key(tenant: &TenantId, user: &UserId) -> RecordKey {
    (tenant.clone(), user.clone())
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    async fn get(&self, tenant: &TenantId, user: &UserId) -> Result<Option<String>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(&key(tenant, user))
            .map(|record| record.transcript.clone()))
    }

    async fn find(
        &self,
        tenant: &TenantId,
        user: &UserId,
    ) -> Result<Option<ConversationRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&key(tenant, user)).cloned())
    }

    async fn put(
        &self,
        tenant: &TenantId,
        user: &UserId,
        transcript: &str,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records
            .entry(key(tenant, user))
            .or_insert_with(|| ConversationRecord::new(tenant.clone(), user.clone()))
            .replace_transcript(transcript);
        Ok(())
    }

    async fn create(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let record_key = key(tenant, user);
        if records.contains_key(&record_key) {
            return Ok(false);
        }
        records.insert(
            record_key,
            ConversationRecord::new(tenant.clone(), user.clone()),
        );
        Ok(true)
    }

    async fn exists(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError> {
        Ok(self.records.read().await.contains_key(&key(tenant, user)))
    }

    async fn delete(&self, tenant: &TenantId, user: &UserId) -> Result<bool, StoreError> {
        Ok(self
            .records
            .write()
            .await
            .remove(&key(tenant, user))
            .is_some())
    }

    async fn count(&self, tenant: &TenantId) -> Result<u64, StoreError> {
        let records = self.records.read().await;
        Ok(records.keys().filter(|(t, _)| t == tenant).count() as u64)
    }

    async fn list_page(
        &self,
        tenant: &TenantId,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<UserId>, StoreError> {
        let records = self.records.read().await;
        let mut owned: Vec<&ConversationRecord> = records
            .values()
            .filter(|record| &record.tenant_id == tenant)
            .collect();
        owned.sort_by(|a, b| {
            b.last_modified_epoch
                .cmp(&a.last_modified_epoch)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        let offset = page as usize * page_size as usize;
        Ok(owned
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .map(|record| record.user_id.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn record_at(tenant_id: &str, user_id: &str, epoch: i64) -> ConversationRecord {
        let mut record = ConversationRecord::new(tenant(tenant_id), user(user_id));
        record.last_modified_at = Timestamp::from_unix_secs(epoch);
        record.last_modified_epoch = epoch;
        record
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = InMemoryTranscriptStore::new();
        assert_eq!(store.get(&tenant("t"), &user("u")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_creates_and_replaces() {
        let store = InMemoryTranscriptStore::new();
        store.put(&tenant("t"), &user("u"), "first").await.unwrap();
        store.put(&tenant("t"), &user("u"), "second").await.unwrap();

        assert_eq!(
            store.get(&tenant("t"), &user("u")).await.unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn put_keeps_context() {
        let store = InMemoryTranscriptStore::new();
        let mut record = record_at("t", "u", 10);
        record.context = Some("ctx".to_string());
        store.insert_record(record).await;

        store.put(&tenant("t"), &user("u"), "text").await.unwrap();
        let found = store.find(&tenant("t"), &user("u")).await.unwrap().unwrap();
        assert_eq!(found.context.as_deref(), Some("ctx"));
        assert!(found.last_modified_epoch > 10);
    }

    #[tokio::test]
    async fn create_is_insert_if_absent() {
        let store = InMemoryTranscriptStore::new();
        assert!(store.create(&tenant("t"), &user("u")).await.unwrap());
        store.put(&tenant("t"), &user("u"), "kept").await.unwrap();
        assert!(!store.create(&tenant("t"), &user("u")).await.unwrap());
        assert_eq!(
            store.get(&tenant("t"), &user("u")).await.unwrap().as_deref(),
            Some("kept")
        );
    }

    #[tokio::test]
    async fn tenants_are_isolated() {
        let store = InMemoryTranscriptStore::new();
        store.put(&tenant("a"), &user("u"), "for a").await.unwrap();

        assert!(!store.exists(&tenant("b"), &user("u")).await.unwrap());
        assert_eq!(store.count(&tenant("a")).await.unwrap(), 1);
        assert_eq!(store.count(&tenant("b")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_reports_removal() {
        let store = InMemoryTranscriptStore::new();
        store.create(&tenant("t"), &user("u")).await.unwrap();
        assert!(store.delete(&tenant("t"), &user("u")).await.unwrap());
        assert!(!store.delete(&tenant("t"), &user("u")).await.unwrap());
    }

    #[tokio::test]
    async fn list_page_orders_most_recent_first() {
        let store = InMemoryTranscriptStore::new();
        store.insert_record(record_at("t", "old", 100)).await;
        store.insert_record(record_at("t", "newest", 300)).await;
        store.insert_record(record_at("t", "b-mid", 200)).await;
        store.insert_record(record_at("t", "a-mid", 200)).await;
        store.insert_record(record_at("other", "x", 999)).await;

        let first = store.list_page(&tenant("t"), 0, 3).await.unwrap();
        let ids: Vec<&str> = first.iter().map(UserId::as_str).collect();
        assert_eq!(ids, vec!["newest", "a-mid", "b-mid"]);

        let second = store.list_page(&tenant("t"), 1, 3).await.unwrap();
        assert_eq!(second, vec![user("old")]);

        assert!(store.list_page(&tenant("t"), 5, 3).await.unwrap().is_empty());
    }
}
