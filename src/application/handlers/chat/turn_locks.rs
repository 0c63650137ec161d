//! Per-conversation mutual exclusion for turns.
//!
//! Without it, two turns for one user race on load-assemble-persist and the
//! later write wins. With it, the second turn waits and sees the first
//! turn's transcript.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::ConversationKey;

#[derive(Debug, Default)]
pub struct TurnLocks {
    slots: Mutex<HashMap<ConversationKey, Arc<AsyncMutex<()>>>>,
}

impl TurnLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn holds `key`. The lock is released when the guard drops.
    pub async fn acquire(&self, key: &ConversationKey) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            // Slots nobody holds or waits on are only referenced by the map.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(key.clone()).or_default())
        };
        slot.lock_owned().await
    }

    /// Number of conversations with a held or awaited lock.
    pub fn active(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| Arc::strong_count(slot) > 1).count()
    }
}
