//! Process-local message store.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use dashmap::DashMap;
use interaction_sdk::{InteractionError, Message, MessageStore};
use tracing::debug;

use crate::config::StaticInteractionPluginConfig;

const DEFAULT_TTL_SECS: i64 = 300;

/// In-memory [`MessageStore`] keyed by message id.
///
/// Records older than the configured TTL are treated as absent. A read evicts
/// the record it hits; every write sweeps all expired records.
pub struct InMemoryMessageStore<T> {
    records: DashMap<String, Message<T>>,
    ttl: TimeDelta,
}

impl<T> InMemoryMessageStore<T> {
    #[must_use]
    pub fn with_ttl(ttl: TimeDelta) -> Self {
        Self {
            records: DashMap::new(),
            ttl,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &StaticInteractionPluginConfig) -> Self {
        let ttl = i64::try_from(cfg.message_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        Self::with_ttl(ttl)
    }

    /// Number of stored records, expired ones included until the next sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn evict_expired(&self) {
        let now = Utc::now();
        let before = self.records.len();
        self.records.retain(|_, m| !m.is_expired(self.ttl, now));
        let evicted = before.saturating_sub(self.records.len());
        if evicted > 0 {
            debug!(evicted, "Evicted expired messages");
        }
    }
}

impl<T> Default for InMemoryMessageStore<T> {
    fn default() -> Self {
        Self::with_ttl(TimeDelta::seconds(DEFAULT_TTL_SECS))
    }
}

#[async_trait]
impl<T> MessageStore<T> for InMemoryMessageStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn write(&self, id: &str, message: Message<T>) -> Result<(), InteractionError> {
        self.evict_expired();
        self.records.insert(id.to_owned(), message);
        Ok(())
    }

    async fn read(&self, id: &str) -> Result<Option<Message<T>>, InteractionError> {
        let now = Utc::now();
        if self
            .records
            .remove_if(id, |_, m| m.is_expired(self.ttl, now))
            .is_some()
        {
            debug!(id, "Evicted expired message");
            return Ok(None);
        }
        Ok(self.records.get(id).map(|m| m.value().clone()))
    }
}
