//! Query cache keyed by resource name.
//!
//! The cache owns fetched lists; the mutation coordinator only ever
//! invalidates. A missing entry forces the next list read to hit the backend.
//! Each key carries a generation bumped on invalidation, so a list fetched
//! before a mutation cannot be stored after it.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::catalog::ResourceName;

#[async_trait]
pub trait QueryCache: Send + Sync {
    /// Drops every cached query for `key` and advances its generation.
    async fn invalidate(&self, key: &ResourceName);

    async fn get_cached(&self, key: &ResourceName) -> Option<Vec<Value>>;

    /// Current generation of `key`. Read it before fetching and hand it back
    /// to `store`.
    async fn generation(&self, key: &ResourceName) -> u64;

    /// Stores `items` fetched at `generation`. Returns `false` and keeps
    /// nothing when `key` was invalidated since.
    async fn store(&self, key: &ResourceName, generation: u64, items: Vec<Value>) -> bool;
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    items: Option<Vec<Value>>,
}

/// Process-wide in-memory cache.
#[derive(Debug, Default)]
pub struct MemoryQueryCache {
    slots: RwLock<HashMap<ResourceName, Slot>>,
}

impl MemoryQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resources with a cached list.
    pub async fn len(&self) -> usize {
        self.slots.read().await.values().filter(|slot| slot.items.is_some()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl QueryCache for MemoryQueryCache {
    async fn invalidate(&self, key: &ResourceName) {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(key.clone()).or_default();
        slot.generation += 1;
        let removed = slot.items.take().is_some();
        debug!(resource = %key, removed, generation = slot.generation, "invalidated cached queries");
    }

    async fn get_cached(&self, key: &ResourceName) -> Option<Vec<Value>> {
        self.slots.read().await.get(key).and_then(|slot| slot.items.clone())
    }

    async fn generation(&self, key: &ResourceName) -> u64 {
        self.slots.read().await.get(key).map_or(0, |slot| slot.generation)
    }

    async fn store(&self, key: &ResourceName, generation: u64, items: Vec<Value>) -> bool {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(key.clone()).or_default();
        if slot.generation != generation {
            debug!(resource = %key, fetched_at = generation, current = slot.generation, "discarded stale list");
            return false;
        }
        slot.items = Some(items);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn store_then_invalidate() {
        let cache = MemoryQueryCache::new();
        assert!(cache.store(&ResourceName::APPS, 0, vec![json!({"id": "1"})]).await);
        assert!(cache.store(&ResourceName::DEALERS, 0, vec![]).await);
        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get_cached(&ResourceName::APPS).await.unwrap().len(), 1);

        cache.invalidate(&ResourceName::APPS).await;
        assert!(cache.get_cached(&ResourceName::APPS).await.is_none());
        assert!(cache.get_cached(&ResourceName::DEALERS).await.is_some());
    }

    #[tokio::test]
    async fn invalidating_missing_key_is_harmless() {
        let cache = MemoryQueryCache::new();
        cache.invalidate(&ResourceName::LICENSES).await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn store_after_invalidation_is_discarded() {
        let cache = MemoryQueryCache::new();
        let fetched_at = cache.generation(&ResourceName::APPS).await;
        cache.invalidate(&ResourceName::APPS).await;

        assert!(!cache.store(&ResourceName::APPS, fetched_at, vec![json!({"id": "old"})]).await);
        assert!(cache.get_cached(&ResourceName::APPS).await.is_none());

        let current = cache.generation(&ResourceName::APPS).await;
        assert_eq!(current, fetched_at + 1);
        assert!(cache.store(&ResourceName::APPS, current, vec![]).await);
        assert_eq!(cache.get_cached(&ResourceName::APPS).await, Some(vec![]));
    }
}
