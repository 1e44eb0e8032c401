//! In-process link store backed by `DashMap`

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::{LinkStore, ShortLink, StoreError, StoreResult};

/// Links live only as long as the process.
///
/// The shard lock taken by `entry()` is the atomic uniqueness check.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: DashMap<String, ShortLink>,
    next_id: AtomicI64,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn save(&self, target: &str, alias: &str) -> StoreResult<ShortLink> {
        match self.links.entry(alias.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AliasConflict(alias.to_string())),
            Entry::Vacant(slot) => {
                let link = ShortLink {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    alias: alias.to_string(),
                    target: target.to_string(),
                };
                slot.insert(link.clone());
                debug!(alias, "in-memory link saved");
                Ok(link)
            }
        }
    }

    async fn get(&self, alias: &str) -> StoreResult<ShortLink> {
        self.links
            .get(alias)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }

    async fn delete(&self, alias: &str) -> StoreResult<()> {
        self.links
            .remove(alias)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_save_get_delete_lifecycle() {
        let store = InMemoryLinkStore::new();

        let saved = store.save("https://example.com", "abc").await.unwrap();
        assert_eq!(saved.alias, "abc");
        assert_eq!(store.get("abc").await.unwrap().target, "https://example.com");

        store.delete("abc").await.unwrap();
        assert_eq!(
            store.get("abc").await,
            Err(StoreError::NotFound("abc".into()))
        );
    }

    #[tokio::test]
    async fn test_second_save_conflicts_even_with_same_target() {
        let store = InMemoryLinkStore::new();
        store.save("https://example.com", "dup").await.unwrap();

        assert_eq!(
            store.save("https://example.com", "dup").await,
            Err(StoreError::AliasConflict("dup".into()))
        );
        assert_eq!(
            store.save("https://other.com", "dup").await,
            Err(StoreError::AliasConflict("dup".into()))
        );
        // 原记录不会被覆盖
        assert_eq!(store.get("dup").await.unwrap().target, "https://example.com");
    }

    #[tokio::test]
    async fn test_delete_is_not_idempotent_success() {
        let store = InMemoryLinkStore::new();
        assert!(matches!(
            store.delete("never").await,
            Err(StoreError::NotFound(_))
        ));

        store.save("https://example.com", "once").await.unwrap();
        store.delete("once").await.unwrap();
        assert!(matches!(
            store.delete("once").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_saves_single_winner() {
        let store = Arc::new(InMemoryLinkStore::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.save(&format!("https://example.com/{}", i), "race").await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.len(), 1);
    }
}
