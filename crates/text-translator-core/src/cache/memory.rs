use moka::future::Cache;
use std::sync::Arc;

use crate::error::{Error, Result};

/// In-memory cache using moka, keyed by opaque cache-key strings.
///
/// Unbounded unless `max_entries` is given; bounded caches evict via moka's
/// policy once the entry count is exceeded.
pub struct MemoryCache {
    cache: Cache<String, String>,
}

impl MemoryCache {
    pub fn new(max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder();
        if let Some(max) = max_entries {
            builder = builder.max_capacity(max);
        }

        Self {
            cache: builder.build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: String, value: String) {
        self.cache.insert(key, value).await;
    }

    /// Get the cached value, or compute and store it.
    ///
    /// Concurrent callers with the same key coalesce into a single `init`
    /// execution; the others wait for its result. A failed `init` stores
    /// nothing, so the next caller retries.
    pub async fn get_or_try_insert<F>(&self, key: String, init: F) -> Result<String>
    where
        F: Future<Output = Result<String>>,
    {
        self.cache
            .try_get_with(key, init)
            .await
            .map_err(|e: Arc<Error>| (*e).clone())
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Exact entry count. Flushes moka's pending maintenance first so
    /// evictions and invalidations are reflected.
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = MemoryCache::new(None);
        cache.insert("k".into(), "v".into()).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn test_failed_init_is_not_stored() {
        let cache = MemoryCache::new(None);
        let result = cache
            .get_or_try_insert("k".into(), async { Err(Error::Provider("down".into())) })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.get("k").await, None);

        // A later successful load fills the entry
        let value = cache
            .get_or_try_insert("k".into(), async { Ok("v".to_string()) })
            .await
            .expect("second load should succeed");
        assert_eq!(value, "v");
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_bounded_cache_evicts() {
        let cache = MemoryCache::new(Some(2));
        for i in 0..10 {
            cache.insert(format!("k{i}"), "v".into()).await;
        }
        assert!(cache.entry_count().await <= 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryCache::new(None);
        cache.insert("k".into(), "v".into()).await;
        cache.clear();
        assert_eq!(cache.entry_count().await, 0);
    }
}
