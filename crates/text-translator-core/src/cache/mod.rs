mod disk;
mod key;
mod memory;

pub use disk::DiskCache;
pub use key::CacheKey;
pub use memory::MemoryCache;

use tracing::warn;

use crate::config::CacheConfig;
use crate::error::Result;

/// Combined cache with memory and optional disk layers.
///
/// The memory layer is also the single-writer lane: concurrent misses for
/// one key funnel through `get_or_translate` and make at most one provider
/// call between them.
pub struct TranslationCache {
    memory: Option<MemoryCache>,
    disk: Option<DiskCache>,
}

impl TranslationCache {
    /// Create a new translation cache from configuration
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let memory = config
            .memory_enabled
            .then(|| MemoryCache::new(config.memory_max_entries));

        let disk = if config.disk_enabled {
            let path = config.disk_path.clone().unwrap_or_else(|| {
                let cache_dir = crate::util::cache_dir()
                    .unwrap_or_else(|| std::path::PathBuf::from(".cache"));
                cache_dir.join("text-translator")
            });
            Some(DiskCache::new(path)?)
        } else {
            None
        };

        Ok(Self { memory, disk })
    }

    /// Get a cached translation
    pub async fn get(&self, key: &CacheKey) -> Option<String> {
        let key_str = key.to_string();

        // Try memory cache first
        if let Some(ref memory) = self.memory
            && let Some(value) = memory.get(&key_str).await
        {
            return Some(value);
        }

        // Try disk cache
        if let Some(ref disk) = self.disk
            && let Some(value) = disk.get(&key_str)
        {
            // Populate memory cache on disk hit
            if let Some(ref memory) = self.memory {
                memory.insert(key_str, value.clone()).await;
            }
            return Some(value);
        }

        None
    }

    /// Get the cached translation for `key`, or run `translate` and store
    /// its result under `key` before returning it.
    ///
    /// Concurrent callers with the same key make at most one `translate`
    /// call between them; a failed call stores nothing in either layer.
    pub async fn get_or_translate<F>(&self, key: &CacheKey, translate: F) -> Result<String>
    where
        F: Future<Output = Result<String>>,
    {
        let key_str = key.to_string();

        match &self.memory {
            Some(memory) => {
                let disk = self.disk.as_ref();
                memory
                    .get_or_try_insert(key_str.clone(), async {
                        if let Some(disk) = disk
                            && let Some(value) = disk.get(&key_str)
                        {
                            return Ok(value);
                        }

                        let value = translate.await?;
                        if let Some(disk) = disk
                            && let Err(e) = disk.insert(&key_str, &value)
                        {
                            warn!("Disk cache write failed: {}", e);
                        }
                        Ok(value)
                    })
                    .await
            }
            // Memory layer disabled: no coalescing, disk still consulted
            None => {
                if let Some(disk) = &self.disk
                    && let Some(value) = disk.get(&key_str)
                {
                    return Ok(value);
                }

                let value = translate.await?;
                if let Some(disk) = &self.disk
                    && let Err(e) = disk.insert(&key_str, &value)
                {
                    warn!("Disk cache write failed: {}", e);
                }
                Ok(value)
            }
        }
    }

    /// Store a translation in cache
    pub async fn insert(&self, key: &CacheKey, value: String) {
        let key_str = key.to_string();

        if let Some(ref memory) = self.memory {
            memory.insert(key_str.clone(), value.clone()).await;
        }

        if let Some(ref disk) = self.disk
            && let Err(e) = disk.insert(&key_str, &value)
        {
            warn!("Disk cache write failed: {}", e);
        }
    }

    /// Check if a key exists in cache
    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.get(key).await.is_some()
    }

    /// Number of cached entries (memory layer, falling back to disk).
    pub async fn size(&self) -> u64 {
        if let Some(ref memory) = self.memory {
            return memory.entry_count().await;
        }
        self.disk.as_ref().map_or(0, |disk| disk.len() as u64)
    }

    /// Clear all caches
    pub fn clear(&self) {
        if let Some(ref memory) = self.memory {
            memory.clear();
        }

        if let Some(ref disk) = self.disk
            && let Err(e) = disk.clear()
        {
            warn!("Disk cache clear failed: {}", e);
        }
    }
}
