use super::CacheProvider;
use crate::error::CacheError;

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;

const MIN_CAPACITY: NonZeroUsize = NonZeroUsize::MIN;

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// In-process LRU cache with per-entry expiry.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, Entry>>,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(MIN_CAPACITY);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, Entry>> {
        // A panic while holding the lock leaves the map itself intact.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CacheProvider for MemoryCache {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        Ok(None)
    }

    async fn save(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        self.lock().put(
            key.to_string(),
            Entry {
                value: value.to_vec(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock().pop(key);
        Ok(())
    }
}
