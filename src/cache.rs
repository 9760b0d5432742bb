use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A cached, complete response body keyed by its originating request URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub content: Bytes,
    pub size: usize,
    pub lru_tick: u64,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    total_size: usize,
    counter: u64,
}

/// URL-keyed store of complete response bodies with a total-size ceiling
/// and LRU eviction, guarded by a single readers-writers lock.
///
/// `find` is a reader operation; `touch` and `insert` are writer
/// operations (`touch` only mutates one field, but it races with `find`
/// over the same map entry, so it must still exclude readers).
#[derive(Clone)]
pub struct ProxyCache {
    inner: Arc<RwLock<CacheInner>>,
    max_cache_size: usize,
    max_object_size: usize,
}

impl ProxyCache {
    pub fn new(max_cache_size: usize, max_object_size: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner {
                entries: HashMap::new(),
                total_size: 0,
                counter: 0,
            })),
            max_cache_size,
            max_object_size,
        }
    }

    /// Reader operation. Returns an owned clone of the cached entry, if any.
    pub async fn find(&self, url: &str) -> Option<CacheEntry> {
        let inner = self.inner.read().await;
        inner.entries.get(url).cloned()
    }

    /// Writer operation. Refreshes the entry's `lru_tick`. A no-op if the
    /// entry was concurrently evicted between `find` and `touch`.
    pub async fn touch(&self, url: &str) {
        let mut inner = self.inner.write().await;
        inner.counter += 1;
        let tick = inner.counter;
        if let Some(entry) = inner.entries.get_mut(url) {
            entry.lru_tick = tick;
        }
    }

    /// Writer operation. `size` must be in `1..=max_object_size`;
    /// violating that precondition is a caller bug and is rejected
    /// (`false`) rather than corrupting cache state.
    pub async fn insert(&self, url: &str, content: Bytes, size: usize) -> bool {
        if size == 0 || size > self.max_object_size {
            return false;
        }

        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.entries.get(url) {
            let old_size = existing.size;

            while inner.total_size - old_size + size > self.max_cache_size
                && inner.entries.len() > 1
            {
                let victim = inner
                    .entries
                    .iter()
                    .filter(|(k, _)| k.as_str() != url)
                    .min_by_key(|(_, e)| e.lru_tick)
                    .map(|(k, _)| k.clone());
                let Some(victim) = victim else { break };
                if let Some(evicted) = inner.entries.remove(&victim) {
                    inner.total_size -= evicted.size;
                }
            }

            inner.counter += 1;
            let tick = inner.counter;
            inner.total_size = inner.total_size - old_size + size;
            inner.entries.insert(
                url.to_string(),
                CacheEntry {
                    content,
                    size,
                    lru_tick: tick,
                },
            );
            return true;
        }

        while inner.total_size + size > self.max_cache_size && !inner.entries.is_empty() {
            let victim = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.lru_tick)
                .map(|(k, _)| k.clone());
            let Some(victim) = victim else { break };
            if let Some(evicted) = inner.entries.remove(&victim) {
                inner.total_size -= evicted.size;
            }
        }

        inner.counter += 1;
        let tick = inner.counter;
        inner.entries.insert(
            url.to_string(),
            CacheEntry {
                content,
                size,
                lru_tick: tick,
            },
        );
        inner.total_size += size;
        true
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn total_size(&self) -> usize {
        self.inner.read().await.total_size
    }
}
