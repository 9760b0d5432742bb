use bytes::Bytes;
use forwardcache::ProxyCache;
use proptest::prelude::*;

const MAX_CACHE_SIZE: usize = 2_000;
const MAX_OBJECT_SIZE: usize = 500;

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

proptest! {
    // Invariants 1 & 2: total_size never exceeds the ceiling, and no
    // entry sneaks in with size 0 or size > MAX_OBJECT_SIZE.
    #[test]
    fn prop_cache_respects_size_invariants(
        sizes in prop::collection::vec(1usize..=MAX_OBJECT_SIZE, 1..20)
    ) {
        rt().block_on(async {
            let cache = ProxyCache::new(MAX_CACHE_SIZE, MAX_OBJECT_SIZE);
            for (i, size) in sizes.iter().enumerate() {
                let key = format!("http://h/{i}");
                cache.insert(&key, Bytes::from(vec![0u8; *size]), *size).await;
                assert!(cache.total_size().await <= MAX_CACHE_SIZE);
            }
        });
    }

    #[test]
    fn prop_oversized_entries_always_rejected(size in (MAX_OBJECT_SIZE + 1)..(MAX_OBJECT_SIZE * 3)) {
        rt().block_on(async {
            let cache = ProxyCache::new(MAX_CACHE_SIZE, MAX_OBJECT_SIZE);
            let accepted = cache.insert("http://h/a", Bytes::from(vec![0u8; size]), size).await;
            assert!(!accepted);
            assert_eq!(cache.len().await, 0);
        });
    }

    // Invariant 8: last writer wins under repeated inserts of the same key.
    #[test]
    fn prop_repeated_insert_last_write_wins(values in prop::collection::vec(1usize..=MAX_OBJECT_SIZE, 2..10)) {
        rt().block_on(async {
            let cache = ProxyCache::new(MAX_CACHE_SIZE, MAX_OBJECT_SIZE);
            for size in &values {
                cache.insert("http://h/a", Bytes::from(vec![1u8; *size]), *size).await;
            }
            let entry = cache.find("http://h/a").await.unwrap();
            assert_eq!(entry.size, *values.last().unwrap());
            assert_eq!(cache.len().await, 1);
        });
    }
}

#[test]
fn prop_eviction_frees_exactly_enough_space() {
    rt().block_on(async {
        let cache = ProxyCache::new(300, 200);
        cache.insert("http://h/1", Bytes::from(vec![0u8; 150]), 150).await;
        cache.insert("http://h/2", Bytes::from(vec![0u8; 150]), 150).await;
        let before = cache.total_size().await;
        assert_eq!(before, 300);

        cache.insert("http://h/3", Bytes::from(vec![0u8; 150]), 150).await;
        // Exactly one entry (150 bytes) had to go to fit the new 150-byte
        // entry within the 300-byte ceiling; no more, no less.
        assert_eq!(cache.total_size().await, 300);
        assert_eq!(cache.len().await, 2);
    });
}
