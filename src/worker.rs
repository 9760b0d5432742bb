use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::ProxyCache;
use crate::queue::HandoffQueue;
use crate::transaction::serve_one;
use crate::Config;

/// Spawns `config.nthreads` detached worker tasks, each running an
/// unbounded `pop -> serve_one -> (connection drops)` loop against the
/// shared queue and cache. The returned handles are never awaited by
/// the caller in normal operation (the workers run for the process
/// lifetime); they are returned so tests can observe task completion
/// after the queue's sender side is dropped.
pub fn spawn_workers(
    queue: Arc<HandoffQueue>,
    cache: ProxyCache,
    config: Arc<Config>,
) -> Vec<JoinHandle<()>> {
    (0..config.nthreads)
        .map(|id| {
            let queue = queue.clone();
            let cache = cache.clone();
            let config = config.clone();
            tokio::spawn(async move {
                loop {
                    let Some(client) = queue.pop().await else {
                        debug!("worker {id}: queue closed, exiting");
                        break;
                    };
                    serve_one(client, cache.clone(), &config).await;
                }
            })
        })
        .collect()
}
