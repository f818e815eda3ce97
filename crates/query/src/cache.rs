//! Typed read cache: freshness windows, stale-while-revalidate, in-flight
//! deduplication, and a single retry for transient faults.

use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use api::ApiError;
use backon::{ConstantBuilder, Retryable};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::{debug, warn};

use crate::key::QueryKey;

/// Cached reads are served without a network call for this long.
pub const FRESH_WINDOW: Duration = Duration::from_secs(5 * 60);
/// Delay before the single retry of a transient read fault.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

type LoadFuture<T> = Shared<BoxFuture<'static, Result<Arc<T>, ApiError>>>;

struct CacheEntry<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

/// One cache per read shape. Entries are keyed by [`QueryKey`]; at most one
/// network call is outstanding per distinct key, shared by all callers.
pub struct TypedCache<T> {
    fresh_for: Duration,
    entries: Arc<DashMap<QueryKey, CacheEntry<T>>>,
    inflight: Arc<DashMap<QueryKey, LoadFuture<T>>>,
}

impl<T> Clone for TypedCache<T> {
    fn clone(&self) -> Self {
        Self {
            fresh_for: self.fresh_for,
            entries: Arc::clone(&self.entries),
            inflight: Arc::clone(&self.inflight),
        }
    }
}

impl<T: Send + Sync + 'static> TypedCache<T> {
    pub fn new() -> Self {
        Self::with_fresh_window(FRESH_WINDOW)
    }

    pub fn with_fresh_window(fresh_for: Duration) -> Self {
        Self {
            fresh_for,
            entries: Arc::new(DashMap::new()),
            inflight: Arc::new(DashMap::new()),
        }
    }

    /// Resolve `key`, loading over the network only when needed.
    ///
    /// A fresh entry is returned as-is. A stale entry is returned immediately
    /// while a background refetch revalidates it. Concurrent calls for the
    /// same key share one in-flight load.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, loader: F) -> Result<Arc<T>, ApiError>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        if let Some(entry) = self.entries.get(&key) {
            let age = entry.fetched_at.elapsed();
            let value = Arc::clone(&entry.value);
            drop(entry);

            if age < self.fresh_for {
                debug!(key = %key, "cache hit");
                return Ok(value);
            }

            debug!(key = %key, "stale hit, revalidating in background");
            let refresh = self.join_load(key, loader);
            tokio::spawn(async move {
                let _ = refresh.await;
            });
            return Ok(value);
        }

        self.join_load(key, loader).await
    }

    /// Discard every entry; the next read per key is a cold fetch.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Attach to the in-flight load for `key`, starting one if none exists.
    fn join_load<F, Fut>(&self, key: QueryKey, loader: F) -> LoadFuture<T>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        match self.inflight.entry(key.clone()) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => {
                let entries = Arc::clone(&self.entries);
                let inflight = Arc::clone(&self.inflight);
                let fut = async move {
                    let result = loader
                        .retry(
                            &ConstantBuilder::default()
                                .with_delay(RETRY_DELAY)
                                .with_max_times(1),
                        )
                        .when(|e: &ApiError| e.should_retry())
                        .notify(|e: &ApiError, dur: Duration| {
                            warn!(
                                "transient read fault, retrying after {:.1}s: {}",
                                dur.as_secs_f64(),
                                e
                            )
                        })
                        .await
                        .map(Arc::new);

                    match &result {
                        Ok(value) => {
                            entries.insert(
                                key.clone(),
                                CacheEntry {
                                    value: Arc::clone(value),
                                    fetched_at: Instant::now(),
                                },
                            );
                        }
                        Err(e) => warn!(key = %key, error = %e, "read failed"),
                    }
                    inflight.remove(&key);
                    result
                }
                .boxed()
                .shared();

                slot.insert(fut.clone());
                fut
            }
        }
    }
}

impl<T: Send + Sync + 'static> Default for TypedCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Resource;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn key() -> QueryKey {
        QueryKey::of(Resource::Projects)
    }

    fn counting_loader(
        calls: &Arc<AtomicU32>,
    ) -> impl FnMut() -> BoxFuture<'static, Result<u32, ApiError>> + Send + 'static {
        let calls = Arc::clone(calls);
        move || {
            let calls = Arc::clone(&calls);
            async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1) }.boxed()
        }
    }

    #[tokio::test]
    async fn fresh_entry_serves_without_network() {
        let cache = TypedCache::<u32>::new();
        let calls = Arc::new(AtomicU32::new(0));

        let first = cache.fetch(key(), counting_loader(&calls)).await.unwrap();
        let second = cache.fetch(key(), counting_loader(&calls)).await.unwrap();

        assert_eq!(*first, 1);
        assert_eq!(*second, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_load() {
        let cache = TypedCache::<u32>::new();
        let calls = Arc::new(AtomicU32::new(0));
        let slow = Arc::clone(&calls);
        let loader = move || {
            let calls = Arc::clone(&slow);
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(calls.fetch_add(1, Ordering::SeqCst) + 1)
            }
            .boxed()
        };

        let (a, b) = tokio::join!(
            cache.fetch(key(), loader.clone()),
            cache.fetch(key(), loader.clone())
        );

        assert_eq!(*a.unwrap(), 1);
        assert_eq!(*b.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clear_forces_a_cold_fetch() {
        let cache = TypedCache::<u32>::new();
        let calls = Arc::new(AtomicU32::new(0));

        cache.fetch(key(), counting_loader(&calls)).await.unwrap();
        cache.clear();
        let after = cache.fetch(key(), counting_loader(&calls)).await.unwrap();

        assert_eq!(*after, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stale_entry_serves_last_value_and_revalidates() {
        let cache = TypedCache::<u32>::with_fresh_window(Duration::ZERO);
        let calls = Arc::new(AtomicU32::new(0));

        let first = cache.fetch(key(), counting_loader(&calls)).await.unwrap();
        assert_eq!(*first, 1);

        // immediately stale: the old value comes back, refresh runs behind it
        let second = cache.fetch(key(), counting_loader(&calls)).await.unwrap();
        assert_eq!(*second, 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn transient_fault_is_retried_once() {
        let cache = TypedCache::<u32>::new();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let loader = move || {
            let calls = Arc::clone(&counter);
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ApiError::Server {
                        status: 502,
                        body: String::new(),
                    })
                } else {
                    Ok(7)
                }
            }
            .boxed()
        };

        let value = cache.fetch(key(), loader).await.unwrap();
        assert_eq!(*value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_transient_fault_is_not_retried() {
        let cache = TypedCache::<u32>::new();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let loader = move || {
            let calls = Arc::clone(&counter);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(ApiError::PermissionDenied)
            }
            .boxed()
        };

        let err = cache.fetch(key(), loader).await.unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
