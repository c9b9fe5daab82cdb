//! Time-bounded cache in front of the photo table endpoint.
//!
//! The state lock is only held for the freshness check and for the final
//! write, never across the fetch. Two callers that both find the table
//! stale will therefore both fetch; the later write wins.

use crate::error::Result;
use crate::models::cache::CacheState;
use crate::models::photo::LookupTable;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Where the cache gets a fresh table from.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_table(&self) -> Result<LookupTable>;
}

pub struct LookupCache<S> {
    source: S,
    window: Duration,
    state: Mutex<CacheState>,
}

impl<S: TableSource> LookupCache<S> {
    pub fn new(source: S, window: Duration) -> Self {
        Self {
            source,
            window,
            state: Mutex::new(CacheState::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the cached table while it is fresh, otherwise fetches a new one.
    ///
    /// A failed fetch leaves the previous snapshot and its timestamp alone;
    /// the stale table is not handed out as a fallback.
    pub async fn get_table(&self) -> Result<Arc<LookupTable>> {
        let cached = self.state().fresh(Instant::now(), self.window);
        if let Some(table) = cached {
            debug!("Using cached photo table");
            return Ok(table);
        }

        let table = self.source.fetch_table().await?;
        let now = Instant::now();
        let table = self.state().replace(table, now);
        info!("Photo table loaded with {} codes", table.len());
        Ok(table)
    }

    /// Time the current snapshot was fetched, if there is one.
    pub fn fetched_at(&self) -> Option<Instant> {
        self.state().snapshot().map(|s| s.fetched_at)
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhotoError;
    use crate::models::photo::LookupRecord;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const WINDOW: Duration = Duration::from_secs(300);

    /// Replays queued responses and counts how often it was asked.
    #[derive(Default)]
    struct FakeSource {
        responses: Mutex<VecDeque<Result<LookupTable>>>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl FakeSource {
        fn push(&self, response: Result<LookupTable>) {
            self.responses.lock().unwrap().push_back(response);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TableSource for FakeSource {
        async fn fetch_table(&self) -> Result<LookupTable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch")
        }
    }

    fn table(code: &str, url: &str) -> LookupTable {
        let record = LookupRecord {
            download_url: Some(url.to_string()),
            extra: Default::default(),
        };
        LookupTable::from([(code.to_string(), record)])
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_call_fetches_once() {
        let cache = LookupCache::new(FakeSource::default(), WINDOW);
        cache.source().push(Ok(table("X9", "http://x/1.jpg")));

        let result = cache.get_table().await.unwrap();

        assert_eq!(*result, table("X9", "http://x/1.jpg"));
        assert_eq!(cache.source().calls(), 1);
        assert!(cache.fetched_at().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_calls_reuse_snapshot() {
        let cache = LookupCache::new(FakeSource::default(), WINDOW);
        cache.source().push(Ok(table("A1", "u1")));

        let first = cache.get_table().await.unwrap();
        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(59)).await;
            let again = cache.get_table().await.unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }

        assert_eq!(cache.source().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_snapshot_triggers_one_fetch() {
        let cache = LookupCache::new(FakeSource::default(), WINDOW);
        cache.source().push(Ok(table("A1", "u1")));
        cache.source().push(Ok(table("A1", "u2")));

        cache.get_table().await.unwrap();
        tokio::time::advance(WINDOW + Duration::from_millis(1)).await;

        let refreshed = cache.get_table().await.unwrap();
        assert_eq!(refreshed["A1"].download_url.as_deref(), Some("u2"));
        assert_eq!(cache.source().calls(), 2);

        cache.get_table().await.unwrap();
        assert_eq!(cache.source().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_failure_leaves_cache_empty() {
        let cache = LookupCache::new(FakeSource::default(), WINDOW);
        cache.source().push(Err(PhotoError::RemoteFetch { status: 500 }));

        let err = cache.get_table().await.unwrap_err();

        assert!(matches!(err, PhotoError::RemoteFetch { status: 500 }));
        assert!(cache.fetched_at().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_application_failure_is_surfaced() {
        let cache = LookupCache::new(FakeSource::default(), WINDOW);
        cache.source().push(Err(PhotoError::RemoteApplication {
            message: "db down".to_string(),
        }));

        match cache.get_table().await {
            Err(PhotoError::RemoteApplication { message }) => assert_eq!(message, "db down"),
            other => panic!("expected application error, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_keeps_old_snapshot() {
        let cache = LookupCache::new(FakeSource::default(), WINDOW);
        cache.source().push(Ok(table("A1", "u1")));
        cache.source().push(Err(PhotoError::RemoteFetch { status: 503 }));
        cache.source().push(Ok(table("A1", "u3")));

        let original = cache.get_table().await.unwrap();
        let fetched_at = cache.fetched_at().unwrap();

        tokio::time::advance(WINDOW).await;
        assert!(cache.get_table().await.is_err());
        assert_eq!(cache.fetched_at(), Some(fetched_at));

        // Still stale, so the next call goes to the source again.
        let refreshed = cache.get_table().await.unwrap();
        assert!(!Arc::ptr_eq(&original, &refreshed));
        assert_eq!(refreshed["A1"].download_url.as_deref(), Some("u3"));
        assert_eq!(cache.source().calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_racing_callers_each_fetch() {
        let source = FakeSource {
            delay: Duration::from_secs(1),
            ..Default::default()
        };
        source.push(Ok(table("A1", "u1")));
        source.push(Ok(table("A1", "u2")));
        let cache = LookupCache::new(source, WINDOW);

        let (first, second) = tokio::join!(cache.get_table(), cache.get_table());

        let (first, second) = (first.unwrap(), second.unwrap());
        assert_eq!(cache.source().calls(), 2);
        assert!(!Arc::ptr_eq(&first, &second));

        // The later write is what subsequent callers see.
        let cached = cache.get_table().await.unwrap();
        assert_eq!(cache.source().calls(), 2);
        assert!(Arc::ptr_eq(&cached, &first) || Arc::ptr_eq(&cached, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_instances() {
        let first = LookupCache::new(FakeSource::default(), WINDOW);
        let second = LookupCache::new(FakeSource::default(), WINDOW);
        first.source().push(Ok(table("A1", "u1")));

        first.get_table().await.unwrap();

        assert!(first.fetched_at().is_some());
        assert!(second.fetched_at().is_none());
        assert_eq!(second.source().calls(), 0);
    }
}
