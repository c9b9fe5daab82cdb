use crate::models::photo::LookupTable;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub table: Arc<LookupTable>,
    pub fetched_at: Instant,
}

/// The table and its fetch time live and die together.
#[derive(Debug, Default)]
pub struct CacheState {
    snapshot: Option<Snapshot>,
}

impl CacheState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table if it was fetched less than `window` before `now`.
    pub fn fresh(&self, now: Instant, window: Duration) -> Option<Arc<LookupTable>> {
        self.snapshot
            .as_ref()
            .filter(|s| now.saturating_duration_since(s.fetched_at) < window)
            .map(|s| Arc::clone(&s.table))
    }

    pub fn replace(&mut self, table: LookupTable, now: Instant) -> Arc<LookupTable> {
        let table = Arc::new(table);
        self.snapshot = Some(Snapshot {
            table: Arc::clone(&table),
            fetched_at: now,
        });
        table
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_none()
    }
}
