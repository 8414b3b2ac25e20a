use crate::models::{CampaignRow, FetchOutcome, KpiSnapshot};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    /// Wall-clock stamp for display only; freshness uses `stored_at`.
    pub fetched_at: DateTime<Utc>,
    stored_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) <= ttl
    }
}

/// Single-slot memo for one backend call. The lock guards the slot only, so
/// concurrent misses may both fetch and the later store wins.
#[derive(Debug)]
pub struct TtlCell<T> {
    name: &'static str,
    ttl: Duration,
    slot: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone> TtlCell<T> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> CacheEntry<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.get_or_fetch_at(Instant::now(), fetch).await
    }

    pub async fn get_or_fetch_at<F, Fut>(&self, now: Instant, fetch: F) -> CacheEntry<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(entry) = self.slot.lock().await.as_ref() {
            if entry.is_fresh(now, self.ttl) {
                debug!(cache = self.name, fetched_at = %entry.fetched_at, "cache hit");
                return entry.clone();
            }
        }

        debug!(cache = self.name, "cache miss");
        let entry = CacheEntry {
            value: fetch().await,
            fetched_at: Utc::now(),
            stored_at: now,
        };
        *self.slot.lock().await = Some(entry.clone());
        entry
    }
}

#[derive(Debug)]
pub struct ResultCache {
    pub kpis: TtlCell<FetchOutcome<KpiSnapshot>>,
    pub campaigns: TtlCell<FetchOutcome<Vec<CampaignRow>>>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            kpis: TtlCell::new("kpis", ttl),
            campaigns: TtlCell::new("campaigns", ttl),
        }
    }
}
