//! Memoization of derived daily series.
//!
//! Entries are keyed by the property and a hash of the exact observation set
//! the series was derived from, so any change in the store (a new scrape, an
//! accepted price) naturally misses and recomputes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache;
use tarifa_core::{CacheConfig, PriceObservation, PropertyIdentity, PropertySeries, aggregate};

/// Hit/miss counters of the series memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    /// Lookups served from the memo.
    pub hits: u64,
    /// Lookups that had to aggregate.
    pub misses: u64,
}

type MemoKey = (PropertyIdentity, u64);

pub(crate) struct SeriesMemo {
    cache: Cache<MemoKey, Arc<PropertySeries>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SeriesMemo {
    pub(crate) fn new(cfg: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(cfg.max_entries)
            .time_to_live(cfg.ttl)
            .build();
        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn fingerprint(observations: &[PriceObservation]) -> u64 {
        let mut hasher = DefaultHasher::new();
        observations.hash(&mut hasher);
        hasher.finish()
    }

    /// Serve the series for `identity` from the memo or aggregate and store it.
    ///
    /// Returns `None` when no observation belongs to the property.
    pub(crate) async fn get_or_compute(
        &self,
        identity: &PropertyIdentity,
        observations: &[PriceObservation],
    ) -> Option<Arc<PropertySeries>> {
        let key = (identity.clone(), Self::fingerprint(observations));
        if let Some(hit) = self.cache.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "tracing")]
            tracing::debug!(property = %identity.name(), "series memo hit");
            return Some(hit);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let series = Arc::new(aggregate(observations).take(identity)?);
        self.cache.insert(key, Arc::clone(&series)).await;
        Some(series)
    }

    pub(crate) fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
