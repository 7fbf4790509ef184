//! Per-call-site memoization of resolve results.

use crate::syntax::{CallSiteId, ModificationTracker};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// `(call site, incomplete)`
pub type CacheKey = (CallSiteId, bool);

/// Memo table keyed by call site and resolve mode.
///
/// Each key is computed at most once per modification stamp: concurrent
/// requesters of the same key block on the in-flight cell and share its
/// value. The first access after the tracker's stamp moves drops every
/// entry.
pub struct ResolveCache<V> {
    tracker: Arc<ModificationTracker>,
    stamp: AtomicU64,
    entries: DashMap<CacheKey, Arc<OnceCell<V>>>,
}

impl<V: Clone> ResolveCache<V> {
    pub fn new(tracker: Arc<ModificationTracker>) -> Self {
        Self {
            stamp: AtomicU64::new(tracker.stamp()),
            tracker,
            entries: DashMap::new(),
        }
    }

    pub fn tracker(&self) -> &Arc<ModificationTracker> {
        &self.tracker
    }

    pub fn get_or_compute<F>(&self, key: CacheKey, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.sync_stamp();

        // Clone the cell out so no map shard stays locked while computing;
        // `compute` may resolve other call sites through this cache.
        let cell = self
            .entries
            .entry(key)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();

        if let Some(value) = cell.get() {
            trace!(call_site = %key.0, incomplete = key.1, "resolve cache hit");
            return value.clone();
        }
        cell.get_or_init(|| {
            trace!(call_site = %key.0, incomplete = key.1, "resolve cache miss");
            compute()
        })
        .clone()
    }

    pub fn get(&self, key: CacheKey) -> Option<V> {
        self.sync_stamp();
        self.entries
            .get(&key)
            .and_then(|cell| cell.value().get().cloned())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn invalidate(&self) {
        self.entries.clear();
    }

    fn sync_stamp(&self) {
        let current = self.tracker.stamp();
        let seen = self.stamp.load(Ordering::Acquire);
        if seen == current {
            return;
        }
        if self
            .stamp
            .compare_exchange(seen, current, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            debug!(from = seen, to = current, "modification stamp moved; dropping resolve cache");
            self.entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_computes_once_per_key() {
        let cache = ResolveCache::new(Arc::new(ModificationTracker::new()));
        let calls = AtomicUsize::new(0);
        let key = (CallSiteId(1), false);

        for _ in 0..3 {
            let value = cache.get_or_compute(key, || {
                calls.fetch_add(1, Ordering::SeqCst);
                42
            });
            assert_eq!(value, 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The incomplete flag is part of the key.
        cache.get_or_compute((CallSiteId(1), true), || 7);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_bump_drops_entries() {
        let tracker = Arc::new(ModificationTracker::new());
        let cache = ResolveCache::new(tracker.clone());
        let key = (CallSiteId(1), false);

        cache.get_or_compute(key, || 1);
        assert_eq!(cache.get(key), Some(1));

        tracker.bump();
        assert_eq!(cache.get(key), None);
        assert_eq!(cache.get_or_compute(key, || 2), 2);
    }

    #[test]
    fn test_reentrant_compute_for_other_key() {
        let cache = ResolveCache::new(Arc::new(ModificationTracker::new()));
        let outer = cache.get_or_compute((CallSiteId(1), false), || {
            cache.get_or_compute((CallSiteId(2), false), || 10) + 1
        });
        assert_eq!(outer, 11);
    }
}
