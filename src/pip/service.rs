//! Tract lookup facade combining the region index with a per-run cache.

use tracing::debug;

use super::cache::QueryCache;
use super::geometry::GeoPoint;
use super::index::{LookupStats, RegionIndex};
use crate::models::TractLabel;

/// Point-to-tract lookup service for one batch run.
///
/// Owns the region index and a query cache with the same lifetime, so cache
/// entries can never go stale. Single-threaded by design; parallel callers
/// would need one locator per worker.
pub struct TractLocator {
    index: RegionIndex,
    cache: QueryCache,
    stats: LookupStats,
}

impl TractLocator {
    pub fn new(index: RegionIndex) -> Self {
        Self {
            index,
            cache: QueryCache::new(),
            stats: LookupStats::default(),
        }
    }

    /// Find the label of the tract containing `point`, if any.
    ///
    /// Served from the cache when the quantized point has been seen before;
    /// otherwise delegates to the index and stores the answer, no-match
    /// included.
    pub fn locate(&mut self, point: GeoPoint) -> Option<&TractLabel> {
        let answer = match self.cache.get(point) {
            Some(cached) => cached,
            None => {
                // The cache stores load-order positions so entries stay
                // plain data rather than borrows of the index.
                let found = self.index.find_region_pos(point, &mut self.stats);
                self.cache.insert(point, found);
                found
            }
        };
        answer.map(|i| &self.index.regions()[i].label)
    }

    /// (cache hits, cache misses) so far.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    /// Cumulative bbox/ring test counts across uncached lookups.
    pub fn lookup_stats(&self) -> LookupStats {
        self.stats
    }

    pub fn index(&self) -> &RegionIndex {
        &self.index
    }

    /// Log a summary of cache effectiveness for the run.
    pub fn log_summary(&self) {
        let (hits, misses) = self.cache.stats();
        debug!(
            "Locator summary: {} cached points, {} hits / {} misses, {} ring tests",
            self.cache.len(),
            hits,
            misses,
            self.stats.ring_tests
        );
    }
}
