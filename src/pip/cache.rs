//! Memoization of point lookups keyed by quantized coordinates.

use hashbrown::HashMap;

use super::geometry::GeoPoint;

/// A cached answer: the index of the matched region in load order, or
/// `None` for a confirmed no-match. Absence from the cache means the point
/// has not been queried yet.
pub type CachedAnswer = Option<usize>;

/// Memoizes point lookups for one batch run.
///
/// Stop coordinates repeat heavily across route rows, so most lookups are
/// served from here. Entries are never evicted; at the tens-of-thousands
/// of distinct points this targets that is fine, but an LRU bound would be
/// the first change at larger scale.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, CachedAnswer>,
    hits: u64,
    misses: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantize a point to the 6 fractional digits the upstream CSVs carry.
    /// Using the same precision as the source avoids spurious cache misses
    /// from float formatting jitter.
    pub fn key(point: GeoPoint) -> String {
        format!("{:.6},{:.6}", point.lat, point.lon)
    }

    /// Look up a previously stored answer.
    pub fn get(&mut self, point: GeoPoint) -> Option<CachedAnswer> {
        let cached = self.entries.get(&Self::key(point)).copied();
        match cached {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        cached
    }

    /// Store an answer, including an explicit no-match.
    pub fn insert(&mut self, point: GeoPoint, answer: CachedAnswer) {
        self.entries.insert(Self::key(point), answer);
    }

    /// Number of distinct points cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_quantization() {
        assert_eq!(QueryCache::key(GeoPoint::new(47.6, -122.3)), "47.600000,-122.300000");
        // Jitter below the 6th decimal collapses onto one key.
        assert_eq!(
            QueryCache::key(GeoPoint::new(47.6000000001, -122.3)),
            QueryCache::key(GeoPoint::new(47.6, -122.2999999999))
        );
    }

    #[test]
    fn test_no_match_is_distinct_from_unqueried() {
        let mut cache = QueryCache::new();
        let p = GeoPoint::new(1.0, 2.0);
        assert_eq!(cache.get(p), None);
        cache.insert(p, None);
        // Confirmed no-match now comes back as a stored answer.
        assert_eq!(cache.get(p), Some(None));
    }

    #[test]
    fn test_hit_miss_counters() {
        let mut cache = QueryCache::new();
        let p = GeoPoint::new(1.0, 2.0);
        cache.get(p);
        cache.insert(p, Some(7));
        cache.get(p);
        cache.get(p);
        assert_eq!(cache.stats(), (2, 1));
        assert_eq!(cache.len(), 1);
    }
}
