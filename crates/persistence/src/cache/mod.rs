//! In-memory caching layer for candidate lists

use finders_core::{CandidateMatch, QueryId};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Cached item with expiration
struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

/// Thread-safe cache of candidate snapshots keyed by query identifier,
/// with TTL and max-entry bounds
pub struct CandidateCache {
    entries: RwLock<HashMap<QueryId, CacheEntry<Vec<CandidateMatch>>>>,
    default_ttl: Duration,
    max_entries: usize,
}

impl CandidateCache {
    /// Create a new cache with default TTL and max entry count
    pub fn with_capacity(default_ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn new(default_ttl: Duration) -> Self {
        Self::with_capacity(default_ttl, 32)
    }

    /// Get the candidates for a query if not expired
    pub fn get(&self, query_id: QueryId) -> Option<Vec<CandidateMatch>> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(&query_id)?;

        if entry.is_expired() {
            None
        } else {
            Some(entry.value.clone())
        }
    }

    /// Insert or replace the candidates for a query.
    /// Evicts expired entries, then the oldest, when at capacity.
    pub fn insert(&self, query_id: QueryId, candidates: Vec<CandidateMatch>) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_entries && !entries.contains_key(&query_id) {
                entries.retain(|_, entry| !entry.is_expired());
            }

            if entries.len() >= self.max_entries && !entries.contains_key(&query_id) {
                if let Some(oldest) = entries
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| *k)
                {
                    entries.remove(&oldest);
                }
            }

            entries.insert(
                query_id,
                CacheEntry {
                    value: candidates,
                    inserted_at: Instant::now(),
                    ttl: self.default_ttl,
                },
            );
        }
    }

    /// Drop the snapshot for one query
    pub fn invalidate(&self, query_id: QueryId) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(&query_id);
        }
    }

    /// Clear all expired entries
    pub fn cleanup(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| !entry.is_expired());
        }
    }

    /// Clear entire cache
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CandidateCache {
    fn default() -> Self {
        // 60 second TTL, matches are recomputed server-side as new reports arrive
        Self::with_capacity(Duration::from_secs(60), 32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finders_core::ItemId;

    fn candidate(id: i64) -> CandidateMatch {
        CandidateMatch {
            id: ItemId(id),
            latitude: 35.0,
            longitude: 135.7,
            location_notes: "library".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_get_after_insert() {
        let cache = CandidateCache::default();
        cache.insert(QueryId(7), vec![candidate(1)]);

        let hit = cache.get(QueryId(7)).unwrap();
        assert_eq!(hit.len(), 1);
        assert!(cache.get(QueryId(8)).is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = CandidateCache::new(Duration::ZERO);
        cache.insert(QueryId(1), vec![candidate(1)]);
        std::thread::sleep(Duration::from_millis(2));

        assert!(cache.get(QueryId(1)).is_none());
        cache.cleanup();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let cache = CandidateCache::with_capacity(Duration::from_secs(60), 2);
        cache.insert(QueryId(1), vec![]);
        std::thread::sleep(Duration::from_millis(2));
        cache.insert(QueryId(2), vec![]);
        cache.insert(QueryId(3), vec![]);

        assert_eq!(cache.len(), 2);
        assert!(cache.get(QueryId(1)).is_none());
        assert!(cache.get(QueryId(3)).is_some());
    }

    #[test]
    fn test_invalidate() {
        let cache = CandidateCache::default();
        cache.insert(QueryId(1), vec![candidate(2)]);
        cache.invalidate(QueryId(1));
        assert!(cache.get(QueryId(1)).is_none());
    }
}
