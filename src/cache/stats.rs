//! Cache statistics
//!
//! Counters are passive: they never influence eviction.

use serde::Serialize;

/// Snapshot of cache counters since construction or the last `clear()`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of `get` calls that found their key.
    pub hits: u64,
    /// Number of `get` calls that did not.
    pub misses: u64,
    /// Number of entries dropped to make room.
    pub evictions: u64,
    /// `hits / (hits + misses)`, 0.0 before any access.
    pub hit_rate: f64,
}

impl CacheStats {
    pub(super) fn from_counts(hits: u64, misses: u64, evictions: u64) -> Self {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        Self {
            hits,
            misses,
            evictions,
            hit_rate,
        }
    }

    /// Total number of `get` calls
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }
}
