//! Eviction cache configuration

use super::errors::{CacheError, CacheResult};

/// Construction options for an [`EvictionCache`](super::EvictionCache).
///
/// Validated once, when the cache is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries. Must be at least 1.
    pub capacity: usize,
    /// Write creation and clear events to stdout. Off unless requested.
    pub log_lifecycle: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            log_lifecycle: false,
        }
    }
}

impl CacheConfig {
    /// Default config with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Enable lifecycle logging
    pub fn logged(self) -> Self {
        Self {
            log_lifecycle: true,
            ..self
        }
    }

    /// Disable lifecycle logging
    pub fn quiet(self) -> Self {
        Self {
            log_lifecycle: false,
            ..self
        }
    }

    /// Reject configurations the cache cannot honor
    pub fn validate(&self) -> CacheResult<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
