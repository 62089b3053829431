//! Cache error types
//!
//! Error codes:
//! - ROSTER_CACHE_INVALID_CAPACITY (FATAL)

use std::fmt;

use thiserror::Error;

use crate::observability::Severity;

/// Cache error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheErrorCode {
    /// Capacity below 1 at construction
    RosterCacheInvalidCapacity,
}

impl CacheErrorCode {
    /// Stable string code
    pub fn code(&self) -> &'static str {
        match self {
            CacheErrorCode::RosterCacheInvalidCapacity => "ROSTER_CACHE_INVALID_CAPACITY",
        }
    }

    /// Severity of the error
    pub fn severity(&self) -> Severity {
        match self {
            CacheErrorCode::RosterCacheInvalidCapacity => Severity::Fatal,
        }
    }
}

impl fmt::Display for CacheErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors raised by [`EvictionCache`](super::EvictionCache) construction.
///
/// Lookups never fail; a miss is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The cache cannot hold a single entry. Rebuild with a valid config.
    #[error("[FATAL] ROSTER_CACHE_INVALID_CAPACITY: capacity must be at least 1, got {capacity}")]
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
    },
}

impl CacheError {
    /// Returns the error code
    pub fn code(&self) -> CacheErrorCode {
        match self {
            CacheError::InvalidCapacity { .. } => CacheErrorCode::RosterCacheInvalidCapacity,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }

    /// Fatal errors are not recoverable without constructing a new cache
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string() {
        assert_eq!(
            CacheErrorCode::RosterCacheInvalidCapacity.code(),
            "ROSTER_CACHE_INVALID_CAPACITY"
        );
    }

    #[test]
    fn test_invalid_capacity_is_fatal() {
        let err = CacheError::InvalidCapacity { capacity: 0 };
        assert!(err.is_fatal());
        assert_eq!(err.code(), CacheErrorCode::RosterCacheInvalidCapacity);
    }

    #[test]
    fn test_error_display() {
        let display = CacheError::InvalidCapacity { capacity: 0 }.to_string();
        assert!(display.contains("FATAL"));
        assert!(display.contains("ROSTER_CACHE_INVALID_CAPACITY"));
        assert!(display.contains("got 0"));
    }
}
