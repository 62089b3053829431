//! Observable lifecycle events
//!
//! Only structural lifecycle points are logged. Lookups, touches and
//! traversals never emit events.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    // Ordered index
    /// An index finished building from a record batch
    IndexBuilt,
    /// `validate()` found a node outside its inherited key interval
    IndexInvariantViolated,

    // Eviction cache
    /// A cache was constructed
    CacheCreated,
    /// A cache was cleared
    CacheCleared,
    /// Cache construction was refused
    CacheConfigRejected,
}

impl Event {
    /// Stable event name used as the `event` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::IndexBuilt => "INDEX_BUILT",
            Event::IndexInvariantViolated => "INDEX_INVARIANT_VIOLATED",
            Event::CacheCreated => "CACHE_CREATED",
            Event::CacheCleared => "CACHE_CLEARED",
            Event::CacheConfigRejected => "CACHE_CONFIG_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::IndexBuilt | Event::CacheCreated | Event::CacheCleared => Severity::Info,
            Event::IndexInvariantViolated => Severity::Warn,
            Event::CacheConfigRejected => Severity::Fatal,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
