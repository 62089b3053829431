//! Eviction cache subsystem
//!
//! A bounded key-value store with least-recently-used eviction.
//!
//! # Invariants
//!
//! - `len() <= capacity()` at all times
//! - The least recently touched entry is always the next eviction candidate
//! - `get` and `set` touch an entry; `peek` and `contains` do not
//! - Every touch is O(1)
//!
//! # Lifecycle of an entry
//!
//! ```text
//! absent --set--> most recent --(other keys touched)--> least recent
//!    ^                 ^   |                                 |
//!    |                 +---+ get / set                       |
//!    +------------- delete / evicted by capacity <-----------+
//! ```

mod config;
mod errors;
mod lru;
mod stats;

pub use config::CacheConfig;
pub use errors::{CacheError, CacheErrorCode, CacheResult};
pub use lru::EvictionCache;
pub use stats::CacheStats;
