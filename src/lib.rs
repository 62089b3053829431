//! roster - in-memory data structures over user records
//!
//! - `index`: ordered binary search index keyed by record id
//! - `cache`: bounded LRU cache with O(1) touches
//! - `aggregate`: grouping, inversion, merge and intersection over maps
//!
//! All components are synchronous, single-threaded and perform no I/O
//! apart from structured lifecycle logs.

pub mod aggregate;
pub mod cache;
pub mod index;
pub mod observability;
pub mod record;

pub use cache::{CacheConfig, CacheError, CacheStats, EvictionCache};
pub use index::{IndexConfig, IndexReport, OrderedIndex};
pub use record::{FieldValue, Gender, IndexedRecord, Role, SalaryBand, User};
