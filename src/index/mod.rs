//! Ordered index over records
//!
//! A binary search tree keyed by each record's unique key, stored as an
//! arena of nodes linked by index.
//!
//! # Design Principles
//!
//! - Key lookups descend the tree; every other query scans it
//! - Iterative walks only, so degenerate chains cannot overflow the stack
//! - No single-node delete: discard or rebuild the whole index
//!
//! # Invariants
//!
//! - Left subtree keys < node key < right subtree keys
//! - Inserting an existing key is a no-op
//! - Queries never fail; absence is an empty result
//!
//! # Balance
//!
//! `build` stably sorts records by chronology before inserting them. This
//! reduces skew when input arrives in key order but guarantees nothing:
//! depth is O(n) in the worst case.

mod config;
mod report;
mod traversal;
mod tree;

pub use config::IndexConfig;
pub use report::IndexReport;
pub use traversal::InOrder;
pub use tree::OrderedIndex;
