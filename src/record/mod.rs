//! Record model
//!
//! Records are owned by the caller. The index and cache only hold the values
//! they are given and never rewrite a record's key.

mod field;
mod user;

pub use field::FieldValue;
pub use user::{Gender, Role, SalaryBand, User};

use std::fmt::Debug;

use chrono::NaiveDate;

/// A record that can be placed in an [`OrderedIndex`](crate::index::OrderedIndex).
pub trait IndexedRecord {
    /// Unique key the index orders by
    type Key: Ord + Copy + Debug;

    /// The record's unique key
    fn key(&self) -> Self::Key;

    /// Secondary chronological ordering used to shuffle insertion order
    /// during a build. `None` sorts before every date.
    fn chronology(&self) -> Option<NaiveDate> {
        None
    }

    /// Named field value for range queries, `None` if the record lacks it
    fn field(&self, name: &str) -> Option<FieldValue>;
}
