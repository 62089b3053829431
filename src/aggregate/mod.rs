//! Map-based aggregation primitives
//!
//! Generic over any key that is `Eq + Hash`. Results are fresh `HashMap`s
//! owned by the caller; inputs are consumed.
//!
//! - `group_by`, `count_by`: partition items by a derived key
//! - `invert`: `key -> value` into `value -> [keys]`
//! - `merge`, `intersect`, `intersect_with`: combine two maps
//! - `Pipeline`: key/value extraction with filters

mod combine;
mod grouping;
mod pipeline;

pub use combine::{intersect, intersect_with, merge};
pub use grouping::{count_by, group_by, invert};
pub use pipeline::Pipeline;
