//! Ordered index configuration

/// Build-time options for an [`OrderedIndex`](super::OrderedIndex).
///
/// Immutable once the index exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Stable-sort records by their chronology before inserting them.
    ///
    /// Reduces skew when keys arrive in key order; does not bound depth.
    pub presort_by_chronology: bool,

    /// Write an `INDEX_BUILT` line to stdout when a build finishes.
    ///
    /// Off unless requested.
    pub log_builds: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            presort_by_chronology: true,
            log_builds: false,
        }
    }
}

impl IndexConfig {
    /// Insert records in the exact order supplied.
    pub fn literal() -> Self {
        Self {
            presort_by_chronology: false,
            ..Self::default()
        }
    }

    /// Enable build logging
    pub fn logged(self) -> Self {
        Self {
            log_builds: true,
            ..self
        }
    }
}
