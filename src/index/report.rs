//! Index structure reports

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{IndexedRecord, SalaryBand, User};

use super::tree::OrderedIndex;

/// Summary of an index's shape plus a distribution of its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexReport<B: Ord> {
    pub total_nodes: usize,
    pub depth: usize,
    pub is_valid: bool,
    /// Record count per class, ordered by class
    pub distribution: BTreeMap<B, usize>,
}

impl<R: IndexedRecord> OrderedIndex<R> {
    /// Summarize the index, counting records per class returned by `classify`.
    pub fn report<B, F>(&self, mut classify: F) -> IndexReport<B>
    where
        B: Ord,
        F: FnMut(&R) -> B,
    {
        let mut distribution = BTreeMap::new();
        for record in self.in_order() {
            *distribution.entry(classify(record)).or_insert(0) += 1;
        }

        IndexReport {
            total_nodes: self.len(),
            depth: self.depth(),
            is_valid: self.validate(),
            distribution,
        }
    }
}

impl OrderedIndex<User> {
    /// Report with records counted per [`SalaryBand`]
    pub fn salary_report(&self) -> IndexReport<SalaryBand> {
        self.report(User::salary_band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexConfig;

    #[test]
    fn test_salary_report() {
        let users = vec![
            User::new(10, "a", 45_000.0),
            User::new(5, "b", 65_000.0),
            User::new(15, "c", 85_000.0),
            User::new(2, "d", 120_000.0),
            User::new(7, "e", 59_000.0),
        ];
        let index = OrderedIndex::build_with(users, IndexConfig::literal());
        let report = index.salary_report();

        assert_eq!(report.total_nodes, 5);
        assert_eq!(report.depth, 2);
        assert!(report.is_valid);
        assert_eq!(report.distribution.get(&SalaryBand::Entry), Some(&2));
        assert_eq!(report.distribution.get(&SalaryBand::Mid), Some(&1));
        assert_eq!(report.distribution.get(&SalaryBand::Senior), Some(&1));
        assert_eq!(report.distribution.get(&SalaryBand::Executive), Some(&1));
    }

    #[test]
    fn test_empty_report() {
        let index: OrderedIndex<User> = OrderedIndex::with_config(IndexConfig::default());
        let report = index.salary_report();
        assert_eq!(report.total_nodes, 0);
        assert_eq!(report.depth, 0);
        assert!(report.is_valid);
        assert!(report.distribution.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let index = OrderedIndex::build_with(vec![User::new(1, "a", 70_000.0)], IndexConfig::default());
        let json = serde_json::to_value(index.salary_report()).unwrap();
        assert_eq!(json["totalNodes"], 1);
        assert_eq!(json["depth"], 0);
        assert_eq!(json["isValid"], true);
        assert_eq!(json["distribution"]["Mid"], 1);
        assert!(json.get("total_nodes").is_none());
    }
}
