//! Arena-backed binary search tree
//!
//! Nodes live in a `Vec` and link to their children by [`NodeId`]. A parent
//! exclusively owns its children; nodes are only ever appended, so ids stay
//! valid for the lifetime of the index.
//!
//! Every walk is iterative. Trees built from monotonically ordered keys
//! degrade to a chain, and recursion over a chain of thousands of nodes
//! would exhaust the call stack.

use std::cmp::Ordering;

use crate::observability::{log_event_with_fields, Event};
use crate::record::{FieldValue, IndexedRecord};

use super::config::IndexConfig;

/// Position of a node in the index arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

#[derive(Debug, Clone)]
pub(super) struct TreeNode<R> {
    pub(super) record: R,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
}

impl<R> TreeNode<R> {
    fn leaf(record: R) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }
}

/// Binary search index over records keyed by a unique key.
///
/// Accelerates key lookups only. Range queries over other fields scan every
/// node.
#[derive(Debug, Clone)]
pub struct OrderedIndex<R: IndexedRecord> {
    pub(super) nodes: Vec<TreeNode<R>>,
    pub(super) root: Option<NodeId>,
    config: IndexConfig,
}

impl<R: IndexedRecord> Default for OrderedIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: IndexedRecord> OrderedIndex<R> {
    /// Creates an empty index with default configuration
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Creates an empty index
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            config,
        }
    }

    /// Build an index from a batch of records.
    ///
    /// Records are stably sorted by chronology (undated first) and then
    /// inserted one by one. Duplicate keys keep the first record inserted.
    /// O(n log n) expected, O(n^2) when chronology still tracks key order.
    /// Writes nothing; use [`IndexConfig::logged`] to get an `INDEX_BUILT`
    /// line on stdout.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        Self::build_with(records, IndexConfig::default())
    }

    /// Build with explicit configuration
    pub fn build_with<I>(records: I, config: IndexConfig) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        let mut records: Vec<R> = records.into_iter().collect();
        if config.presort_by_chronology {
            records.sort_by_key(|r| r.chronology());
        }

        let mut index = Self::with_config(config);
        index.nodes.reserve(records.len());

        let mut skipped = 0usize;
        for record in records {
            if !index.insert(record) {
                skipped += 1;
            }
        }

        if config.log_builds {
            log_event_with_fields(
                Event::IndexBuilt,
                &[
                    ("nodes", index.len().to_string()),
                    ("depth", index.depth().to_string()),
                    ("duplicates_skipped", skipped.to_string()),
                ],
            );
        }

        index
    }

    /// Configuration this index was built with
    pub fn config(&self) -> IndexConfig {
        self.config
    }

    /// Insert a record.
    ///
    /// Returns false, leaving the index untouched, if the key already exists.
    pub fn insert(&mut self, record: R) -> bool {
        let key = record.key();

        let mut current = match self.root {
            Some(root) => root,
            None => {
                self.root = Some(self.push(record));
                return true;
            }
        };

        loop {
            let node = &self.nodes[current.0];
            let go_left = match key.cmp(&node.record.key()) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => return false,
            };
            let next = if go_left { node.left } else { node.right };

            match next {
                Some(child) => current = child,
                None => {
                    let id = self.push(record);
                    let parent = &mut self.nodes[current.0];
                    if go_left {
                        parent.left = Some(id);
                    } else {
                        parent.right = Some(id);
                    }
                    return true;
                }
            }
        }
    }

    fn push(&mut self, record: R) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::leaf(record));
        id
    }

    fn locate(&self, key: R::Key) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            current = match key.cmp(&node.record.key()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Point lookup by key
    pub fn find(&self, key: R::Key) -> Option<&R> {
        self.locate(key).map(|id| &self.nodes[id.0].record)
    }

    /// Whether a record with this key is indexed
    pub fn contains(&self, key: R::Key) -> bool {
        self.locate(key).is_some()
    }

    /// Root record, if any
    pub fn root(&self) -> Option<&R> {
        self.root.map(|id| &self.nodes[id.0].record)
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index has no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Longest root-to-leaf path, counted in edges.
    ///
    /// 0 for an empty tree and for a single node.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut deepest = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[id.0];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Records whose `field` lies in `[min, max]`, in arena order.
    ///
    /// Full scan. Records without the field are skipped.
    pub fn range_query(&self, min: &FieldValue, max: &FieldValue, field: &str) -> Vec<&R> {
        if min > max {
            return Vec::new();
        }
        self.nodes
            .iter()
            .map(|node| &node.record)
            .filter(|record| {
                record
                    .field(field)
                    .is_some_and(|value| value.within(min, max))
            })
            .collect()
    }

    /// Check the BST ordering invariant.
    ///
    /// Each node must fall strictly inside the open interval inherited from
    /// its ancestors.
    pub fn validate(&self) -> bool {
        let Some(root) = self.root else {
            return true;
        };

        let mut stack: Vec<(NodeId, Option<R::Key>, Option<R::Key>)> = vec![(root, None, None)];
        while let Some((id, low, high)) = stack.pop() {
            let node = &self.nodes[id.0];
            let key = node.record.key();

            let above_low = low.map_or(true, |low| key > low);
            let below_high = high.map_or(true, |high| key < high);
            if !(above_low && below_high) {
                log_event_with_fields(
                    Event::IndexInvariantViolated,
                    &[
                        ("key", format!("{:?}", key)),
                        ("low", format!("{:?}", low)),
                        ("high", format!("{:?}", high)),
                    ],
                );
                return false;
            }

            if let Some(left) = node.left {
                stack.push((left, low, Some(key)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(key), high));
            }
        }
        true
    }

    /// Direct children of the node with `key`, left before right.
    pub fn children(&self, key: R::Key) -> Vec<&R> {
        let Some(id) = self.locate(key) else {
            return Vec::new();
        };
        let node = &self.nodes[id.0];
        [node.left, node.right]
            .into_iter()
            .flatten()
            .map(|child| &self.nodes[child.0].record)
            .collect()
    }

    /// Number of descendants below the node with `key`, excluding the node.
    ///
    /// 0 for a leaf or a missing key.
    pub fn subtree_size(&self, key: R::Key) -> usize {
        let Some(id) = self.locate(key) else {
            return 0;
        };

        let mut count = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            count += 1;
            let node = &self.nodes[id.0];
            stack.extend(node.left);
            stack.extend(node.right);
        }
        count - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::User;

    fn quiet_literal() -> IndexConfig {
        IndexConfig {
            presort_by_chronology: false,
            log_builds: false,
        }
    }

    fn users(ids: &[i64]) -> Vec<User> {
        ids.iter()
            .map(|&id| User::new(id, format!("user{}", id), 50_000.0 + id as f64 * 1_000.0))
            .collect()
    }

    fn sample() -> OrderedIndex<User> {
        OrderedIndex::build_with(users(&[5, 3, 8, 1, 4, 7, 9]), quiet_literal())
    }

    #[test]
    fn test_literal_shape() {
        let index = sample();
        assert_eq!(index.root().map(|u| u.id), Some(5));

        let left: Vec<i64> = index.children(5).iter().map(|u| u.id).collect();
        assert_eq!(left, vec![3, 8]);
        let under_3: Vec<i64> = index.children(3).iter().map(|u| u.id).collect();
        assert_eq!(under_3, vec![1, 4]);
        let under_8: Vec<i64> = index.children(8).iter().map(|u| u.id).collect();
        assert_eq!(under_8, vec![7, 9]);
        assert_eq!(index.depth(), 2);
    }

    #[test]
    fn test_find() {
        let index = sample();
        for id in [1, 3, 4, 5, 7, 8, 9] {
            assert_eq!(index.find(id).map(|u| u.id), Some(id));
        }
        assert!(index.find(2).is_none());
        assert!(index.find(10).is_none());
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut index = sample();
        let before = index.len();
        assert!(!index.insert(User::new(4, "impostor", 1.0)));
        assert_eq!(index.len(), before);
        assert_eq!(index.find(4).unwrap().username, "user4");
    }

    #[test]
    fn test_empty_index() {
        let index: OrderedIndex<User> = OrderedIndex::build_with(Vec::new(), quiet_literal());
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.depth(), 0);
        assert!(index.validate());
        assert!(index.find(1).is_none());
        assert!(index.children(1).is_empty());
        assert_eq!(index.subtree_size(1), 0);
    }

    #[test]
    fn test_single_node_depth_zero() {
        let index = OrderedIndex::build_with(users(&[42]), quiet_literal());
        assert_eq!(index.depth(), 0);
    }

    #[test]
    fn test_chain_depth() {
        let ids: Vec<i64> = (1..=50).collect();
        let index = OrderedIndex::build_with(users(&ids), quiet_literal());
        assert_eq!(index.depth(), 49);
        assert!(index.validate());
    }

    #[test]
    fn test_subtree_size() {
        let index = sample();
        assert_eq!(index.subtree_size(5), 6);
        assert_eq!(index.subtree_size(3), 2);
        assert_eq!(index.subtree_size(1), 0);
        assert_eq!(index.subtree_size(99), 0);
    }

    #[test]
    fn test_range_query_on_salary() {
        let index = sample();
        let hits = index.range_query(
            &FieldValue::from_int(54_000),
            &FieldValue::from_int(57_000),
            "salary",
        );
        let mut ids: Vec<i64> = hits.iter().map(|u| u.id).collect();
        ids.sort();
        assert_eq!(ids, vec![4, 5, 7]);
    }

    #[test]
    fn test_range_query_integer_bounds_are_exact_on_large_floats() {
        let two_53: i64 = 1 << 53;
        let index = OrderedIndex::build_with(
            vec![User::new(1, "big", two_53 as f64)],
            quiet_literal(),
        );

        let above = FieldValue::from_int(two_53 + 1);
        assert!(index.range_query(&above, &above, "salary").is_empty());

        let exact = FieldValue::from_int(two_53);
        assert_eq!(index.range_query(&exact, &exact, "salary").len(), 1);
    }

    #[test]
    fn test_range_query_inverted_bounds_is_empty() {
        let index = sample();
        let hits = index.range_query(&FieldValue::from_int(9), &FieldValue::from_int(1), "id");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_range_query_missing_field() {
        let index = sample();
        let hits = index.range_query(
            &FieldValue::from_text("a"),
            &FieldValue::from_text("z"),
            "department",
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_validate_detects_spliced_node() {
        let mut index = sample();
        assert!(index.validate());

        // 4 inherits (3, 5); its right child 6 is locally fine but above 5.
        let four = index.locate(4).unwrap();
        let id = index.push(User::new(6, "rogue", 1.0));
        index.nodes[four.0].right = Some(id);

        assert!(!index.validate());
    }

    #[test]
    fn test_validate_detects_equal_key() {
        let mut index = sample();
        let seven = index.locate(7).unwrap();
        let id = index.push(User::new(8, "dup", 1.0));
        index.nodes[seven.0].right = Some(id);

        assert!(!index.validate());
    }
}
