//! Ordered and level-order traversal
//!
//! Both walks borrow the index immutably for their whole duration, so the
//! structure cannot change underneath them.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::record::IndexedRecord;

use super::tree::{NodeId, OrderedIndex};

/// Ascending in-order walk driven by an explicit stack.
///
/// Obtained from [`OrderedIndex::in_order`]. Each call to `in_order` starts
/// a fresh walk.
pub struct InOrder<'a, R: IndexedRecord> {
    index: &'a OrderedIndex<R>,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a, R: IndexedRecord> Iterator for InOrder<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<&'a R> {
        // Descend as far left as possible, then visit and step right.
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.index.nodes[id.0].left;
        }

        let id = self.stack.pop()?;
        let node = &self.index.nodes[id.0];
        self.current = node.right;
        self.remaining -= 1;
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: IndexedRecord> ExactSizeIterator for InOrder<'_, R> {}

impl<R: IndexedRecord> FusedIterator for InOrder<'_, R> {}

impl<R: IndexedRecord> OrderedIndex<R> {
    /// Records in ascending key order
    pub fn in_order(&self) -> InOrder<'_, R> {
        InOrder {
            index: self,
            stack: Vec::new(),
            current: self.root,
            remaining: self.nodes.len(),
        }
    }

    /// Records grouped by breadth-first level, root at level 0.
    ///
    /// Each level lists records left to right.
    pub fn level_groups(&self) -> Vec<Vec<&R>> {
        let mut levels: Vec<Vec<&R>> = Vec::new();
        let Some(root) = self.root else {
            return levels;
        };

        let mut queue = VecDeque::from([(root, 0usize)]);
        while let Some((id, level)) = queue.pop_front() {
            if levels.len() == level {
                levels.push(Vec::new());
            }
            let node = &self.nodes[id.0];
            levels[level].push(&node.record);

            if let Some(left) = node.left {
                queue.push_back((left, level + 1));
            }
            if let Some(right) = node.right {
                queue.push_back((right, level + 1));
            }
        }
        levels
    }
}

impl<'a, R: IndexedRecord> IntoIterator for &'a OrderedIndex<R> {
    type Item = &'a R;
    type IntoIter = InOrder<'a, R>;

    fn into_iter(self) -> InOrder<'a, R> {
        self.in_order()
    }
}
