//! Keyed transformation pipeline

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

type Filter<'f, K, V> = Box<dyn Fn(&K, &V) -> bool + 'f>;

/// Extract a key and a value from each item, keep the pairs every filter
/// accepts, and collect them into a map.
///
/// Later items overwrite earlier ones with the same key.
pub struct Pipeline<'f, K, V> {
    filters: Vec<Filter<'f, K, V>>,
}

impl<K, V> Default for Pipeline<'_, K, V> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<K, V> fmt::Debug for Pipeline<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl<'f, K, V> Pipeline<'f, K, V>
where
    K: Eq + Hash,
{
    /// Pipeline with no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter. Filters run in the order they were added and stop at
    /// the first rejection.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&K, &V) -> bool + 'f,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Number of filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run the pipeline over `items`
    pub fn run<T, I, KF, VF>(&self, items: I, mut key_fn: KF, mut value_fn: VF) -> HashMap<K, V>
    where
        I: IntoIterator<Item = T>,
        KF: FnMut(&T) -> K,
        VF: FnMut(&T) -> V,
    {
        let mut output = HashMap::new();
        for item in items {
            let key = key_fn(&item);
            let value = value_fn(&item);
            if self.filters.iter().all(|accept| accept(&key, &value)) {
                output.insert(key, value);
            }
        }
        output
    }
}
