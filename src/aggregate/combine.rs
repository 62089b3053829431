//! Merging and intersecting maps

use std::collections::HashMap;
use std::hash::Hash;

/// Union of two maps.
///
/// Keys found in only one map keep their value. For keys in both,
/// `resolve(value_a, value_b, &key)` is called exactly once.
pub fn merge<K, V, F>(a: HashMap<K, V>, b: HashMap<K, V>, mut resolve: F) -> HashMap<K, V>
where
    K: Eq + Hash,
    F: FnMut(V, V, &K) -> V,
{
    let mut merged = a;
    merged.reserve(b.len());
    for (key, value_b) in b {
        let value = match merged.remove(&key) {
            Some(value_a) => resolve(value_a, value_b, &key),
            None => value_b,
        };
        merged.insert(key, value);
    }
    merged
}

/// Keys present in both maps, keeping the value from `a`.
pub fn intersect<K, V>(a: HashMap<K, V>, b: HashMap<K, V>) -> HashMap<K, V>
where
    K: Eq + Hash,
{
    intersect_with(a, b, |value_a, _, _| value_a)
}

/// Keys present in both maps, values combined by `resolve(value_a, value_b, &key)`.
pub fn intersect_with<K, V, F>(a: HashMap<K, V>, mut b: HashMap<K, V>, mut resolve: F) -> HashMap<K, V>
where
    K: Eq + Hash,
    F: FnMut(V, V, &K) -> V,
{
    let mut common = HashMap::with_capacity(a.len().min(b.len()));
    for (key, value_a) in a {
        if let Some(value_b) = b.remove(&key) {
            let value = resolve(value_a, value_b, &key);
            common.insert(key, value);
        }
    }
    common
}
