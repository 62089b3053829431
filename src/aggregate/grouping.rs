//! Grouping, counting and inversion

use std::collections::HashMap;
use std::hash::Hash;

/// Partition items by a derived key.
///
/// Stable: each group keeps the input order of its items. Groups are
/// created the first time their key is seen.
pub fn group_by<T, K, I, F>(items: I, mut key_fn: F) -> HashMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

/// Count items per derived key.
pub fn count_by<T, K, I, F>(items: I, mut key_fn: F) -> HashMap<K, usize>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut counts: HashMap<K, usize> = HashMap::new();
    for item in items {
        *counts.entry(key_fn(&item)).or_insert(0) += 1;
    }
    counts
}

/// Turn `key -> value` pairs into `value -> [keys]`.
///
/// Keys sharing a value are listed in the order the pairs were yielded.
/// Pass an ordered collection (a `Vec`, a `BTreeMap`) when that order matters.
pub fn invert<K, V, I>(pairs: I) -> HashMap<V, Vec<K>>
where
    I: IntoIterator<Item = (K, V)>,
    V: Eq + Hash,
{
    let mut inverted: HashMap<V, Vec<K>> = HashMap::new();
    for (key, value) in pairs {
        inverted.entry(value).or_default().push(key);
    }
    inverted
}
