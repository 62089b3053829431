//! Least-recently-used cache
//!
//! Entries live in an arena of slots linked into a doubly linked recency
//! list (`head` = most recent, `tail` = least recent). The key table maps
//! each key to its slot and owns nothing. Freed slots are recycled, so a
//! cache at capacity stops allocating.
//!
//! Every touch, insert, delete and eviction is O(1) link rewiring.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::observability::{log_event_with_fields, Event};

use super::config::CacheConfig;
use super::errors::CacheResult;
use super::stats::CacheStats;

type SlotId = usize;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Bounded key-value store with least-recently-used eviction.
///
/// Not internally synchronized; share behind a lock if needed.
#[derive(Debug)]
pub struct EvictionCache<K, V> {
    table: HashMap<K, SlotId>,
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    config: CacheConfig,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K, V> EvictionCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a cache holding at most `capacity` entries.
    ///
    /// Fails with `ROSTER_CACHE_INVALID_CAPACITY` when `capacity` is 0.
    pub fn new(capacity: usize) -> CacheResult<Self> {
        Self::with_config(CacheConfig::with_capacity(capacity))
    }

    /// Create a cache from a full configuration.
    ///
    /// A rejected configuration is always logged to stderr as FATAL.
    /// Creation and clear are logged to stdout only when
    /// `config.log_lifecycle` is set.
    pub fn with_config(config: CacheConfig) -> CacheResult<Self> {
        if let Err(err) = config.validate() {
            log_event_with_fields(
                Event::CacheConfigRejected,
                &[
                    ("code", err.code().to_string()),
                    ("capacity", config.capacity.to_string()),
                ],
            );
            return Err(err);
        }

        if config.log_lifecycle {
            log_event_with_fields(
                Event::CacheCreated,
                &[("capacity", config.capacity.to_string())],
            );
        }

        let reserve = config.capacity.min(1024);
        Ok(Self {
            table: HashMap::with_capacity(reserve),
            slots: Vec::with_capacity(reserve),
            free: Vec::new(),
            head: None,
            tail: None,
            config,
            hits: 0,
            misses: 0,
            evictions: 0,
        })
    }

    /// Look up a value and mark it most recently used.
    ///
    /// Counts a hit or a miss. A miss allocates nothing.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.table.get(key).copied() {
            Some(slot) => {
                self.hits += 1;
                self.promote(slot);
                self.entry(slot).map(|e| &e.value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up a value without touching recency or stats.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.table.get(key).copied()?;
        self.entry(slot).map(|e| &e.value)
    }

    /// Whether `key` is cached. Does not touch recency or stats.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Insert or update a value and mark it most recently used.
    ///
    /// When a new key arrives at capacity, the least recently used entry is
    /// evicted first and returned.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.table.get(&key).copied() {
            if let Some(entry) = self.entry_mut(slot) {
                entry.value = value;
            }
            self.promote(slot);
            return None;
        }

        let evicted = if self.table.len() >= self.config.capacity {
            self.evict_tail()
        } else {
            None
        };

        let slot = self.allocate(Entry {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.attach_front(slot);
        self.table.insert(key, slot);

        evicted
    }

    /// Remove an entry, returning its value.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.table.remove(key)?;
        self.release(slot).map(|e| e.value)
    }

    /// Drop every entry and reset stats. Capacity is unchanged.
    pub fn clear(&mut self) {
        let dropped = self.table.len();

        self.table.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;

        if self.config.log_lifecycle {
            log_event_with_fields(Event::CacheCleared, &[("entries", dropped.to_string())]);
        }
    }

    /// Hit/miss counters and hit rate
    pub fn get_stats(&self) -> CacheStats {
        CacheStats::from_counts(self.hits, self.misses, self.evictions)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Configured maximum number of entries
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Keys from most to least recently used
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> + '_ {
        std::iter::successors(self.head, move |&slot| self.entry(slot).and_then(|e| e.next))
            .filter_map(move |slot| self.entry(slot).map(|e| &e.key))
    }

    // ---- recency list ----

    fn entry(&self, slot: SlotId) -> Option<&Entry<K, V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, slot: SlotId) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    fn allocate(&mut self, entry: Entry<K, V>) -> SlotId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    /// Unlink a slot and return its entry to the caller. The slot is recycled.
    fn release(&mut self, slot: SlotId) -> Option<Entry<K, V>> {
        self.detach(slot);
        let entry = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        Some(entry)
    }

    fn detach(&mut self, slot: SlotId) {
        let Some((prev, next)) = self.entry(slot).map(|e| (e.prev, e.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(entry) = self.entry_mut(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(entry) = self.entry_mut(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(entry) = self.entry_mut(slot) {
            entry.prev = None;
            entry.next = None;
        }
    }

    fn attach_front(&mut self, slot: SlotId) {
        let old_head = self.head;
        if let Some(entry) = self.entry_mut(slot) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(entry) = self.entry_mut(h) {
                    entry.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    fn promote(&mut self, slot: SlotId) {
        if self.head == Some(slot) {
            return;
        }
        self.detach(slot);
        self.attach_front(slot);
    }

    fn evict_tail(&mut self) -> Option<(K, V)> {
        let slot = self.tail?;
        let entry = self.release(slot)?;
        self.table.remove(&entry.key);
        self.evictions += 1;
        Some((entry.key, entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheError;

    fn cache(capacity: usize) -> EvictionCache<&'static str, i32> {
        EvictionCache::with_config(CacheConfig::with_capacity(capacity).quiet()).unwrap()
    }

    fn recency(cache: &EvictionCache<&'static str, i32>) -> Vec<&'static str> {
        cache.keys_by_recency().copied().collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = EvictionCache::<u32, u32>::new(0).unwrap_err();
        assert_eq!(err, CacheError::InvalidCapacity { capacity: 0 });
    }

    #[test]
    fn test_set_and_get() {
        let mut c = cache(2);
        assert_eq!(c.set("a", 1), None);
        assert_eq!(c.get("a"), Some(&1));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_eviction_order() {
        let mut c = cache(2);
        c.set("a", 1);
        c.set("b", 2);
        assert_eq!(c.set("c", 3), Some(("a", 1)));

        assert!(!c.contains("a"));
        assert!(c.contains("b"));
        assert!(c.contains("c"));
        assert_eq!(c.len(), 2);
        assert_eq!(c.get_stats().evictions, 1);
    }

    #[test]
    fn test_get_promotes() {
        let mut c = cache(2);
        c.set("a", 1);
        c.set("b", 2);
        c.get("a");
        assert_eq!(c.set("c", 3), Some(("b", 2)));
        assert_eq!(recency(&c), vec!["c", "a"]);
    }

    #[test]
    fn test_update_existing_promotes_without_growth() {
        let mut c = cache(3);
        c.set("a", 1);
        c.set("b", 2);
        c.set("c", 3);
        assert_eq!(c.set("a", 10), None);

        assert_eq!(c.len(), 3);
        assert_eq!(c.peek("a"), Some(&10));
        assert_eq!(recency(&c), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_peek_does_not_promote_or_count() {
        let mut c = cache(2);
        c.set("a", 1);
        c.set("b", 2);
        assert_eq!(c.peek("a"), Some(&1));
        assert_eq!(c.get_stats().accesses(), 0);
        assert_eq!(c.set("c", 3), Some(("a", 1)));
    }

    #[test]
    fn test_delete_frees_room() {
        let mut c = cache(2);
        c.set("a", 1);
        c.set("b", 2);
        assert_eq!(c.delete("a"), Some(1));
        assert_eq!(c.delete("a"), None);

        assert_eq!(c.set("c", 3), None);
        assert_eq!(recency(&c), vec!["c", "b"]);
        assert_eq!(c.get_stats().evictions, 0);
    }

    #[test]
    fn test_delete_middle_keeps_links() {
        let mut c = cache(3);
        c.set("a", 1);
        c.set("b", 2);
        c.set("c", 3);
        c.delete("b");
        assert_eq!(recency(&c), vec!["c", "a"]);

        c.set("d", 4);
        c.set("e", 5);
        assert_eq!(recency(&c), vec!["e", "d", "c"]);
    }

    #[test]
    fn test_capacity_one() {
        let mut c = cache(1);
        c.set("a", 1);
        assert_eq!(c.set("b", 2), Some(("a", 1)));
        assert_eq!(c.get("b"), Some(&2));
        assert_eq!(c.get("a"), None);
    }

    #[test]
    fn test_stats() {
        let mut c = cache(2);
        assert_eq!(c.get_stats().hit_rate, 0.0);

        c.set("a", 1);
        c.get("a");
        c.get("a");
        c.get("a");
        c.get("missing");

        let stats = c.get_stats();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate, 0.75);
    }

    #[test]
    fn test_clear_resets_everything_but_capacity() {
        let mut c = cache(2);
        c.set("a", 1);
        c.get("a");
        c.get("zzz");
        c.clear();

        assert!(c.is_empty());
        assert_eq!(c.capacity(), 2);
        assert_eq!(c.get_stats(), CacheStats::default());
        assert_eq!(recency(&c), Vec::<&str>::new());

        c.set("x", 1);
        c.set("y", 2);
        assert_eq!(c.set("z", 3), Some(("x", 1)));
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut c = cache(4);
        for i in 0..100 {
            c.set(if i % 2 == 0 { "even" } else { "odd" }, i);
            c.delete("even");
        }
        assert!(c.slots.len() <= 4);
    }

    #[test]
    fn test_string_keys_borrow_as_str() {
        let mut c: EvictionCache<String, u32> =
            EvictionCache::with_config(CacheConfig::with_capacity(2).quiet()).unwrap();
        c.set("alice".to_string(), 1);
        assert_eq!(c.get("alice"), Some(&1));
        assert_eq!(c.delete("alice"), Some(1));
    }
}
