//! Hash-partitioned key index used by every join stage and by per-key totals.
//!
//! Keys are bucketed by `Comparer::hash_of` and resolved with
//! `Comparer::equals`, so composite keys (tuples) and custom key comparers work
//! the same way. Each distinct key owns one group; rows are appended to their
//! group in insertion order.

use hashbrown::HashTable;
use sequery_core::comparer::Comparer;
use sequery_core::config::EngineConfig;

use crate::metrics;
use crate::pipeline::capacity_for;

pub struct KeyIndex<K, V, C> {
    comparer: C,
    /// Group ids, looked up by `hash_of(keys[id])`.
    slots: HashTable<usize>,
    keys: Vec<K>,
    groups: Vec<Vec<V>>,
    rows: usize,
}

impl<K, V, C: Comparer<K>> KeyIndex<K, V, C> {
    pub fn with_capacity(comparer: C, capacity: usize) -> Self {
        Self {
            comparer,
            slots: HashTable::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            groups: Vec::with_capacity(capacity),
            rows: 0,
        }
    }

    /// Index `rows` by `key`, preserving row order within each key.
    pub fn build<I, F>(rows: I, mut key: F, comparer: C, capacity: usize) -> Self
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> K,
    {
        let mut index = Self::with_capacity(comparer, capacity);
        for row in rows {
            let k = key(&row);
            index.insert(k, row);
        }
        index
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.rows += 1;
        let hash = self.comparer.hash_of(&key);
        match self.lookup_hashed(hash, &key) {
            Some(id) => self.groups[id].push(value),
            None => {
                let id = self.keys.len();
                let (comparer, keys) = (&self.comparer, &self.keys);
                self.slots
                    .insert_unique(hash, id, |&g| comparer.hash_of(&keys[g]));
                self.keys.push(key);
                self.groups.push(vec![value]);
            }
        }
    }

    /// Group id for `key`, if any row carried an equal key.
    pub fn lookup(&self, key: &K) -> Option<usize> {
        self.lookup_hashed(self.comparer.hash_of(key), key)
    }

    fn lookup_hashed(&self, hash: u64, key: &K) -> Option<usize> {
        self.slots
            .find(hash, |&id| self.comparer.equals(&self.keys[id], key))
            .copied()
    }

    /// Rows of group `id`. Panics on an id this index did not hand out.
    pub(crate) fn group(&self, id: usize) -> &[V] {
        &self.groups[id]
    }

    /// Rows whose key equals `key`; empty when there are none.
    pub fn get(&self, key: &K) -> &[V] {
        match self.lookup(key) {
            Some(id) => self.group(id),
            None => &[],
        }
    }

    /// Number of indexed rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of distinct keys.
    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }
}

/// Right-hand input of a join stage that has not been indexed yet.
pub(crate) type Pending<J, KR, C> = Option<(J, KR, C)>;

/// Index the pending right side on the first call; later calls return the
/// index built the first time.
pub(crate) fn build_once<'a, J, K, KR, C>(
    slot: &'a mut Option<KeyIndex<K, J::Item, C>>,
    pending: &mut Pending<J, KR, C>,
    config: &EngineConfig,
    op: &'static str,
) -> Option<&'a KeyIndex<K, J::Item, C>>
where
    J: IntoIterator,
    KR: FnMut(&J::Item) -> K,
    C: Comparer<K>,
{
    if let Some((rows, key, comparer)) = pending.take() {
        let rows = rows.into_iter();
        let capacity = capacity_for(config, rows.size_hint());
        let index = KeyIndex::build(rows, key, comparer, capacity);
        metrics::emit_materialized(config, op, index.rows());
        *slot = Some(index);
    }
    slot.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequery_core::comparer::{DefaultComparer, KeyComparer};

    #[test]
    fn groups_keep_insertion_order() {
        let rows = vec![(2, "a"), (1, "b"), (2, "c"), (3, "d"), (2, "e")];
        let index = KeyIndex::build(rows, |r| r.0, DefaultComparer, 0);
        assert_eq!(index.rows(), 5);
        assert_eq!(index.num_keys(), 3);
        assert_eq!(index.get(&2), &[(2, "a"), (2, "c"), (2, "e")]);
        assert!(index.get(&9).is_empty());
    }

    #[test]
    fn composite_keys_match_on_every_component() {
        let rows = vec![(1, 6, "x"), (1, 5, "y"), (1, 6, "z")];
        let index = KeyIndex::build(rows, |r| (r.0, r.1), DefaultComparer, 0);
        assert_eq!(index.get(&(1, 6)).len(), 2);
        assert_eq!(index.get(&(1, 5)).len(), 1);
        assert!(index.lookup(&(6, 1)).is_none());
    }

    #[test]
    fn custom_key_comparer() {
        let by_lowercase = KeyComparer::new(|s: &String| s.to_lowercase());
        let rows = vec!["Red".to_string(), "red".to_string(), "Blue".to_string()];
        let index = KeyIndex::build(rows, |s| s.clone(), by_lowercase, 0);
        assert_eq!(index.num_keys(), 2);
        assert_eq!(index.get(&"RED".to_string()).len(), 2);
    }
}
