//! Pluggable equality for set membership, joins and grouping.
//!
//! A `Comparer<T>` pairs an equality test with a hash that must agree with it:
//! `equals(a, b)` implies `hash_of(a) == hash_of(b)`. Nothing checks this at
//! runtime. A comparer that violates it makes distinct, set algebra and joins
//! produce unspecified (but memory-safe) results.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use hashbrown::hash_table::{Entry, HashTable};

pub trait Comparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;

    fn hash_of(&self, value: &T) -> u64;
}

impl<T: ?Sized, C: Comparer<T> + ?Sized> Comparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }

    fn hash_of(&self, value: &T) -> u64 {
        (**self).hash_of(value)
    }
}

/// Hash any `Hash` value with a fixed-key hasher, so equal values hash equally
/// across every structure built during one process.
pub fn hash_value<H: Hash + ?Sized>(value: &H) -> u64 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    h.finish()
}

/// Native `Eq` + `Hash` equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultComparer;

impl<T: Eq + Hash + ?Sized> Comparer<T> for DefaultComparer {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash_of(&self, value: &T) -> u64 {
        hash_value(value)
    }
}

/// Compares elements by a projected key, e.g. `KeyComparer::new(|p: &Product| p.id)`.
#[derive(Clone, Copy)]
pub struct KeyComparer<F> {
    key: F,
}

impl<F> KeyComparer<F> {
    pub fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T, K, F> Comparer<T> for KeyComparer<F>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash_of(&self, value: &T) -> u64 {
        hash_value(&(self.key)(value))
    }
}

/// Seen-set keyed by a comparer. The table is searched with `hash_of` directly
/// and collisions are resolved with `equals`. Average O(1) insert/lookup.
pub struct ComparerSet<T, C> {
    comparer: C,
    table: HashTable<T>,
}

impl<T, C: Comparer<T>> ComparerSet<T, C> {
    pub fn new(comparer: C) -> Self {
        Self::with_capacity(comparer, 0)
    }

    pub fn with_capacity(comparer: C, capacity: usize) -> Self {
        Self {
            comparer,
            table: HashTable::with_capacity(capacity),
        }
    }

    /// Insert `value` unless an equal element is present. Returns `true` if
    /// the value was added.
    pub fn insert(&mut self, value: T) -> bool {
        let comparer = &self.comparer;
        let hash = comparer.hash_of(&value);
        match self.table.entry(
            hash,
            |v| comparer.equals(v, &value),
            |v| comparer.hash_of(v),
        ) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.table
            .find(self.comparer.hash_of(value), |v| self.comparer.equals(v, value))
            .is_some()
    }

    /// Remove and return the stored element equal to `value`, if any.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let comparer = &self.comparer;
        let hash = comparer.hash_of(value);
        match self.table.find_entry(hash, |v| comparer.equals(v, value)) {
            Ok(entry) => Some(entry.remove().0),
            Err(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }
}

impl<T, C: Comparer<T>> Extend<T> for ComparerSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}
