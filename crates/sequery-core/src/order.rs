//! Ordering key composer: a lexicographic total order built from one or more
//! `(key extractor, direction)` pairs.
//!
//! Extractors must be pure. Keys are re-extracted on every comparison, so a key
//! that changes between calls leaves the order unspecified (never a panic).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

type KeyCmp<'k, T> = Box<dyn Fn(&T, &T) -> Ordering + 'k>;

/// Ordered list of sort keys. Later keys only break ties left by earlier ones.
pub struct OrderKeySpec<'k, T> {
    keys: Vec<(KeyCmp<'k, T>, Direction)>,
}

impl<'k, T> OrderKeySpec<'k, T> {
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Spec with a single primary key.
    pub fn by<K, F>(key: F, direction: Direction) -> Self
    where
        F: Fn(&T) -> K + 'k,
        K: Ord,
        T: 'k,
    {
        Self::new().then(key, direction)
    }

    /// Append a tie-breaking key.
    pub fn then<K, F>(mut self, key: F, direction: Direction) -> Self
    where
        F: Fn(&T) -> K + 'k,
        K: Ord,
        T: 'k,
    {
        let cmp: KeyCmp<'k, T> = Box::new(move |a: &T, b: &T| key(a).cmp(&key(b)));
        self.keys.push((cmp, direction));
        self
    }

    /// Lexicographic comparison over all keys. An empty spec treats every pair
    /// as equal, which a stable sort turns into "keep input order".
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for (cmp, direction) in &self.keys {
            match direction.apply(cmp(a, b)) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Stable in-place sort of `items` under this spec.
    pub fn sort(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.keys.iter().map(|(_, d)| *d)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<T> Default for OrderKeySpec<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for OrderKeySpec<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderKeySpec")
            .field("directions", &self.directions().collect::<Vec<_>>())
            .finish()
    }
}
