//! Key + members pairs. A grouping with no members is still a grouping; it is
//! how group-join reports "no match".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping<K, T> {
    key: K,
    members: Vec<T>,
}

impl<K, T> Grouping<K, T> {
    pub fn new(key: K, members: Vec<T>) -> Self {
        Self { key, members }
    }

    pub fn empty(key: K) -> Self {
        Self::new(key, Vec::new())
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Members in the order they appeared in the grouped input.
    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_parts(self) -> (K, Vec<T>) {
        (self.key, self.members)
    }

    pub fn into_members(self) -> Vec<T> {
        self.members
    }
}

impl<K, T> IntoIterator for Grouping<K, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, K, T> IntoIterator for &'a Grouping<K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
