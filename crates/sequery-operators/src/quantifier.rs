//! Quantifiers and sequence comparison: `all`, `any`, `contains`,
//! `sequence_equal`. All short-circuit.

use std::hash::Hash;

use sequery_core::comparer::{Comparer, DefaultComparer};

use crate::pipeline::Pipeline;

impl<I: Iterator> Pipeline<I> {
    /// True iff every element satisfies `pred`; true on an empty sequence.
    pub fn all<P>(self, mut pred: P) -> bool
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.into_iter().all(|x| pred(&x))
    }

    /// True iff some element satisfies `pred`; false on an empty sequence.
    pub fn any<P>(self, mut pred: P) -> bool
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.into_iter().any(|x| pred(&x))
    }

    pub fn contains(self, value: &I::Item) -> bool
    where
        I::Item: Eq + Hash,
    {
        self.contains_with(value, DefaultComparer)
    }

    pub fn contains_with<C>(self, value: &I::Item, comparer: C) -> bool
    where
        C: Comparer<I::Item>,
    {
        self.into_iter().any(|x| comparer.equals(&x, value))
    }

    pub fn sequence_equal<J>(self, other: J) -> bool
    where
        J: IntoIterator<Item = I::Item>,
        I::Item: Eq + Hash,
    {
        self.sequence_equal_with(other, DefaultComparer)
    }

    /// Same length and pairwise equal in order. When both sides know their
    /// exact length and the lengths differ, no element is compared.
    ///
    /// Exact lengths come from `size_hint`, so both inputs must report an
    /// honest hint: an iterator claiming `(n, Some(n))` while yielding a
    /// different count can make this return `false` for equal sequences.
    /// Std collections and every pipeline stage satisfy this; like comparer
    /// consistency, it is a caller precondition that is not checked.
    pub fn sequence_equal_with<J, C>(self, other: J, comparer: C) -> bool
    where
        J: IntoIterator<Item = I::Item>,
        C: Comparer<I::Item>,
    {
        let mut a = self.into_iter();
        let mut b = other.into_iter();
        if let (Some(a_len), Some(b_len)) = (exact_len(&a), exact_len(&b)) {
            if a_len != b_len {
                return false;
            }
        }
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if !comparer.equals(&x, &y) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

fn exact_len<I: Iterator>(iter: &I) -> Option<usize> {
    match iter.size_hint() {
        (lo, Some(hi)) if lo == hi => Some(lo),
        _ => None,
    }
}
