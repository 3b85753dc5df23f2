//! Reductions (`sum`, `sum_by`, `fold`) and per-key totals.
//!
//! Per-key totals attach to each primary element the sum of a numeric field
//! over the related rows sharing its key. Both forms index the related rows
//! once (O(n + m)) instead of re-filtering them per primary element.

use std::hash::Hash;
use std::iter::Sum;

use sequery_core::comparer::DefaultComparer;
use sequery_core::config::MAX_PREALLOC;
use sequery_core::grouping::Grouping;

use crate::join::KeyIndex;
use crate::pipeline::Pipeline;
use crate::traits::Operator;

impl<I: Iterator> Pipeline<I> {
    pub fn sum<S>(self) -> S
    where
        S: Sum<I::Item>,
    {
        self.into_iter().sum()
    }

    pub fn sum_by<S, V, F>(self, f: F) -> S
    where
        F: FnMut(I::Item) -> V,
        S: Sum<V>,
    {
        self.into_iter().map(f).sum()
    }

    pub fn fold<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, I::Item) -> B,
    {
        self.into_iter().fold(init, f)
    }

    /// Pair every element with the sum of `value` over the `related` rows
    /// whose `related_key` equals its `key`; zero-sum (`S::sum` of nothing)
    /// when there are none. A group-join followed by a per-group sum.
    pub fn with_key_totals<R, K, V, S, KL, KR, FV>(
        self,
        related: R,
        key: KL,
        mut related_key: KR,
        mut value: FV,
    ) -> Pipeline<impl Iterator<Item = (I::Item, S)> + Operator>
    where
        R: IntoIterator,
        K: Eq + Hash + Clone,
        V: Clone,
        S: Sum<V>,
        KL: FnMut(&I::Item) -> K,
        KR: FnMut(&R::Item) -> K,
        FV: FnMut(&R::Item) -> V,
    {
        let projected = related
            .into_iter()
            .map(move |row| (related_key(&row), value(&row)));
        self.group_join(
            projected,
            key,
            |pair: &(K, V)| pair.0.clone(),
            |primary, group: Grouping<K, (K, V)>| {
                let total: S = group.into_iter().map(|(_, v)| v).sum();
                (primary, total)
            },
        )
    }
}

/// In-place per-key totals: for each primary element, `assign` it the sum of
/// `value` over the related rows whose key matches.
pub fn apply_key_totals<'a, P, PI, RI, K, V, S, KP, KR, FV, A>(
    primary: PI,
    related: RI,
    mut key: KP,
    mut related_key: KR,
    mut value: FV,
    mut assign: A,
) where
    P: 'a,
    PI: IntoIterator<Item = &'a mut P>,
    RI: IntoIterator,
    K: Eq + Hash,
    V: Clone,
    S: Sum<V>,
    KP: FnMut(&P) -> K,
    KR: FnMut(&RI::Item) -> K,
    FV: FnMut(&RI::Item) -> V,
    A: FnMut(&mut P, S),
{
    let related = related.into_iter();
    let capacity = related.size_hint().0.min(MAX_PREALLOC);
    let mut index = KeyIndex::with_capacity(DefaultComparer, capacity);
    for row in related {
        index.insert(related_key(&row), value(&row));
    }

    for p in primary {
        let total: S = index.get(&key(&*p)).iter().cloned().sum();
        assign(p, total);
    }
}
