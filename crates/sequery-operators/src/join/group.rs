//! Group-join and the left-outer-join built on it.
//!
//! `group_join` emits exactly one row per left element, pairing it with a
//! `Grouping` of every matching right row (possibly empty). The outer join
//! does not have its own algorithm: it flattens the group-join output through
//! `default_if_empty`, so an empty group becomes one row with no right side.

use std::hash::Hash;
use std::sync::Arc;

use sequery_core::comparer::{Comparer, DefaultComparer};
use sequery_core::config::EngineConfig;
use sequery_core::grouping::Grouping;

use super::index::{build_once, KeyIndex, Pending};
use crate::pipeline::{from_shared, Pipeline};
use crate::plan::Evaluation;
use crate::traits::Operator;

impl<I: Iterator> Pipeline<I> {
    pub fn group_join<J, K, KL, KR, F, O>(
        self,
        right: J,
        left_key: KL,
        right_key: KR,
        combine: F,
    ) -> Pipeline<GroupJoin<I, J, K, KL, KR, F, DefaultComparer>>
    where
        J: IntoIterator,
        J::Item: Clone,
        K: Eq + Hash,
        KL: FnMut(&I::Item) -> K,
        KR: FnMut(&J::Item) -> K,
        F: FnMut(I::Item, Grouping<K, J::Item>) -> O,
    {
        self.group_join_with(right, left_key, right_key, combine, DefaultComparer)
    }

    pub fn group_join_with<J, K, KL, KR, F, O, C>(
        self,
        right: J,
        left_key: KL,
        right_key: KR,
        combine: F,
        comparer: C,
    ) -> Pipeline<GroupJoin<I, J, K, KL, KR, F, C>>
    where
        J: IntoIterator,
        J::Item: Clone,
        KL: FnMut(&I::Item) -> K,
        KR: FnMut(&J::Item) -> K,
        F: FnMut(I::Item, Grouping<K, J::Item>) -> O,
        C: Comparer<K>,
    {
        self.stage(|left, config| GroupJoin {
            left,
            left_key,
            combine,
            pending: Some((right, right_key, comparer)),
            index: None,
            config: Arc::clone(config),
        })
    }

    /// Left outer join: one row per match, or a single row with `None` on the
    /// right for a left element without matches.
    pub fn left_outer_join<J, K, KL, KR, F, O>(
        self,
        right: J,
        left_key: KL,
        right_key: KR,
        mut combine: F,
    ) -> Pipeline<LeftOuterJoin<impl Iterator<Item = O>>>
    where
        J: IntoIterator,
        J::Item: Clone,
        K: Eq + Hash,
        KL: FnMut(&I::Item) -> K,
        KR: FnMut(&J::Item) -> K,
        F: FnMut(&I::Item, Option<&J::Item>) -> O,
    {
        let config = Arc::clone(&self.config);
        self.group_join(right, left_key, right_key, |left, group| (left, group))
            .select_many(move |(left, group): (I::Item, Grouping<K, J::Item>)| {
                from_shared(group.into_members(), Arc::clone(&config))
                    .default_if_empty()
                    .select(|right: Option<J::Item>| combine(&left, right.as_ref()))
                    .to_vec()
            })
            .stage(|inner, _| LeftOuterJoin { inner })
    }
}

pub struct GroupJoin<I, J, K, KL, KR, F, C>
where
    I: Iterator,
    J: IntoIterator,
{
    left: I,
    left_key: KL,
    combine: F,
    pending: Pending<J, KR, C>,
    index: Option<KeyIndex<K, J::Item, C>>,
    config: Arc<EngineConfig>,
}

impl<I, J, K, KL, KR, F, C, O> Iterator for GroupJoin<I, J, K, KL, KR, F, C>
where
    I: Iterator,
    J: IntoIterator,
    J::Item: Clone,
    KL: FnMut(&I::Item) -> K,
    KR: FnMut(&J::Item) -> K,
    F: FnMut(I::Item, Grouping<K, J::Item>) -> O,
    C: Comparer<K>,
{
    type Item = O;

    fn next(&mut self) -> Option<O> {
        let index = build_once(
            &mut self.index,
            &mut self.pending,
            &self.config,
            "group_join",
        )?;
        let left = self.left.next()?;
        let key = (self.left_key)(&left);
        let members = index.get(&key).to_vec();
        Some((self.combine)(left, Grouping::new(key, members)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.left.size_hint()
    }
}

impl<I, J, K, KL, KR, F, C> Operator for GroupJoin<I, J, K, KL, KR, F, C>
where
    I: Iterator,
    J: IntoIterator,
{
    fn name(&self) -> &'static str {
        "group_join"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Buffered
    }
}

pub struct LeftOuterJoin<S> {
    inner: S,
}

impl<S: Iterator> Iterator for LeftOuterJoin<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S> Operator for LeftOuterJoin<S> {
    fn name(&self) -> &'static str {
        "left_outer_join"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Buffered
    }
}
