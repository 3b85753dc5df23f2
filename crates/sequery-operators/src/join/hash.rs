//! Inner hash equijoin.
//!
//! For each left row, in left order, emits `combine(&left, &right)` for every
//! right row with an equal key, in right order. Left rows without a match
//! produce nothing.

use std::hash::Hash;
use std::sync::Arc;

use sequery_core::comparer::{Comparer, DefaultComparer};
use sequery_core::config::EngineConfig;

use super::index::{build_once, KeyIndex, Pending};
use crate::pipeline::Pipeline;
use crate::plan::Evaluation;
use crate::traits::Operator;

impl<I: Iterator> Pipeline<I> {
    /// Inner join on `left_key(l) == right_key(r)`. Keys may be tuples for
    /// multi-field joins.
    pub fn join<J, K, KL, KR, F, O>(
        self,
        right: J,
        left_key: KL,
        right_key: KR,
        combine: F,
    ) -> Pipeline<Join<I, J, K, KL, KR, F, DefaultComparer>>
    where
        J: IntoIterator,
        K: Eq + Hash,
        KL: FnMut(&I::Item) -> K,
        KR: FnMut(&J::Item) -> K,
        F: FnMut(&I::Item, &J::Item) -> O,
    {
        self.join_with(right, left_key, right_key, combine, DefaultComparer)
    }

    /// Inner join with keys compared by `comparer`.
    pub fn join_with<J, K, KL, KR, F, O, C>(
        self,
        right: J,
        left_key: KL,
        right_key: KR,
        combine: F,
        comparer: C,
    ) -> Pipeline<Join<I, J, K, KL, KR, F, C>>
    where
        J: IntoIterator,
        KL: FnMut(&I::Item) -> K,
        KR: FnMut(&J::Item) -> K,
        F: FnMut(&I::Item, &J::Item) -> O,
        C: Comparer<K>,
    {
        self.stage(|left, config| Join {
            left,
            left_key,
            combine,
            pending: Some((right, right_key, comparer)),
            index: None,
            current: None,
            config: Arc::clone(config),
        })
    }
}

pub struct Join<I, J, K, KL, KR, F, C>
where
    I: Iterator,
    J: IntoIterator,
{
    left: I,
    left_key: KL,
    combine: F,
    pending: Pending<J, KR, C>,
    index: Option<KeyIndex<K, J::Item, C>>,
    /// Left row being expanded: (row, group id, next position in group).
    current: Option<(I::Item, usize, usize)>,
    config: Arc<EngineConfig>,
}

impl<I, J, K, KL, KR, F, C, O> Iterator for Join<I, J, K, KL, KR, F, C>
where
    I: Iterator,
    J: IntoIterator,
    KL: FnMut(&I::Item) -> K,
    KR: FnMut(&J::Item) -> K,
    F: FnMut(&I::Item, &J::Item) -> O,
    C: Comparer<K>,
{
    type Item = O;

    fn next(&mut self) -> Option<O> {
        let index = build_once(&mut self.index, &mut self.pending, &self.config, "join")?;
        loop {
            if let Some((left, group, pos)) = self.current.as_mut() {
                if let Some(right) = index.group(*group).get(*pos) {
                    *pos += 1;
                    return Some((self.combine)(&*left, right));
                }
                self.current = None;
            }
            let left = self.left.next()?;
            let key = (self.left_key)(&left);
            if let Some(group) = index.lookup(&key) {
                self.current = Some((left, group, 0));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

impl<I, J, K, KL, KR, F, C> Operator for Join<I, J, K, KL, KR, F, C>
where
    I: Iterator,
    J: IntoIterator,
{
    fn name(&self) -> &'static str {
        "join"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Buffered
    }
}
