//! Distinctness and set algebra: `distinct`, `except`, `intersect`, `union`,
//! `concat`.
//!
//! Results keep first-occurrence order of the left (then right) input. Each
//! set operator emits an element at most once, as decided by its `Comparer`.
//! The right-hand side of `except`/`intersect` is indexed on the first pull;
//! `distinct` and `union` grow their seen-set as they stream.
//!
//! Elements are `Clone` because the seen-set keeps its own copy. Pipelines
//! over borrowed data (`from(&items)`) clone only references.

use std::iter::Chain;
use std::sync::Arc;

use sequery_core::comparer::{Comparer, ComparerSet, DefaultComparer};
use sequery_core::config::EngineConfig;

use crate::metrics;
use crate::pipeline::{capacity_for, Pipeline};
use crate::plan::Evaluation;
use crate::traits::Operator;

impl<I: Iterator> Pipeline<I> {
    pub fn distinct(self) -> Pipeline<Distinct<I, DefaultComparer>>
    where
        I::Item: Clone + Eq + std::hash::Hash,
    {
        self.distinct_with(DefaultComparer)
    }

    pub fn distinct_with<C>(self, comparer: C) -> Pipeline<Distinct<I, C>>
    where
        I::Item: Clone,
        C: Comparer<I::Item>,
    {
        self.stage(|iter, config| Distinct::new(iter, comparer, config, "distinct"))
    }

    /// Elements of `self` not equal to any element of `other`, each once.
    pub fn except<J>(self, other: J) -> Pipeline<Except<I, J, DefaultComparer>>
    where
        J: IntoIterator<Item = I::Item>,
        I::Item: Clone + Eq + std::hash::Hash,
    {
        self.except_with(other, DefaultComparer)
    }

    pub fn except_with<J, C>(self, other: J, comparer: C) -> Pipeline<Except<I, J, C>>
    where
        J: IntoIterator<Item = I::Item>,
        I::Item: Clone,
        C: Comparer<I::Item>,
    {
        self.stage(|iter, config| Except {
            iter,
            other: Some(other),
            seen: ComparerSet::with_capacity(comparer, config.hash_capacity(0)),
            config: Arc::clone(config),
        })
    }

    /// Elements of `self` that have an equal counterpart in `other`, each once.
    pub fn intersect<J>(self, other: J) -> Pipeline<Intersect<I, J, DefaultComparer>>
    where
        J: IntoIterator<Item = I::Item>,
        I::Item: Eq + std::hash::Hash,
    {
        self.intersect_with(other, DefaultComparer)
    }

    pub fn intersect_with<J, C>(self, other: J, comparer: C) -> Pipeline<Intersect<I, J, C>>
    where
        J: IntoIterator<Item = I::Item>,
        C: Comparer<I::Item>,
    {
        self.stage(|iter, config| Intersect {
            iter,
            other: Some(other),
            candidates: ComparerSet::with_capacity(comparer, config.hash_capacity(0)),
            config: Arc::clone(config),
        })
    }

    /// Elements of `self` then of `other`, each once overall.
    pub fn union<J>(self, other: J) -> Pipeline<Union<I, J::IntoIter, DefaultComparer>>
    where
        J: IntoIterator<Item = I::Item>,
        I::Item: Clone + Eq + std::hash::Hash,
    {
        self.union_with(other, DefaultComparer)
    }

    pub fn union_with<J, C>(self, other: J, comparer: C) -> Pipeline<Union<I, J::IntoIter, C>>
    where
        J: IntoIterator<Item = I::Item>,
        I::Item: Clone,
        C: Comparer<I::Item>,
    {
        self.stage(|iter, config| Union {
            inner: Distinct::new(iter.chain(other), comparer, config, "union"),
        })
    }

    /// Plain append; duplicates are kept.
    pub fn concat<J>(self, other: J) -> Pipeline<Concat<I, J::IntoIter>>
    where
        J: IntoIterator<Item = I::Item>,
    {
        self.stage(|iter, _| Concat {
            first: Some(iter),
            second: other.into_iter(),
        })
    }
}

pub struct Distinct<I: Iterator, C> {
    iter: I,
    seen: ComparerSet<I::Item, C>,
    op: &'static str,
    config: Arc<EngineConfig>,
    reported: bool,
}

impl<I, C> Distinct<I, C>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
    fn new(iter: I, comparer: C, config: &Arc<EngineConfig>, op: &'static str) -> Self {
        let capacity = capacity_for(config, iter.size_hint());
        Self {
            iter,
            seen: ComparerSet::with_capacity(comparer, capacity),
            op,
            config: Arc::clone(config),
            reported: false,
        }
    }
}

impl<I, C> Iterator for Distinct<I, C>
where
    I: Iterator,
    I::Item: Clone,
    C: Comparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for x in self.iter.by_ref() {
            if self.seen.insert(x.clone()) {
                return Some(x);
            }
        }
        if !self.reported {
            self.reported = true;
            metrics::emit_materialized(&self.config, self.op, self.seen.len());
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I: Iterator, C> Operator for Distinct<I, C> {
    fn name(&self) -> &'static str {
        self.op
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Buffered
    }
}

pub struct Except<I: Iterator, J, C> {
    iter: I,
    /// Taken and indexed on the first pull.
    other: Option<J>,
    /// Right side plus every element already emitted.
    seen: ComparerSet<I::Item, C>,
    config: Arc<EngineConfig>,
}

impl<I, J, C> Iterator for Except<I, J, C>
where
    I: Iterator,
    I::Item: Clone,
    J: IntoIterator<Item = I::Item>,
    C: Comparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(other) = self.other.take() {
            self.seen.extend(other);
            metrics::emit_materialized(&self.config, "except", self.seen.len());
        }
        self.iter.by_ref().find(|x| self.seen.insert(x.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I: Iterator, J, C> Operator for Except<I, J, C> {
    fn name(&self) -> &'static str {
        "except"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Buffered
    }
}

pub struct Intersect<I: Iterator, J, C> {
    iter: I,
    other: Option<J>,
    /// Right-side elements not yet matched; a match is removed so it is
    /// emitted once.
    candidates: ComparerSet<I::Item, C>,
    config: Arc<EngineConfig>,
}

impl<I, J, C> Iterator for Intersect<I, J, C>
where
    I: Iterator,
    J: IntoIterator<Item = I::Item>,
    C: Comparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(other) = self.other.take() {
            self.candidates.extend(other);
            metrics::emit_materialized(&self.config, "intersect", self.candidates.len());
        }
        if self.candidates.is_empty() {
            return None;
        }
        self.iter
            .by_ref()
            .find(|x| self.candidates.remove(x).is_some())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let hi = self.iter.size_hint().1;
        if self.other.is_some() {
            (0, hi)
        } else {
            let left = self.candidates.len();
            (0, Some(hi.map_or(left, |hi| hi.min(left))))
        }
    }
}

impl<I: Iterator, J, C> Operator for Intersect<I, J, C> {
    fn name(&self) -> &'static str {
        "intersect"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Buffered
    }
}

pub struct Union<I, J, C>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
{
    inner: Distinct<Chain<I, J>, C>,
}

impl<I, J, C> Iterator for Union<I, J, C>
where
    I: Iterator,
    I::Item: Clone,
    J: Iterator<Item = I::Item>,
    C: Comparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, J, C> Operator for Union<I, J, C>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
{
    fn name(&self) -> &'static str {
        "union"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Buffered
    }
}

pub struct Concat<I, J> {
    /// `None` once exhausted, so it is never polled again.
    first: Option<I>,
    second: J,
}

impl<I, J> Iterator for Concat<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(first) = self.first.as_mut() {
            match first.next() {
                Some(x) => return Some(x),
                None => self.first = None,
            }
        }
        self.second.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a_lo, a_hi) = self
            .first
            .as_ref()
            .map_or((0, Some(0)), |first| first.size_hint());
        let (b_lo, b_hi) = self.second.size_hint();
        let hi = match (a_hi, b_hi) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        (a_lo.saturating_add(b_lo), hi)
    }
}

impl<I, J> Operator for Concat<I, J> {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}
