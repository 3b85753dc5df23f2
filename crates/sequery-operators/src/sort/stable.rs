//! Deferred stable sort.
//!
//! The source is drained and sorted on the first pull, not when the stage is
//! built, so `then_by` can still extend the key spec. Elements equal under
//! every key keep their input order (`slice::sort_by` is stable).

use std::sync::Arc;

use sequery_core::config::EngineConfig;
use sequery_core::order::{Direction, OrderKeySpec};

use crate::metrics;
use crate::pipeline::Pipeline;
use crate::plan::Evaluation;
use crate::traits::Operator;

impl<I: Iterator> Pipeline<I> {
    pub fn order_by<'k, K, F>(self, key: F) -> Pipeline<OrderBy<'k, I>>
    where
        F: Fn(&I::Item) -> K + 'k,
        K: Ord,
        I::Item: 'k,
    {
        self.ordered(OrderKeySpec::by(key, Direction::Ascending))
    }

    pub fn order_by_descending<'k, K, F>(self, key: F) -> Pipeline<OrderBy<'k, I>>
    where
        F: Fn(&I::Item) -> K + 'k,
        K: Ord,
        I::Item: 'k,
    {
        self.ordered(OrderKeySpec::by(key, Direction::Descending))
    }

    /// Sort by a prebuilt key spec.
    pub fn ordered<'k>(self, spec: OrderKeySpec<'k, I::Item>) -> Pipeline<OrderBy<'k, I>> {
        self.stage(|iter, config| OrderBy {
            source: Some(iter),
            spec,
            sorted: None,
            config: Arc::clone(config),
        })
    }
}

impl<'k, I: Iterator> Pipeline<OrderBy<'k, I>> {
    /// Break ties of the existing ordering by `key`, ascending.
    pub fn then_by<K, F>(self, key: F) -> Self
    where
        F: Fn(&I::Item) -> K + 'k,
        K: Ord,
        I::Item: 'k,
    {
        self.then_with(key, Direction::Ascending)
    }

    pub fn then_by_descending<K, F>(self, key: F) -> Self
    where
        F: Fn(&I::Item) -> K + 'k,
        K: Ord,
        I::Item: 'k,
    {
        self.then_with(key, Direction::Descending)
    }

    fn then_with<K, F>(mut self, key: F, direction: Direction) -> Self
    where
        F: Fn(&I::Item) -> K + 'k,
        K: Ord,
        I::Item: 'k,
    {
        let spec = std::mem::take(&mut self.iter.spec);
        self.iter.spec = spec.then(key, direction);
        self
    }
}

pub struct OrderBy<'k, I: Iterator> {
    source: Option<I>,
    spec: OrderKeySpec<'k, I::Item>,
    sorted: Option<std::vec::IntoIter<I::Item>>,
    config: Arc<EngineConfig>,
}

impl<I: Iterator> OrderBy<'_, I> {
    fn sorted(&mut self) -> &mut std::vec::IntoIter<I::Item> {
        let spec = &self.spec;
        let source = &mut self.source;
        let config = &self.config;
        self.sorted.get_or_insert_with(|| {
            let mut rows: Vec<I::Item> = source.take().map(Iterator::collect).unwrap_or_default();
            spec.sort(&mut rows);
            metrics::emit_materialized(config, "order_by", rows.len());
            rows.into_iter()
        })
    }
}

impl<I: Iterator> Iterator for OrderBy<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.sorted().next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (&self.sorted, &self.source) {
            (Some(sorted), _) => sorted.size_hint(),
            (None, Some(source)) => source.size_hint(),
            (None, None) => (0, Some(0)),
        }
    }
}

impl<I: Iterator> Operator for OrderBy<'_, I> {
    fn name(&self) -> &'static str {
        "order_by"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Buffered
    }
}
