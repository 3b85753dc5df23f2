//! `Pipeline`: a composed, not-yet-run chain of stages over a source.
//!
//! Intermediate operators live next to their adapters (`filter`, `map`,
//! `sort`, `set`, `join`); this module holds construction and the plain
//! materializing terminals.
//!
//! `Pipeline` is not itself an `Iterator`, only `IntoIterator`. That keeps the
//! query vocabulary (`take`, `count`, `last`, `all`, ...) from colliding with
//! the std iterator methods of the same name.

use std::sync::Arc;

use sequery_core::config::EngineConfig;

use crate::plan::Evaluation;
use crate::traits::Operator;

/// Pipeline over the iterator `I`, carrying the engine config every buffered
/// stage reads.
#[must_use = "pipelines are lazy and do nothing unless consumed"]
pub struct Pipeline<I> {
    pub(crate) iter: I,
    pub(crate) config: Arc<EngineConfig>,
}

/// Start a pipeline over any collection or iterator, with the default config.
pub fn from<S: IntoIterator>(source: S) -> Pipeline<Source<S::IntoIter>> {
    from_with_config(source, EngineConfig::default())
}

pub fn from_with_config<S: IntoIterator>(
    source: S,
    config: EngineConfig,
) -> Pipeline<Source<S::IntoIter>> {
    from_shared(source, Arc::new(config))
}

/// Sub-pipeline that shares its parent's config, e.g. over a group's members.
pub(crate) fn from_shared<S: IntoIterator>(
    source: S,
    config: Arc<EngineConfig>,
) -> Pipeline<Source<S::IntoIter>> {
    Pipeline {
        iter: Source {
            inner: source.into_iter(),
        },
        config,
    }
}

impl<I: Iterator> Pipeline<I> {
    /// Wrap the current iterator in the next stage, keeping the config.
    pub(crate) fn stage<J, B>(self, build: B) -> Pipeline<J>
    where
        J: Iterator,
        B: FnOnce(I, &Arc<EngineConfig>) -> J,
    {
        let iter = build(self.iter, &self.config);
        Pipeline {
            iter,
            config: self.config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn to_vec(self) -> Vec<I::Item> {
        self.iter.collect()
    }

    pub fn collect<B: FromIterator<I::Item>>(self) -> B {
        self.iter.collect()
    }

    pub fn count(self) -> usize {
        self.iter.count()
    }

    /// Run `f` on every element, e.g. to assign a computed field over
    /// `from(&mut records)`.
    pub fn for_each<F: FnMut(I::Item)>(self, f: F) {
        self.iter.for_each(f)
    }
}

impl<I: Iterator + Operator> Pipeline<I> {
    /// Evaluation mode of the outermost stage.
    pub fn evaluation(&self) -> Evaluation {
        self.iter.evaluation()
    }

    /// Name of the outermost stage.
    pub fn stage_name(&self) -> &'static str {
        self.iter.name()
    }
}

impl<I: Iterator> IntoIterator for Pipeline<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> I {
        self.iter
    }
}

/// The source stage: the caller's collection, as is.
#[derive(Debug, Clone)]
pub struct Source<I> {
    inner: I,
}

impl<I: Iterator> Iterator for Source<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I> Operator for Source<I> {
    fn name(&self) -> &'static str {
        "source"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}

/// Capacity hint for a buffered stage: the config override, else the lower
/// bound of what is about to be inserted.
pub(crate) fn capacity_for(config: &EngineConfig, hint: (usize, Option<usize>)) -> usize {
    config.hash_capacity(hint.0)
}
