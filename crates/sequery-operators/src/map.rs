//! Projection stages: `select`, `select_many`, `default_if_empty`, `inspect`.

use std::iter::Fuse;

use crate::pipeline::Pipeline;
use crate::plan::Evaluation;
use crate::traits::Operator;

impl<I: Iterator> Pipeline<I> {
    /// 1:1 transform. The projector may build a new, narrower record or a tuple.
    pub fn select<U, F>(self, projector: F) -> Pipeline<Select<I, F>>
    where
        F: FnMut(I::Item) -> U,
    {
        self.stage(|iter, _| Select { iter, f: projector })
    }

    /// Flatten `f(element)` for every element, in order.
    pub fn select_many<U, F>(self, f: F) -> Pipeline<SelectMany<I, F, U>>
    where
        F: FnMut(I::Item) -> U,
        U: IntoIterator,
    {
        self.stage(|iter, _| SelectMany {
            iter,
            f,
            front: None,
        })
    }

    /// `Some(x)` for every element, or a single `None` if there are none.
    pub fn default_if_empty(self) -> Pipeline<DefaultIfEmpty<I>> {
        self.stage(|iter, _| DefaultIfEmpty {
            iter: iter.fuse(),
            seen: false,
        })
    }

    /// Call `f` on each element as it passes through.
    pub fn inspect<F>(self, f: F) -> Pipeline<Inspect<I, F>>
    where
        F: FnMut(&I::Item),
    {
        self.stage(|iter, _| Inspect { iter, f })
    }
}

pub struct Select<I, F> {
    iter: I,
    f: F,
}

impl<I, F, U> Iterator for Select<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        self.iter.next().map(&mut self.f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, F> Operator for Select<I, F> {
    fn name(&self) -> &'static str {
        "select"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}

pub struct SelectMany<I, F, U>
where
    U: IntoIterator,
{
    iter: I,
    f: F,
    front: Option<U::IntoIter>,
}

impl<I, F, U> Iterator for SelectMany<I, F, U>
where
    I: Iterator,
    F: FnMut(I::Item) -> U,
    U: IntoIterator,
{
    type Item = U::Item;

    fn next(&mut self) -> Option<U::Item> {
        loop {
            if let Some(inner) = self.front.as_mut() {
                if let Some(x) = inner.next() {
                    return Some(x);
                }
                self.front = None;
            }
            let outer = self.iter.next()?;
            self.front = Some((self.f)(outer).into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (front_lo, front_hi) = self
            .front
            .as_ref()
            .map_or((0, Some(0)), |inner| inner.size_hint());
        match self.iter.size_hint() {
            (0, Some(0)) => (front_lo, front_hi),
            _ => (front_lo, None),
        }
    }
}

impl<I, F, U: IntoIterator> Operator for SelectMany<I, F, U> {
    fn name(&self) -> &'static str {
        "select_many"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}

pub struct DefaultIfEmpty<I> {
    iter: Fuse<I>,
    seen: bool,
}

impl<I: Iterator> Iterator for DefaultIfEmpty<I> {
    type Item = Option<I::Item>;

    fn next(&mut self) -> Option<Option<I::Item>> {
        match self.iter.next() {
            Some(x) => {
                self.seen = true;
                Some(Some(x))
            }
            None if !self.seen => {
                self.seen = true;
                Some(None)
            }
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        if self.seen {
            (lo, hi)
        } else {
            (lo.max(1), hi.map(|hi| hi.max(1)))
        }
    }
}

impl<I> Operator for DefaultIfEmpty<I> {
    fn name(&self) -> &'static str {
        "default_if_empty"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}

pub struct Inspect<I, F> {
    iter: I,
    f: F,
}

impl<I, F> Iterator for Inspect<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item),
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let x = self.iter.next()?;
        (self.f)(&x);
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, F> Operator for Inspect<I, F> {
    fn name(&self) -> &'static str {
        "inspect"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}
