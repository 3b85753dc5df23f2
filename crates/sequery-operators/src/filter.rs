//! Filtering and positional selection: `filter`, `take`, `skip`,
//! `take_while`, `skip_while`. All lazy.
//!
//! None of these pulls an upstream element the consumer did not ask for, so a
//! `take(n)` downstream of an expensive `filter` stops the predicate after the
//! n-th match.

use crate::pipeline::Pipeline;
use crate::plan::Evaluation;
use crate::traits::Operator;

impl<I: Iterator> Pipeline<I> {
    /// Keep the elements for which `pred` holds, in order.
    pub fn filter<P>(self, pred: P) -> Pipeline<Where<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.stage(|iter, _| Where { iter, pred })
    }

    /// First `min(n, len)` elements.
    pub fn take(self, n: usize) -> Pipeline<Take<I>> {
        self.stage(|iter, _| Take { iter, remaining: n })
    }

    /// Everything after the first `min(n, len)` elements.
    pub fn skip(self, n: usize) -> Pipeline<Skip<I>> {
        self.stage(|iter, _| Skip { iter, n })
    }

    /// Longest prefix satisfying `pred`. Stops for good at the first failure,
    /// even if later elements would pass again.
    pub fn take_while<P>(self, pred: P) -> Pipeline<TakeWhile<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.stage(|iter, _| TakeWhile {
            iter,
            pred,
            done: false,
        })
    }

    /// Drop the prefix satisfying `pred`; the rest is returned without
    /// re-testing.
    pub fn skip_while<P>(self, pred: P) -> Pipeline<SkipWhile<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.stage(|iter, _| SkipWhile {
            iter,
            pred: Some(pred),
        })
    }
}

pub struct Where<I, P> {
    iter: I,
    pred: P,
}

impl<I, P> Iterator for Where<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let pred = &mut self.pred;
        self.iter.find(|x| pred(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, P> Operator for Where<I, P> {
    fn name(&self) -> &'static str {
        "where"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}

pub struct Take<I> {
    iter: I,
    remaining: usize,
}

impl<I: Iterator> Iterator for Take<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let (lo, hi) = self.iter.size_hint();
        let hi = match hi {
            Some(hi) => hi.min(self.remaining),
            None => self.remaining,
        };
        (lo.min(self.remaining), Some(hi))
    }
}

impl<I> Operator for Take<I> {
    fn name(&self) -> &'static str {
        "take"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}

pub struct Skip<I> {
    iter: I,
    n: usize,
}

impl<I: Iterator> Iterator for Skip<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.n > 0 {
            let n = std::mem::take(&mut self.n);
            return self.iter.nth(n);
        }
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        (
            lo.saturating_sub(self.n),
            hi.map(|hi| hi.saturating_sub(self.n)),
        )
    }
}

impl<I> Operator for Skip<I> {
    fn name(&self) -> &'static str {
        "skip"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}

pub struct TakeWhile<I, P> {
    iter: I,
    pred: P,
    done: bool,
}

impl<I, P> Iterator for TakeWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        match self.iter.next() {
            Some(x) if (self.pred)(&x) => Some(x),
            _ => {
                self.done = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<I, P> Operator for TakeWhile<I, P> {
    fn name(&self) -> &'static str {
        "take_while"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}

pub struct SkipWhile<I, P> {
    iter: I,
    /// `None` once the prefix has been dropped.
    pred: Option<P>,
}

impl<I, P> Iterator for SkipWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(pred) = self.pred.as_mut() {
            loop {
                let x = self.iter.next()?;
                if !pred(&x) {
                    self.pred = None;
                    return Some(x);
                }
            }
        }
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        if self.pred.is_some() {
            (0, hi)
        } else {
            (lo, hi)
        }
    }
}

impl<I, P> Operator for SkipWhile<I, P> {
    fn name(&self) -> &'static str {
        "skip_while"
    }

    fn evaluation(&self) -> Evaluation {
        Evaluation::Lazy
    }
}
