//! Element selection: `first`, `last`, `single` and their `_or_default` forms.
//!
//! The plain forms fail with `OpError::NotFound` on no match; `single` also
//! fails with `OpError::MultipleMatches`. The `_or_default` forms return
//! `None` instead of `NotFound`. What `single_or_default` does on an
//! ambiguous match is set by `EngineConfig::single_or_default`.

use sequery_core::config::{EngineConfig, MultipleMatchPolicy};

use crate::metrics;
use crate::pipeline::Pipeline;
use crate::traits::OpError;

impl<I: Iterator> Pipeline<I> {
    /// First element satisfying `pred`. Stops at the match.
    pub fn first<P>(self, pred: P) -> Result<I::Item, OpError>
    where
        P: FnMut(&I::Item) -> bool,
    {
        let Pipeline { mut iter, config } = self;
        iter.find(pred)
            .ok_or_else(|| miss(&config, OpError::NotFound { op: "first" }))
    }

    pub fn first_or_default<P>(self, pred: P) -> Option<I::Item>
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.into_iter().find(pred)
    }

    /// Last element satisfying `pred`. Scans the whole sequence, keeping the
    /// latest match.
    pub fn last<P>(self, pred: P) -> Result<I::Item, OpError>
    where
        P: FnMut(&I::Item) -> bool,
    {
        let Pipeline { iter, config } = self;
        iter.filter(pred)
            .last()
            .ok_or_else(|| miss(&config, OpError::NotFound { op: "last" }))
    }

    pub fn last_or_default<P>(self, pred: P) -> Option<I::Item>
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.into_iter().filter(pred).last()
    }

    /// The only element satisfying `pred`.
    pub fn single<P>(self, pred: P) -> Result<I::Item, OpError>
    where
        P: FnMut(&I::Item) -> bool,
    {
        let Pipeline { iter, config } = self;
        match scan_single(iter, pred, "single") {
            Ok(Some(x)) => Ok(x),
            Ok(None) => Err(miss(&config, OpError::NotFound { op: "single" })),
            Err(e) => Err(miss(&config, e)),
        }
    }

    /// `Ok(None)` on no match. On more than one match, raises
    /// `MultipleMatches` under `MultipleMatchPolicy::Raise` (the default) and
    /// returns `Ok(None)` under `MultipleMatchPolicy::Absent`.
    pub fn single_or_default<P>(self, pred: P) -> Result<Option<I::Item>, OpError>
    where
        P: FnMut(&I::Item) -> bool,
    {
        let Pipeline { iter, config } = self;
        match scan_single(iter, pred, "single_or_default") {
            Ok(found) => Ok(found),
            Err(e) => match config.single_or_default {
                MultipleMatchPolicy::Raise => Err(miss(&config, e)),
                MultipleMatchPolicy::Absent => Ok(None),
            },
        }
    }
}

/// Scan until a second match (error) or the end (zero or one match).
fn scan_single<I, P>(iter: I, mut pred: P, op: &'static str) -> Result<Option<I::Item>, OpError>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    let mut found = None;
    for x in iter {
        if pred(&x) {
            if found.is_some() {
                return Err(OpError::MultipleMatches { op });
            }
            found = Some(x);
        }
    }
    Ok(found)
}

fn miss(config: &EngineConfig, err: OpError) -> OpError {
    metrics::emit_miss(config, &err);
    err
}
