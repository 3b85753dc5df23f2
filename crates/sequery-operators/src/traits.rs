//! Operator trait + the element-selection error type.
//!
//! Every adapter a `Pipeline` can wrap implements `Operator`, so callers (and
//! the tracing hooks) can ask a stage what it is and whether it buffers.

use thiserror::Error;

use crate::plan::Evaluation;

/// Failures of `first`/`last`/`single`: nothing matched, or more than one
/// element matched where exactly one was required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("{op}: no element matched the predicate")]
    NotFound { op: &'static str },

    #[error("{op}: more than one element matched the predicate")]
    MultipleMatches { op: &'static str },
}

impl OpError {
    pub fn op(&self) -> &'static str {
        match self {
            OpError::NotFound { op } | OpError::MultipleMatches { op } => op,
        }
    }
}

/// Trait implemented by every pipeline stage.
pub trait Operator {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Whether the stage streams or has to see (part of) its input first.
    fn evaluation(&self) -> Evaluation;
}
