//! Evaluation modes reported by `Operator::evaluation`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Pulls one upstream element per emitted element (or fewer), and nothing
    /// before the consumer asks.
    Lazy,
    /// Builds a buffer, seen-set or index on first pull. Sorts consume the
    /// whole source; joins and except/intersect consume the right side.
    Buffered,
}

impl Evaluation {
    pub fn is_lazy(self) -> bool {
        matches!(self, Evaluation::Lazy)
    }
}
