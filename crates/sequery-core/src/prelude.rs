//! Convenient re-exports for downstream crates.

pub use crate::comparer::{Comparer, ComparerSet, DefaultComparer, KeyComparer};
pub use crate::config::{EngineConfig, MultipleMatchPolicy, MAX_PREALLOC};
pub use crate::error::{Error, Result};
pub use crate::grouping::Grouping;
pub use crate::order::{Direction, OrderKeySpec};
