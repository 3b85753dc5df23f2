#![forbid(unsafe_code)]
//! sequery: lazily evaluated, composable queries over in-memory sequences.
//!
//! ```
//! use sequery::from;
//!
//! let evens: Vec<i32> = from(1..=10)
//!     .filter(|n| n % 2 == 0)
//!     .order_by_descending(|n| *n)
//!     .take(3)
//!     .to_vec();
//! assert_eq!(evens, vec![10, 8, 6]);
//! ```
//!
//! The value-level pieces (comparers, ordering specs, groupings, config) live
//! in `sequery-core`; the pipeline and its stages in `sequery-operators`.

pub use sequery_core::prelude::*;
pub use sequery_operators::{
    apply_key_totals, from, from_with_config, Evaluation, OpError, Operator, Pipeline,
};
