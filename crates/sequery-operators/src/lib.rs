#![forbid(unsafe_code)]
//! sequery-operators: the query pipeline (filter/select/sort/set/join/element).
//!
//! Design intent:
//! - Pull-based and synchronous. A `Pipeline` does nothing until a terminal
//!   operation or a `for` loop pulls from it.
//! - Lazy stages (`Evaluation::Lazy`) pull exactly as far as their consumer
//!   asks. Buffered stages (sort, distinct, set algebra, joins) build their
//!   buffer or index on the first pull, never at construction.
//! - Equality for set/join stages comes from an explicit `Comparer`; the plain
//!   forms use `DefaultComparer`.

pub mod metrics;
pub mod pipeline;
pub mod plan;
pub mod traits;

pub mod aggregate;
pub mod element;
pub mod filter;
pub mod map;
pub mod quantifier;
pub mod set;

pub mod join;
pub mod sort;

pub use aggregate::apply_key_totals;
pub use pipeline::{from, from_with_config, Pipeline, Source};
pub use plan::Evaluation;
pub use traits::{OpError, Operator};
