#![forbid(unsafe_code)]
//! sequery-core: the value-level building blocks of the sequery engine.
//!
//! - `comparer`: pluggable equality + hashing (`Comparer`) and a comparer-keyed
//!   seen-set used by distinct/set algebra.
//! - `order`: multi-key ordering specs for stable sorts.
//! - `grouping`: key + members pairs produced by group-join.
//! - `config` / `error`: engine configuration and the core error type.
//!
//! Nothing here iterates; the adapters live in `sequery-operators`.

pub mod comparer;
pub mod config;
pub mod error;
pub mod grouping;
pub mod order;
pub mod prelude;
