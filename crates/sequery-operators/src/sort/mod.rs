//! Ordering stages: `order_by` / `order_by_descending`, refined with
//! `then_by` / `then_by_descending`.

pub mod stable;

pub use stable::OrderBy;
