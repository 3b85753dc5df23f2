//! Join family: hash equijoin, group-join and left-outer-join.
//!
//! All three index the right-hand input once, on the first pull, and then
//! stream the left input in order. Right rows sharing a key keep their
//! original relative order.

pub mod group;
pub mod hash;
pub mod index;

pub use group::{GroupJoin, LeftOuterJoin};
pub use hash::Join;
pub use index::KeyIndex;
