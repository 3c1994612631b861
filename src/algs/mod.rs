//! Stateless algorithms over element connectivity.

pub mod connectivity;
pub mod dashed;
pub mod dedup;
pub mod meshgen;
pub mod shrink;

pub use dedup::{UniqueRows, unique_rows};
pub use shrink::ShrinkOptions;
