//! vargraph-common — Shared error taxonomy and batch diagnostics used across
//! all vargraph crates.

pub mod diagnostics;
pub mod error;

pub use diagnostics::{BatchCounts, MessageDedup};
pub use error::{ConversionError, Tally};

pub type Result<T> = std::result::Result<T, ConversionError>;
