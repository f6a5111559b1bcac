//! Shared domain types for the pivot-fit engine.

mod types;

pub use types::*;
