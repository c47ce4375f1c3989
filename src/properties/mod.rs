//! Properties of relation operators.

mod logical;
pub use logical::*;
