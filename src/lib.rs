//! spmat: sparse integer matrices over a coordinate-list text format
//!
//! This crate provides a row-major sparse matrix with element access, addition, subtraction,
//! multiplication, transpose and compressed sparse row export, read from and written to a
//! simple `rows=` / `cols=` / `(row, col, value)` text format.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod matrix;
pub mod shell;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::core::*;
pub use crate::error::*;
pub use crate::matrix::*;
