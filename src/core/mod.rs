//! Core traits shared by the sparse and compressed matrix types.

pub mod traits;
pub use traits::{MatShape, MatrixGet, Scalar};
