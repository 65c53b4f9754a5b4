//! Core traits for spmat.

use num_traits::PrimInt;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Element type of a sparse matrix: a primitive integer that can be read
/// from and written to the coordinate-list text format.
pub trait Scalar: PrimInt + FromStr + Display + Debug {}

impl<T> Scalar for T where T: PrimInt + FromStr + Display + Debug {}

/// Matrix shape.
pub trait MatShape {
    /// Number of rows.
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
}

/// Uniform element reads: unset or out-of-range positions read as zero.
pub trait MatrixGet<T> {
    fn get(&self, i: usize, j: usize) -> T;
}
