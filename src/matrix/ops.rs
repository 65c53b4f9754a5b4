//! Matrix arithmetic: addition, subtraction and sparse-sparse multiplication.
//!
//! Every operation validates shapes before touching any data and returns a
//! freshly allocated result; operands are only read. A result entry that does
//! not fit the element type is reported as [`MatError::Overflow`] rather than
//! wrapping.
//!
//! # Multiplication
//! The product is computed row by row: for each non-empty row `r` of `A`, the
//! products `A[r,k] * B[k,j]` are accumulated into a per-row map keyed by `j`,
//! visiting only the rows `k` of `B` that hold entries. The work is therefore
//! proportional to the number of matched non-zero pairs rather than to
//! `rows * cols * inner`. Row sums are accumulated as `i128` and narrowed when
//! the row is written, so only the final value has to fit the element type.

use std::collections::BTreeMap;

use log::debug;
use num_traits::NumCast;

use crate::core::traits::Scalar;
use crate::error::{MatError, Result};
use crate::matrix::sparse::SparseMatrix;

impl<T: Scalar> SparseMatrix<T> {
    /// Element-wise sum. Both matrices must have the same shape.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.combine(other, "add", |a, b| a.checked_add(&b))
    }

    /// Element-wise difference `self - other`. Both matrices must have the same shape.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.combine(other, "subtract", |a, b| a.checked_sub(&b))
    }

    fn combine<F>(&self, other: &Self, op: &'static str, f: F) -> Result<Self>
    where
        F: Fn(T, T) -> Option<T>,
    {
        if self.shape() != other.shape() {
            return Err(MatError::Dimension(format!(
                "Cannot {op} matrices of different dimensions: {}x{} and {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        debug!("{op}: {}x{} ({} + {} stored)", self.rows, self.cols, self.stored_len(), other.stored_len());

        let mut result = Self::new(self.rows, self.cols);
        for (r, c, v) in self.iter() {
            result.set_element(r, c, v)?;
        }
        for (r, c, v) in other.iter() {
            let current = result.get_element(r, c);
            let value = f(current, v).ok_or(MatError::Overflow { op, row: r, col: c })?;
            result.set_element(r, c, value)?;
        }
        Ok(result)
    }

    /// Matrix product `self * other`; requires `self.cols() == other.rows()`.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(MatError::Dimension(format!(
                "Invalid dimensions for multiplication: {}x{} and {}x{}. \
                 First matrix columns ({}) must match second matrix rows ({})",
                self.rows, self.cols, other.rows, other.cols, self.cols, other.rows
            )));
        }
        debug!(
            "multiply: {}x{} * {}x{}",
            self.rows, self.cols, other.rows, other.cols
        );

        let mut result = Self::new(self.rows, other.cols);
        // partial sums may leave T's range as long as the final value fits
        let mut acc: BTreeMap<usize, i128> = BTreeMap::new();
        for (&r, a_row) in &self.data {
            acc.clear();
            for (&k, &v1) in a_row {
                let Some(b_row) = other.data.get(&k) else {
                    continue;
                };
                for (&col, &v2) in b_row {
                    let slot = acc.entry(col).or_insert(0);
                    let sum = *slot;
                    *slot = v1
                        .to_i128()
                        .zip(v2.to_i128())
                        .and_then(|(a, b)| a.checked_mul(b))
                        .and_then(|p| sum.checked_add(p))
                        .ok_or(MatError::Overflow { op: "multiply", row: r, col })?;
                }
            }

            let mut out: BTreeMap<usize, T> = BTreeMap::new();
            for (&c, &v) in acc.iter().filter(|&(_, v)| *v != 0) {
                let value = <T as NumCast>::from(v)
                    .ok_or(MatError::Overflow { op: "multiply", row: r, col: c })?;
                out.insert(c, value);
            }
            if !out.is_empty() {
                result.nnz += out.len();
                result.data.insert(r, out);
            }
        }
        Ok(result)
    }
}
