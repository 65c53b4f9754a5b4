//! Row-major sparse matrix stored as an ordered map of rows.
//!
//! `SparseMatrix<T>` keeps only non-zero entries in a
//! `BTreeMap<row, BTreeMap<col, value>>`. A row key exists only while the row
//! holds at least one entry, and no stored value is ever zero. All arithmetic
//! (see [`crate::matrix::ops`]) reads its operands and returns a new matrix.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use faer::Mat;
use log::debug;

use crate::core::traits::{MatShape, MatrixGet, Scalar};
use crate::error::{Axis, MatError, Result};
use crate::io::coo;
use crate::matrix::csr::CsrMatrix;

pub(crate) type RowMap<T> = BTreeMap<usize, T>;

#[derive(Clone, Debug, Default)]
pub struct SparseMatrix<T: Scalar = i64> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: BTreeMap<usize, RowMap<T>>,
    pub(crate) nnz: usize,
}

impl<T: Scalar> SparseMatrix<T> {
    /// Empty `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: BTreeMap::new(),
            nnz: 0,
        }
    }

    /// Build from `(row, col, value)` triplets through [`Self::set_element`].
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut m = Self::new(rows, cols);
        for (r, c, v) in triplets {
            m.set_element(r, c, v)?;
        }
        Ok(m)
    }

    /// Load a matrix from a coordinate-list file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let m = coo::read_matrix(path.as_ref())?;
        debug!(
            "loaded {}x{} matrix ({} non-zero) from {}",
            m.rows,
            m.cols,
            m.nnz,
            path.as_ref().display()
        );
        Ok(m)
    }

    /// Parse the coordinate-list format from any buffered source.
    pub fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self> {
        coo::from_reader(reader)
    }

    /// Write the matrix to `path` in the coordinate-list format.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        coo::write_matrix(self, path.as_ref())?;
        debug!("saved {}x{} matrix to {}", self.rows, self.cols, path.as_ref().display());
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Diagnostic count of non-zero entries.
    ///
    /// After a file load this counts every non-zero coordinate line, so a file
    /// that repeats a coordinate reports more than [`Self::stored_len`].
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// Number of entries actually stored.
    pub fn stored_len(&self) -> usize {
        self.data.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`; zero when unset or outside the matrix.
    pub fn get_element(&self, row: usize, col: usize) -> T {
        if row >= self.rows || col >= self.cols {
            return T::zero();
        }
        self.data
            .get(&row)
            .and_then(|r| r.get(&col))
            .copied()
            .unwrap_or_else(T::zero)
    }

    /// Store `value` at `(row, col)`. Zero removes the entry, and the row
    /// itself once it has no entries left.
    pub fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows {
            return Err(MatError::index(Axis::Row, row as i64, self.rows));
        }
        if col >= self.cols {
            return Err(MatError::index(Axis::Column, col as i64, self.cols));
        }
        if value != T::zero() {
            if self.data.entry(row).or_default().insert(col, value).is_none() {
                self.nnz += 1;
            }
        } else if let Some(r) = self.data.get_mut(&row) {
            if r.remove(&col).is_some() {
                self.nnz = self.nnz.saturating_sub(1);
                if r.is_empty() {
                    self.data.remove(&row);
                }
            }
        }
        Ok(())
    }

    /// Stored entries of one row, ascending by column.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        self.data
            .get(&row)
            .into_iter()
            .flat_map(|r| r.iter().map(|(&c, &v)| (c, v)))
    }

    /// All stored entries as `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.data
            .iter()
            .flat_map(|(&r, cols)| cols.iter().map(move |(&c, &v)| (r, c, v)))
    }

    /// New `cols x rows` matrix with every entry mirrored.
    pub fn transpose(&self) -> Self {
        let mut result = Self::new(self.cols, self.rows);
        for (r, c, v) in self.iter() {
            result.data.entry(c).or_default().insert(r, v);
        }
        result.nnz = result.stored_len();
        result
    }

    /// Compressed sparse row export.
    pub fn to_csr(&self) -> CsrMatrix<T> {
        let mut values = Vec::with_capacity(self.stored_len());
        let mut col_indices = Vec::with_capacity(values.capacity());
        let mut row_ptr = Vec::with_capacity(self.rows + 1);
        row_ptr.push(0);
        for i in 0..self.rows {
            for (c, v) in self.row(i) {
                col_indices.push(c);
                values.push(v);
            }
            row_ptr.push(values.len());
        }
        CsrMatrix::from_parts(self.rows, self.cols, row_ptr, col_indices, values)
    }

    /// Dense `f64` copy as a faer matrix.
    pub fn to_dense_f64(&self) -> Mat<f64> {
        let mut dense = Mat::<f64>::zeros(self.rows, self.cols);
        for (r, c, v) in self.iter() {
            dense[(r, c)] = v.to_f64().unwrap_or(f64::NAN);
        }
        dense
    }
}

impl<T: Scalar> PartialEq for SparseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}

impl<T: Scalar> Eq for SparseMatrix<T> {}

impl<T: Scalar> MatShape for SparseMatrix<T> {
    fn nrows(&self) -> usize {
        self.rows
    }
    fn ncols(&self) -> usize {
        self.cols
    }
}

impl<T: Scalar> MatrixGet<T> for SparseMatrix<T> {
    fn get(&self, i: usize, j: usize) -> T {
        self.get_element(i, j)
    }
}

impl<T: Scalar> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows={}", self.rows)?;
        writeln!(f, "cols={}", self.cols)?;
        for (r, c, v) in self.iter() {
            if v != T::zero() {
                writeln!(f, "({r}, {c}, {v})")?;
            }
        }
        Ok(())
    }
}

impl<T: Scalar> std::str::FromStr for SparseMatrix<T> {
    type Err = MatError;

    fn from_str(s: &str) -> Result<Self> {
        coo::from_reader(s.as_bytes())
    }
}
