// Compressed sparse row export of a SparseMatrix

use crate::core::traits::{MatShape, MatrixGet, Scalar};
use crate::error::{MatError, Result};
use crate::matrix::sparse::SparseMatrix;

/// CSR triple plus shape.
///
/// `row_ptr` has `nrows + 1` entries; the entries of row `i` are
/// `values[row_ptr[i]..row_ptr[i + 1]]`, ascending by column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrMatrix<T> {
    nrows: usize,
    ncols: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> CsrMatrix<T> {
    pub(crate) fn from_parts(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), nrows + 1);
        debug_assert_eq!(col_indices.len(), values.len());
        Self { nrows, ncols, row_ptr, col_indices, values }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Take the three arrays as `(values, col_indices, row_ptr)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<usize>, Vec<usize>) {
        (self.values, self.col_indices, self.row_ptr)
    }

    /// Column indices and values of row `i`; both empty when `i >= nrows`.
    pub fn row(&self, i: usize) -> (&[usize], &[T]) {
        if i >= self.nrows {
            return (&self.col_indices[..0], &self.values[..0]);
        }
        let (start, end) = (self.row_ptr[i], self.row_ptr[i + 1]);
        (&self.col_indices[start..end], &self.values[start..end])
    }

    /// Back to the map-of-rows representation.
    pub fn to_sparse(&self) -> SparseMatrix<T> {
        let mut m = SparseMatrix::new(self.nrows, self.ncols);
        for i in 0..self.nrows {
            let (cols, vals) = self.row(i);
            if cols.is_empty() {
                continue;
            }
            m.data.insert(i, cols.iter().copied().zip(vals.iter().copied()).collect());
        }
        m.nnz = self.nnz();
        m
    }

    /// Compute y = A * x.  `x.len() == ncols()`, `y.len() == nrows()`.
    pub fn spmv(&self, x: &[T], y: &mut [T]) -> Result<()> {
        if x.len() != self.ncols || y.len() != self.nrows {
            return Err(MatError::Dimension(format!(
                "spmv on {}x{} matrix needs x of length {} and y of length {}, got {} and {}",
                self.nrows,
                self.ncols,
                self.ncols,
                self.nrows,
                x.len(),
                y.len()
            )));
        }
        for (i, yi) in y.iter_mut().enumerate() {
            let (cols, vals) = self.row(i);
            let mut sum = T::zero();
            for (&j, &a) in cols.iter().zip(vals) {
                sum = a
                    .checked_mul(&x[j])
                    .and_then(|p| sum.checked_add(&p))
                    .ok_or(MatError::Overflow { op: "spmv", row: i, col: j })?;
            }
            *yi = sum;
        }
        Ok(())
    }
}

impl<T: Scalar> MatShape for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.nrows
    }
    fn ncols(&self) -> usize {
        self.ncols
    }
}

impl<T: Scalar> MatrixGet<T> for CsrMatrix<T> {
    fn get(&self, i: usize, j: usize) -> T {
        if i >= self.nrows || j >= self.ncols {
            return T::zero();
        }
        let (cols, vals) = self.row(i);
        match cols.binary_search(&j) {
            Ok(k) => vals[k],
            Err(_) => T::zero(),
        }
    }
}
