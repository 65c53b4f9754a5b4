//! Matrix module: sparse storage, arithmetic, and CSR export.

pub mod csr;
pub mod ops;
pub mod sparse;
pub use csr::CsrMatrix;
pub use sparse::SparseMatrix;
