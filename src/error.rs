use std::path::PathBuf;
use thiserror::Error;

// Unified error type for spmat

#[derive(Error, Debug)]
pub enum MatError {
    #[error("matrix file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("invalid matrix file format (line {line}): {message}")]
    Format { line: usize, message: String },
    #[error("{axis} index {index} out of range [0, {bound})")]
    Index {
        axis: Axis,
        index: i64,
        bound: usize,
    },
    #[error("{0}")]
    Dimension(String),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("integer overflow in {op} at ({row}, {col})")]
    Overflow {
        op: &'static str,
        row: usize,
        col: usize,
    },
}

/// Which coordinate an [`MatError::Index`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("Row"),
            Axis::Column => f.write_str("Column"),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatError>;

impl MatError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        MatError::Format { line, message: message.into() }
    }

    pub(crate) fn index(axis: Axis, index: i64, bound: usize) -> Self {
        MatError::Index { axis, index, bound }
    }
}
