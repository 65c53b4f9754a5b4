//! Coordinate-list text format.
//!
//! ```text
//! rows=<rows>
//! cols=<cols>
//! (<row>, <col>, <value>)
//! ...
//! ```
//!
//! The reader is strict and fails on the first malformed line. Blank lines
//! between entries are skipped and whitespace around fields is ignored. A row
//! (column) index equal to the declared row (column) count is read as the last
//! valid index; any other out-of-range index is an error. Zero values are
//! accepted and dropped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::core::traits::Scalar;
use crate::error::{Axis, MatError, Result};
use crate::matrix::sparse::SparseMatrix;

const HEADER_MSG: &str = "First two lines must be in format 'rows=N' and 'cols=N'";

/// Read a matrix from the file at `path`.
pub fn read_matrix<T: Scalar>(path: &Path) -> Result<SparseMatrix<T>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MatError::FileNotFound { path: path.to_path_buf() },
        _ => MatError::Io { path: path.to_path_buf(), source: e },
    })?;
    parse(BufReader::new(file), path)
}

/// Read a matrix from any buffered source.
pub fn from_reader<T: Scalar, R: BufRead>(reader: R) -> Result<SparseMatrix<T>> {
    parse(reader, Path::new("<reader>"))
}

fn parse<T: Scalar, R: BufRead>(reader: R, origin: &Path) -> Result<SparseMatrix<T>> {
    let mut lines = reader.lines();
    let mut next_line = |lineno: usize| -> Result<String> {
        match lines.next() {
            Some(Ok(l)) => Ok(l),
            Some(Err(source)) => Err(read_error(source, lineno, origin)),
            None => Err(MatError::format(lineno, HEADER_MSG)),
        }
    };

    let rows = parse_header(&next_line(1)?, "rows=", 1)?;
    let cols = parse_header(&next_line(2)?, "cols=", 2)?;
    let mut m = SparseMatrix::new(rows, cols);

    for (i, line) in lines.enumerate() {
        let lineno = i + 3;
        let line = line.map_err(|source| read_error(source, lineno, origin))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (row, col, value) = parse_entry::<T>(line, lineno)?;
        let row = adjust_index(row, rows, Axis::Row, lineno)?;
        let col = adjust_index(col, cols, Axis::Column, lineno)?;
        if value != T::zero() {
            m.data.entry(row).or_default().insert(col, value);
            // one per line, repeated coordinates included
            m.nnz += 1;
        }
    }
    Ok(m)
}

/// Undecodable text is malformed content; anything else is a read failure.
fn read_error(source: io::Error, lineno: usize, origin: &Path) -> MatError {
    match source.kind() {
        io::ErrorKind::InvalidData => MatError::format(lineno, format!("Invalid text encoding: {source}")),
        _ => MatError::Io { path: origin.to_path_buf(), source },
    }
}

fn parse_header(line: &str, key: &str, lineno: usize) -> Result<usize> {
    let value = line
        .trim()
        .strip_prefix(key)
        .ok_or_else(|| MatError::format(lineno, HEADER_MSG))?;
    value
        .trim()
        .parse()
        .map_err(|_| MatError::format(lineno, "Invalid dimension values"))
}

fn parse_entry<T: Scalar>(line: &str, lineno: usize) -> Result<(i64, i64, T)> {
    let inner = line
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| MatError::format(lineno, format!("Invalid format: {line}")))?;
    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [row, col, value] = fields.as_slice() else {
        return Err(MatError::format(lineno, format!("Invalid element format: {line}")));
    };
    let numeric = || MatError::format(lineno, format!("Invalid numeric values in line: {line}"));
    Ok((
        row.parse().map_err(|_| numeric())?,
        col.parse().map_err(|_| numeric())?,
        value.parse().map_err(|_| numeric())?,
    ))
}

fn adjust_index(index: i64, bound: usize, axis: Axis, lineno: usize) -> Result<usize> {
    let mut index = index;
    if index >= 0 && index as u64 == bound as u64 {
        warn!("line {lineno}: {axis} index {index} equals the dimension, using {}", index - 1);
        index -= 1;
    }
    if index < 0 || index as u64 >= bound as u64 {
        return Err(MatError::index(axis, index, bound));
    }
    Ok(index as usize)
}

/// Write `m` in the coordinate-list format.
pub fn write_to<T: Scalar, W: Write>(m: &SparseMatrix<T>, mut w: W) -> io::Result<()> {
    write!(w, "{m}")?;
    w.flush()
}

/// Create (or truncate) `path` and write `m` into it.
pub fn write_matrix<T: Scalar>(m: &SparseMatrix<T>, path: &Path) -> Result<()> {
    let io_err = |source| MatError::Io { path: path.to_path_buf(), source };
    let file = File::create(path).map_err(io_err)?;
    write_to(m, BufWriter::new(file)).map_err(io_err)
}
