//! Tests for sparse matrix arithmetic, CSR export and file persistence.
//!
//! These tests exercise the public `SparseMatrix` API end to end: algebraic identities
//! (additive identity, subtraction inverse, transpose involution), the multiplication
//! shape contract, CSR layout, and save/load round trips through real files.
//!
//! Random matrices are checked against faer's dense product, compared with `approx`.

use approx::assert_abs_diff_eq;
use rand::Rng;
use spmat::{Axis, MatError, SparseMatrix};
use std::fs;

/// Builds a random `rows x cols` matrix with roughly `density` of its entries set
/// to small non-zero integers.
fn random_sparse(rows: usize, cols: usize, density: f64) -> SparseMatrix<i64> {
    let mut rng = rand::thread_rng();
    let mut m = SparseMatrix::new(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            if rng.r#gen::<f64>() < density {
                let v = rng.gen_range(1..=9) * if rng.r#gen::<bool>() { 1 } else { -1 };
                m.set_element(i, j, v).unwrap();
            }
        }
    }
    m
}

/// Asserts that two matrices have the same shape and agree at every coordinate.
fn assert_same_elements(a: &SparseMatrix<i64>, b: &SparseMatrix<i64>) {
    assert_eq!(a.shape(), b.shape());
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            assert_eq!(a.get_element(i, j), b.get_element(i, j), "mismatch at ({i}, {j})");
        }
    }
}

/// Saving and reloading a matrix preserves every element.
#[test]
fn save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.txt");
    let m = random_sparse(7, 5, 0.3);
    m.save_to_file(&path).unwrap();
    let back = SparseMatrix::<i64>::from_file(&path).unwrap();
    assert_same_elements(&m, &back);
    assert_eq!(back.nnz(), m.stored_len());
}

/// The saved text lists rows then columns in ascending order, one entry per line.
#[test]
fn saved_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let m = SparseMatrix::<i64>::from_triplets(3, 3, [(2, 1, 4), (0, 2, -1), (0, 0, 8)]).unwrap();
    m.save_to_file(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "rows=3\ncols=3\n(0, 0, 8)\n(0, 2, -1)\n(2, 1, 4)\n");
}

/// Writing into a directory that does not exist surfaces an I/O error naming the path.
#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("m.txt");
    let err = SparseMatrix::<i64>::new(1, 1).save_to_file(&path).unwrap_err();
    match err {
        MatError::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

/// A missing input file is reported as `FileNotFound`, not as a format problem.
#[test]
fn missing_file_is_distinct_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SparseMatrix::<i64>::from_file(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, MatError::FileNotFound { .. }));
}

/// Loading applies the off-by-one adjustment and rejects unparenthesised lines.
#[test]
fn load_rules_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let ok = dir.path().join("ok.txt");
    fs::write(&ok, "rows=4\ncols=2\n(4, 1, 3)\n\n(0, 2, 6)\n").unwrap();
    let m = SparseMatrix::<i64>::from_file(&ok).unwrap();
    assert_eq!(m.get_element(3, 1), 3);
    assert_eq!(m.get_element(0, 1), 6);

    let bad = dir.path().join("bad.txt");
    fs::write(&bad, "rows=4\ncols=2\n1,2,3\n").unwrap();
    assert!(matches!(SparseMatrix::<i64>::from_file(&bad), Err(MatError::Format { .. })));

    let binary = dir.path().join("binary.txt");
    fs::write(&binary, b"rows=2\ncols=2\n(0, 0, \xff)\n").unwrap();
    assert!(matches!(SparseMatrix::<i64>::from_file(&binary), Err(MatError::Format { line: 3, .. })));

    let oob = dir.path().join("oob.txt");
    fs::write(&oob, "rows=4\ncols=2\n(0, 5, 1)\n").unwrap();
    assert!(matches!(
        SparseMatrix::<i64>::from_file(&oob),
        Err(MatError::Index { axis: Axis::Column, index: 5, bound: 2 })
    ));

    let empty = dir.path().join("empty.txt");
    fs::write(&empty, "rows=0\ncols=0\n").unwrap();
    let m = SparseMatrix::<i64>::from_file(&empty).unwrap();
    assert_eq!(m.nnz(), 0);
    assert!(m.is_empty());
}

/// Adding an all-zero matrix of the same shape changes nothing.
#[test]
fn additive_identity() {
    let m = random_sparse(6, 4, 0.4);
    let zero = SparseMatrix::new(6, 4);
    assert_eq!(m.add(&zero).unwrap(), m);
}

/// `(A + B) - B == A` element-wise.
#[test]
fn subtraction_inverts_addition() {
    let a = random_sparse(5, 8, 0.3);
    let b = random_sparse(5, 8, 0.3);
    let back = a.add(&b).unwrap().subtract(&b).unwrap();
    assert_same_elements(&back, &a);
    assert_eq!(back, a);
}

/// Operands are left untouched by arithmetic.
#[test]
fn operands_are_not_mutated() {
    let a = random_sparse(4, 4, 0.5);
    let b = random_sparse(4, 4, 0.5);
    let (a0, b0) = (a.clone(), b.clone());
    let _ = a.add(&b).unwrap();
    let _ = a.subtract(&b).unwrap();
    let _ = a.multiply(&b).unwrap();
    let _ = a.transpose();
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

/// Transposing twice gives back the original matrix.
#[test]
fn transpose_involution() {
    let m = random_sparse(3, 9, 0.3);
    let t = m.transpose();
    assert_eq!(t.shape(), (9, 3));
    assert_same_elements(&t.transpose(), &m);
}

/// Multiplication requires inner dimensions to agree and yields `rows x other.cols`.
#[test]
fn multiply_dimension_check() {
    let a = SparseMatrix::<i64>::new(2, 3);
    let err = a.multiply(&SparseMatrix::new(4, 5)).unwrap_err();
    match err {
        MatError::Dimension(msg) => assert!(msg.contains("(3) must match second matrix rows (4)"), "{msg}"),
        other => panic!("expected Dimension error, got {other:?}"),
    }
    let c = a.multiply(&SparseMatrix::new(3, 5)).unwrap();
    assert_eq!(c.shape(), (2, 5));
}

/// The sparse product agrees with faer's dense product on random matrices.
#[test]
fn multiply_matches_dense_product() {
    let a = random_sparse(12, 9, 0.25);
    let b = random_sparse(9, 7, 0.25);
    let c = a.multiply(&b).unwrap();
    let dense = &a.to_dense_f64() * &b.to_dense_f64();
    assert_eq!(c.nnz(), c.stored_len());
    for i in 0..12 {
        for j in 0..7 {
            assert_abs_diff_eq!(c.get_element(i, j) as f64, dense[(i, j)], epsilon = 1e-12);
        }
    }
}

/// CSR export of a small fixed matrix.
#[test]
fn csr_correctness() {
    let m = SparseMatrix::<i64>::from_triplets(2, 3, [(0, 0, 5), (0, 2, 3), (1, 1, 7)]).unwrap();
    let (values, col_indices, row_ptr) = m.to_csr().into_parts();
    assert_eq!(values, vec![5, 3, 7]);
    assert_eq!(col_indices, vec![0, 2, 1]);
    assert_eq!(row_ptr, vec![0, 2, 3]);
}

/// CSR of a matrix without entries still has one row pointer per row plus one.
#[test]
fn csr_of_entry_free_matrix() {
    let (values, col_indices, row_ptr) = SparseMatrix::<i64>::new(2, 5).to_csr().into_parts();
    assert!(values.is_empty());
    assert!(col_indices.is_empty());
    assert_eq!(row_ptr, vec![0, 0, 0]);
}

/// CSR matrix-vector product matches the dense one.
#[test]
fn csr_spmv_matches_dense() {
    let m = random_sparse(8, 6, 0.4);
    let x: Vec<i64> = (1..=6).collect();
    let mut y = vec![0; 8];
    m.to_csr().spmv(&x, &mut y).unwrap();
    let dense = m.to_dense_f64();
    for i in 0..8 {
        let expected: f64 = (0..6).map(|j| dense[(i, j)] * x[j] as f64).sum();
        assert_abs_diff_eq!(y[i] as f64, expected, epsilon = 1e-12);
    }
}

/// Setting a coordinate to zero deletes it; reads past the edge are zero but writes fail.
#[test]
fn element_access_rules() {
    let mut m = SparseMatrix::<i64>::new(2, 2);
    m.set_element(1, 0, 3).unwrap();
    m.set_element(1, 0, 0).unwrap();
    assert_eq!(m.get_element(1, 0), 0);
    assert!(m.is_empty());

    assert_eq!(m.get_element(2, 0), 0);
    assert!(matches!(m.set_element(2, 0, 5), Err(MatError::Index { axis: Axis::Row, .. })));
}

/// Parsing from a string uses the same grammar as files.
#[test]
fn parse_from_str() {
    let m: SparseMatrix = "rows=2\ncols=2\n(0, 1, 12)\n".parse().unwrap();
    assert_eq!(m.get_element(0, 1), 12);
    assert_eq!(m.to_string().parse::<SparseMatrix>().unwrap(), m);
}
