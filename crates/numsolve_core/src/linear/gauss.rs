//! Gaussian elimination and Gauss-Jordan with partial pivoting.

use super::AugmentedMatrix;
use super::Matrix;
use crate::types::SolverError;
use tracing::trace;

/// Row in `col..n` with the largest `|a[row, col]|`; the earliest row wins ties.
fn pivot_row(m: &Matrix, col: usize, rows: impl Iterator<Item = usize>) -> (usize, f64) {
    let mut best = (col, m[(col, col)].abs());
    for row in rows {
        let magnitude = m[(row, col)].abs();
        if magnitude > best.1 {
            best = (row, magnitude);
        }
    }
    best
}

/// Partial-pivot column `col` of an augmented matrix in place.
fn select_pivot(m: &mut Matrix, col: usize, tolerance: f64) -> Result<(), SolverError> {
    let n = m.nrows();
    let (row, magnitude) = pivot_row(m, col, col + 1..n);
    if magnitude <= tolerance {
        return Err(SolverError::ZeroPivot { column: col });
    }
    if row != col {
        trace!(column = col, from = row, "row swap");
        m.swap_rows(row, col);
    }
    Ok(())
}

/// Subtract `factor * row(source)` from `row(target)`, columns `from..`.
fn eliminate(m: &mut Matrix, source: usize, target: usize, factor: f64, from: usize) {
    for j in from..m.ncols() {
        let value = m[(source, j)];
        m[(target, j)] -= factor * value;
    }
}

/// Solve an upper-triangular augmented matrix.
pub(crate) fn back_substitution(m: &Matrix) -> Vec<f64> {
    let n = m.nrows();
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let sum: f64 = (i + 1..n).map(|j| m[(i, j)] * x[j]).sum();
        x[i] = (m[(i, n)] - sum) / m[(i, i)];
    }
    x
}

/// Forward elimination below each pivot, then back substitution.
pub(crate) fn gauss(system: AugmentedMatrix) -> Result<Vec<f64>, SolverError> {
    let tolerance = system.pivot_tolerance();
    let mut m = system.into_matrix();
    let n = m.nrows();

    for col in 0..n {
        select_pivot(&mut m, col, tolerance)?;
        for row in col + 1..n {
            let factor = m[(row, col)] / m[(col, col)];
            if factor != 0.0 {
                eliminate(&mut m, col, row, factor, col);
            }
        }
    }

    Ok(back_substitution(&m))
}

/// Normalise each pivot row and eliminate the column from every other row.
///
/// On completion the coefficient block is the identity and the last column
/// holds the solution.
pub(crate) fn gauss_jordan(system: AugmentedMatrix) -> Result<Vec<f64>, SolverError> {
    let tolerance = system.pivot_tolerance();
    let mut m = system.into_matrix();
    let n = m.nrows();

    for col in 0..n {
        select_pivot(&mut m, col, tolerance)?;
        let pivot = m[(col, col)];
        for value in &mut m.row_mut(col)[col..] {
            *value /= pivot;
        }
        for row in (0..n).filter(|&r| r != col) {
            let factor = m[(row, col)];
            if factor != 0.0 {
                eliminate(&mut m, col, row, factor, col);
            }
        }
    }

    Ok((0..n).map(|i| m[(i, n)]).collect())
}
