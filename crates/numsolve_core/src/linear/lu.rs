//! LU decomposition with an index map instead of physical row swaps.

use super::{AugmentedMatrix, Matrix, Permutation};
use crate::types::SolverError;
use tracing::trace;

/// Packed LU factors of a square matrix, reusable across right-hand sides.
///
/// Physical rows are never moved: logical row `k` lives in physical row
/// `row_map[k]`. Above and on the diagonal (in logical order) the storage
/// holds `U`; below it holds the multipliers of the unit lower factor `L`.
///
/// # Example
///
/// ```
/// use numsolve_core::linear::{LuDecomposition, Matrix};
///
/// let a = Matrix::from_rows(&[vec![0.0, 2.0], vec![3.0, 1.0]]).unwrap();
/// let lu = LuDecomposition::decompose(a).unwrap();
///
/// assert_eq!(lu.row_map().as_slice(), &[1, 0]);
/// let x = lu.solve(&[4.0, 5.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    factors: Matrix,
    row_map: Permutation,
}

impl LuDecomposition {
    /// Factor a square matrix in place.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the matrix is not square
    /// - `ZeroPivot` if some column has no pivot above
    ///   `n * f64::EPSILON * max|a_ij|`
    pub fn decompose(a: Matrix) -> Result<Self, SolverError> {
        if a.nrows() != a.ncols() || a.nrows() == 0 {
            return Err(SolverError::invalid_input(format!(
                "LU needs a non-empty square matrix, got [{}, {}]",
                a.nrows(),
                a.ncols()
            )));
        }
        let n = a.nrows();
        let tolerance = n as f64 * f64::EPSILON * a.max_abs();
        Self::factor(a, n, tolerance)
    }

    /// Factor the coefficient block of an augmented system.
    pub fn from_system(system: &AugmentedMatrix) -> Result<Self, SolverError> {
        Self::factor(system.coefficients(), system.order(), system.pivot_tolerance())
    }

    fn factor(mut factors: Matrix, n: usize, tolerance: f64) -> Result<Self, SolverError> {
        let mut row_map = Permutation::identity(n);

        for k in 0..n {
            let (best, magnitude) = logical_pivot(&factors, &row_map, k);
            if magnitude <= tolerance {
                return Err(SolverError::ZeroPivot { column: k });
            }
            if best != k {
                trace!(column = k, from = best, "index map swap");
                row_map.swap(k, best);
            }

            let pivot_row = row_map[k];
            let pivot = factors[(pivot_row, k)];
            for i in k + 1..n {
                let row = row_map[i];
                let factor = factors[(row, k)] / pivot;
                factors[(row, k)] = factor;
                for j in k + 1..n {
                    let value = factors[(pivot_row, j)];
                    factors[(row, j)] -= factor * value;
                }
            }
        }

        Ok(Self { factors, row_map })
    }

    /// Solve `A x = b` by forward substitution `L y = P b` then back
    /// substitution `U x = y`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `rhs` has the wrong length or non-finite entries.
    pub fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>, SolverError> {
        let n = self.order();
        if rhs.len() != n {
            return Err(SolverError::invalid_input(format!(
                "right-hand side has {} entries, expected {}",
                rhs.len(),
                n
            )));
        }
        if rhs.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::invalid_input("right-hand side is not finite"));
        }

        let mut y = self.row_map.apply(rhs);
        for i in 0..n {
            let row = self.row_map[i];
            let sum: f64 = (0..i).map(|j| self.factors[(row, j)] * y[j]).sum();
            y[i] -= sum;
        }

        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let row = self.row_map[i];
            let sum: f64 = (i + 1..n).map(|j| self.factors[(row, j)] * x[j]).sum();
            x[i] = (y[i] - sum) / self.factors[(row, i)];
        }
        Ok(x)
    }

    /// Number of unknowns.
    pub fn order(&self) -> usize {
        self.factors.nrows()
    }

    /// Logical-to-physical row map chosen by pivoting.
    pub fn row_map(&self) -> &Permutation {
        &self.row_map
    }

    /// Packed factors in physical row order.
    pub fn factors(&self) -> &Matrix {
        &self.factors
    }

    /// Determinant: product of the `U` diagonal, signed by the map parity.
    pub fn determinant(&self) -> f64 {
        let product: f64 = (0..self.order())
            .map(|k| self.factors[(self.row_map[k], k)])
            .product();
        if self.row_map.is_odd() {
            -product
        } else {
            product
        }
    }
}

/// Largest `|a[row_map[i], k]|` over logical rows `k..n`; earliest wins ties.
fn logical_pivot(factors: &Matrix, row_map: &Permutation, k: usize) -> (usize, f64) {
    let mut best = (k, factors[(row_map[k], k)].abs());
    for i in k + 1..factors.nrows() {
        let magnitude = factors[(row_map[i], k)].abs();
        if magnitude > best.1 {
            best = (i, magnitude);
        }
    }
    best
}

pub(crate) fn lu(system: AugmentedMatrix) -> Result<Vec<f64>, SolverError> {
    let rhs = system.rhs();
    LuDecomposition::from_system(&system)?.solve(&rhs)
}
