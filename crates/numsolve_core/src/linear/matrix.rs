//! Dense row-major matrices and the augmented `[A | b]` system form.

use crate::types::SolverError;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Dense row-major `rows x cols` matrix of `f64`.
///
/// # Example
///
/// ```
/// use numsolve_core::linear::Matrix;
///
/// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(m[(1, 0)], 3.0);
/// assert_eq!(m.mul_vec(&[1.0, 1.0]), vec![3.0, 7.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build from row vectors of equal length.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if there are no rows, rows are empty or ragged, or any
    /// entry is not finite.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, SolverError> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(SolverError::invalid_input("matrix has no entries"));
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(SolverError::invalid_input(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
                return Err(SolverError::invalid_input(format!(
                    "row {} contains a non-finite entry {}",
                    i, bad
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Row `i` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols.max(1))
    }

    /// Exchange rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// Matrix-vector product `self * x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != self.ncols()`.
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.cols, "vector length must match column count");
        self.rows()
            .map(|row| row.iter().zip(x).map(|(a, b)| a * b).sum())
            .collect()
    }

    /// Largest absolute entry, 0 for an all-zero matrix.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |m, v| m.max(v.abs()))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>12.6}", v)).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

/// A square system stored as one `[n, n+1]` matrix `[A | b]`.
///
/// Direct solvers take it by value and eliminate in place; clone it to run
/// several methods on the same system. Iterative solvers only borrow it.
///
/// # Example
///
/// ```
/// use numsolve_core::linear::AugmentedMatrix;
///
/// let system = AugmentedMatrix::from_parts(
///     &[vec![2.0, 1.0], vec![1.0, 3.0]],
///     &[3.0, 5.0],
/// ).unwrap();
/// assert_eq!(system.order(), 2);
/// assert_eq!(system.rhs(), vec![3.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AugmentedMatrix {
    matrix: Matrix,
}

impl AugmentedMatrix {
    /// Wrap an existing matrix, checking it is `[n, n+1]` with `n >= 1`.
    pub fn new(matrix: Matrix) -> Result<Self, SolverError> {
        if matrix.ncols() != matrix.nrows() + 1 {
            return Err(SolverError::invalid_input(format!(
                "augmented matrix must be [n, n+1], got [{}, {}]",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        Ok(Self { matrix })
    }

    /// Build from `n` rows of `n + 1` entries each.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, SolverError> {
        Self::new(Matrix::from_rows(rows)?)
    }

    /// Build from an `[n, n]` coefficient matrix and an `n`-vector right-hand side.
    pub fn from_parts(coefficients: &[Vec<f64>], rhs: &[f64]) -> Result<Self, SolverError> {
        if coefficients.len() != rhs.len() {
            return Err(SolverError::invalid_input(format!(
                "{} coefficient rows but {} right-hand side entries",
                coefficients.len(),
                rhs.len()
            )));
        }
        let rows: Vec<Vec<f64>> = coefficients
            .iter()
            .zip(rhs)
            .map(|(row, &b)| {
                let mut row = row.clone();
                row.push(b);
                row
            })
            .collect();
        Self::from_rows(&rows)
    }

    /// Number of unknowns `n`.
    #[inline]
    pub fn order(&self) -> usize {
        self.matrix.nrows()
    }

    /// Coefficient block `A` as a new `[n, n]` matrix.
    pub fn coefficients(&self) -> Matrix {
        let n = self.order();
        let mut a = Matrix::zeros(n, n);
        for i in 0..n {
            a.row_mut(i).copy_from_slice(&self.matrix.row(i)[..n]);
        }
        a
    }

    /// Right-hand side column `b`.
    pub fn rhs(&self) -> Vec<f64> {
        let n = self.order();
        (0..n).map(|i| self.matrix[(i, n)]).collect()
    }

    /// Magnitude at or below which a pivot counts as zero:
    /// `n * f64::EPSILON * max|a_ij|` over the coefficient block.
    pub fn pivot_tolerance(&self) -> f64 {
        let n = self.order();
        let scale = self
            .matrix
            .rows()
            .flat_map(|row| row[..n].iter())
            .fold(0.0_f64, |m, v| m.max(v.abs()));
        n as f64 * f64::EPSILON * scale
    }

    /// The underlying `[n, n+1]` matrix.
    pub fn as_matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub(crate) fn into_matrix(self) -> Matrix {
        self.matrix
    }
}

impl TryFrom<Matrix> for AugmentedMatrix {
    type Error = SolverError;

    fn try_from(matrix: Matrix) -> Result<Self, Self::Error> {
        Self::new(matrix)
    }
}
