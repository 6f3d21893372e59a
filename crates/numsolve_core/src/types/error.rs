//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from root-finding and linear-system solvers
//! - `ErrorKind`: The two failure categories a solve call can report
//!
//! Slow convergence is never an error: a solver that exhausts its iteration
//! budget still returns its report, flagged as not converged.

use thiserror::Error;

/// Failure category of a [`SolverError`].
///
/// # Variants
/// - `Precondition`: Inputs rejected before any iteration ran
/// - `NumericDegeneracy`: A step would divide by zero or left the finite reals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Caller error detected up front (bracket, argument count, shape).
    Precondition,

    /// Zero pivot, zero derivative, zero denominator or non-finite iterate.
    NumericDegeneracy,
}

/// Solver errors.
///
/// Any partial iteration trace is discarded when one of these is returned.
///
/// # Examples
/// ```
/// use numsolve_core::types::{ErrorKind, SolverError};
///
/// let err = SolverError::NoSignChange { xl: 1.0, xu: 2.0 };
/// assert_eq!(err.kind(), ErrorKind::Precondition);
/// assert!(format!("{}", err).contains("no sign change"));
///
/// let err = SolverError::ZeroPivot { column: 2 };
/// assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Function values at the bracket endpoints have the same strict sign.
    #[error("no sign change in bracket [{xl}, {xu}]")]
    NoSignChange {
        /// Lower bracket endpoint
        xl: f64,
        /// Upper bracket endpoint
        xu: f64,
    },

    /// Both bracket endpoints are the same point.
    #[error("empty bracket: both endpoints equal {x}")]
    EmptyBracket {
        /// The repeated endpoint
        x: f64,
    },

    /// Wrong number of initial arguments for the selected method.
    #[error("{method} expects {expected} initial argument(s), got {got}")]
    ArgumentCount {
        /// Method display name
        method: String,
        /// Number of arguments the method needs
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },

    /// The method needs polynomial coefficients the expression cannot provide.
    #[error("expression is not a polynomial: {0}")]
    NotPolynomial(String),

    /// Malformed input (matrix shape, vector length, non-finite values).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Derivative evaluated to zero (Newton-type step undefined).
    #[error("derivative is zero at x = {x}")]
    ZeroDerivative {
        /// The x value where the derivative vanished
        x: f64,
    },

    /// A step formula's denominator evaluated to zero.
    #[error("zero denominator in {method} step at x = {x}")]
    ZeroDenominator {
        /// Method display name
        method: String,
        /// Current iterate
        x: f64,
    },

    /// No usable pivot in a column: the system is singular.
    #[error("zero pivot in column {column}: matrix is singular")]
    ZeroPivot {
        /// Column being eliminated
        column: usize,
    },

    /// Zero on the diagonal of an iterative system.
    #[error("zero diagonal element in row {row}")]
    ZeroDiagonal {
        /// Offending row
        row: usize,
    },

    /// An iterate left the finite reals.
    #[error("{method} produced a non-finite value")]
    NonFinite {
        /// Method display name
        method: String,
    },
}

impl SolverError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolverError::NoSignChange { .. }
            | SolverError::EmptyBracket { .. }
            | SolverError::ArgumentCount { .. }
            | SolverError::NotPolynomial(_)
            | SolverError::InvalidInput(_) => ErrorKind::Precondition,
            SolverError::ZeroDerivative { .. }
            | SolverError::ZeroDenominator { .. }
            | SolverError::ZeroPivot { .. }
            | SolverError::ZeroDiagonal { .. }
            | SolverError::NonFinite { .. } => ErrorKind::NumericDegeneracy,
        }
    }

    /// Returns `true` for errors detected before iterating.
    pub fn is_precondition(&self) -> bool {
        self.kind() == ErrorKind::Precondition
    }

    /// Returns `true` for zero-division and non-finite failures.
    pub fn is_degenerate(&self) -> bool {
        self.kind() == ErrorKind::NumericDegeneracy
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        SolverError::InvalidInput(msg.into())
    }
}
