//! Linear-system method enumeration, dispatch and solver driver.

use super::gauss::{gauss, gauss_jordan};
use super::iterative::{gauss_seidel, jacobi, Sweeps};
use super::lu::lu;
use super::AugmentedMatrix;
use crate::config::SolverConfig;
use crate::report::{IterationTrace, LinearReport};
use crate::types::SolverError;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, debug_span};

/// Available linear-system methods.
///
/// # Examples
///
/// ```
/// use numsolve_core::linear::LinearMethod;
///
/// let method: LinearMethod = "gauss-seidel".parse().unwrap();
/// assert!(method.is_iterative());
/// assert_eq!(method.title(), "Gauss-Seidel");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LinearMethod {
    /// Gaussian elimination with partial pivoting and back substitution.
    Gauss,
    /// Gauss-Jordan elimination to reduced row echelon form.
    GaussJordan,
    /// LU decomposition with an index map.
    #[cfg_attr(feature = "serde", serde(rename = "lu"))]
    LuDecomposition,
    /// Jacobi iteration.
    Jacobi,
    /// Gauss-Seidel iteration.
    GaussSeidel,
}

impl LinearMethod {
    /// Every method, in menu order.
    pub const ALL: [LinearMethod; 5] = [
        LinearMethod::Gauss,
        LinearMethod::GaussJordan,
        LinearMethod::LuDecomposition,
        LinearMethod::Jacobi,
        LinearMethod::GaussSeidel,
    ];

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            LinearMethod::Gauss => "Gauss Elimination",
            LinearMethod::GaussJordan => "Gauss-Jordan",
            LinearMethod::LuDecomposition => "LU Decomposition",
            LinearMethod::Jacobi => "Jacobi",
            LinearMethod::GaussSeidel => "Gauss-Seidel",
        }
    }

    /// Short kebab-case identifier, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            LinearMethod::Gauss => "gauss",
            LinearMethod::GaussJordan => "gauss-jordan",
            LinearMethod::LuDecomposition => "lu",
            LinearMethod::Jacobi => "jacobi",
            LinearMethod::GaussSeidel => "gauss-seidel",
        }
    }

    /// Returns `true` for Jacobi and Gauss-Seidel.
    pub fn is_iterative(&self) -> bool {
        matches!(self, LinearMethod::Jacobi | LinearMethod::GaussSeidel)
    }

    /// Solve `system` with this method.
    ///
    /// Direct methods consume the system; clone it first to run several
    /// methods on the same input. `initial_guess` and `config` only affect
    /// iterative methods (the guess defaults to zeros).
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a bad initial guess or config
    /// - `ZeroPivot` when a direct method meets a singular matrix
    /// - `ZeroDiagonal` when an iterative method meets a zero diagonal
    /// - `NonFinite` when an iterative method overflows
    ///
    /// # Example
    ///
    /// ```
    /// use numsolve_core::linear::{AugmentedMatrix, LinearMethod};
    /// use numsolve_core::SolverConfig;
    ///
    /// let system = AugmentedMatrix::from_rows(&[
    ///     vec![2.0, 1.0, 3.0],
    ///     vec![1.0, 3.0, 4.0],
    /// ]).unwrap();
    ///
    /// let report = LinearMethod::Gauss
    ///     .solve(system, None, &SolverConfig::default())
    ///     .unwrap();
    /// assert!((report.solution[0] - 1.0).abs() < 1e-12);
    /// assert!(report.trace.is_empty());
    /// ```
    pub fn solve(
        self,
        system: AugmentedMatrix,
        initial_guess: Option<&[f64]>,
        config: &SolverConfig,
    ) -> Result<LinearReport, SolverError> {
        let span = debug_span!("linear_solve", method = self.name(), order = system.order());
        let _enter = span.enter();

        let start = Instant::now();
        let report = if self.is_iterative() {
            config.validate().map_err(SolverError::InvalidInput)?;
            let sweeps = match self {
                LinearMethod::Jacobi => jacobi(&system, initial_guess, config)?,
                _ => gauss_seidel(&system, initial_guess, config)?,
            };
            let Sweeps {
                initial_guess,
                trace,
                solution,
                converged,
            } = sweeps;
            LinearReport {
                method: self,
                title: self.title().to_string(),
                solution,
                initial_guess,
                trace,
                error_bound: config.tolerance,
                converged,
                elapsed: start.elapsed(),
            }
        } else {
            let solution = match self {
                LinearMethod::Gauss => gauss(system)?,
                LinearMethod::GaussJordan => gauss_jordan(system)?,
                _ => lu(system)?,
            };
            LinearReport {
                method: self,
                title: self.title().to_string(),
                solution,
                initial_guess: Vec::new(),
                trace: IterationTrace::new(),
                error_bound: 0.0,
                converged: true,
                elapsed: start.elapsed(),
            }
        };

        debug!(
            solution = ?report.solution,
            iterations = report.iterations(),
            converged = report.converged,
            "solve finished"
        );
        Ok(report)
    }
}

impl fmt::Display for LinearMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LinearMethod {
    type Err = String;

    /// Parses a method name (case-insensitive, `-`/`_`/space ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "gauss" | "gausselimination" => Ok(LinearMethod::Gauss),
            "gaussjordan" => Ok(LinearMethod::GaussJordan),
            "lu" | "ludecomposition" => Ok(LinearMethod::LuDecomposition),
            "jacobi" => Ok(LinearMethod::Jacobi),
            "gaussseidel" | "seidel" => Ok(LinearMethod::GaussSeidel),
            _ => Err(format!("Unknown linear-system method: {}", s)),
        }
    }
}

/// Linear solver bound to one method and configuration.
///
/// # Example
///
/// ```
/// use numsolve_core::linear::{AugmentedMatrix, LinearMethod, LinearSolver};
///
/// let system = AugmentedMatrix::from_rows(&[
///     vec![4.0, 1.0, 5.0],
///     vec![1.0, 3.0, 4.0],
/// ]).unwrap();
///
/// let solver = LinearSolver::with_defaults(LinearMethod::GaussSeidel);
/// let report = solver.solve(system).unwrap();
/// assert!(report.converged);
/// assert!(report.history_matrix().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSolver {
    method: LinearMethod,
    config: SolverConfig,
    initial_guess: Option<Vec<f64>>,
}

impl LinearSolver {
    /// Create a solver with the given method and configuration.
    pub fn new(method: LinearMethod, config: SolverConfig) -> Self {
        Self {
            method,
            config,
            initial_guess: None,
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults(method: LinearMethod) -> Self {
        Self::new(method, SolverConfig::default())
    }

    /// Start iterative methods from `guess` instead of zeros.
    pub fn with_initial_guess(mut self, guess: Vec<f64>) -> Self {
        self.initial_guess = Some(guess);
        self
    }

    /// Selected method.
    pub fn method(&self) -> LinearMethod {
        self.method
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve `system`. See [`LinearMethod::solve`].
    pub fn solve(&self, system: AugmentedMatrix) -> Result<LinearReport, SolverError> {
        self.method
            .solve(system, self.initial_guess.as_deref(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn system() -> AugmentedMatrix {
        AugmentedMatrix::from_rows(&[
            vec![4.0, 1.0, 2.0, 4.0],
            vec![1.0, 5.0, 1.0, 7.0],
            vec![2.0, 1.0, 3.0, 3.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_name_round_trip() {
        for method in LinearMethod::ALL {
            assert_eq!(method.to_string().parse::<LinearMethod>(), Ok(method));
        }
        assert!("cholesky".parse::<LinearMethod>().is_err());
    }

    #[test]
    fn test_all_methods_agree() {
        let config = SolverConfig::new(1e-12, 500);
        let reference = LinearMethod::Gauss.solve(system(), None, &config).unwrap();
        for method in LinearMethod::ALL {
            let report = method.solve(system(), None, &config).unwrap();
            assert!(report.converged, "{} did not converge", method);
            for (a, b) in report.solution.iter().zip(&reference.solution) {
                assert_relative_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_direct_report_shape() {
        let report = LinearMethod::LuDecomposition
            .solve(system(), None, &SolverConfig::default())
            .unwrap();
        assert_eq!(report.title, "LU Decomposition");
        assert_eq!(report.iterations(), 0);
        assert!(report.initial_guess.is_empty());
        assert!(report.history_matrix().is_none());
    }

    #[test]
    fn test_iterative_history_columns() {
        let config = SolverConfig::new(1e-6, 50);
        let report = LinearMethod::Jacobi.solve(system(), None, &config).unwrap();
        let history = report.history_matrix().unwrap();
        assert_eq!(history.nrows(), 3);
        assert_eq!(history.ncols(), report.iterations() + 1);
        assert!(history.ncols() <= config.max_iterations + 1);
        assert_eq!(report.error_bound, 1e-6);
    }

    #[test]
    fn test_invalid_config_for_iterative() {
        let config = SolverConfig {
            tolerance: 0.0,
            max_iterations: 5,
        };
        let err = LinearMethod::GaussSeidel
            .solve(system(), None, &config)
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_solver_initial_guess() {
        let solver = LinearSolver::new(LinearMethod::Jacobi, SolverConfig::new(1e-9, 100))
            .with_initial_guess(vec![1.0, 1.0, 1.0]);
        let report = solver.solve(system()).unwrap();
        assert_eq!(report.initial_guess, vec![1.0, 1.0, 1.0]);
        assert_eq!(solver.method(), LinearMethod::Jacobi);
        assert_eq!(solver.config().max_iterations, 100);
    }
}
