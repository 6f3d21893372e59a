//! Jacobi and Gauss-Seidel iteration.
//!
//! Both sweep `x_i = (b_i - Σ_{j≠i} a_ij x_j) / a_ii` until the largest
//! component change is `<= tolerance`. Jacobi reads only the previous
//! iterate; Gauss-Seidel reuses components already updated in the sweep.
//! Convergence is guaranteed for strictly diagonally dominant systems; for
//! others the run may exhaust its budget, which is reported, not an error.

use super::{AugmentedMatrix, LinearMethod};
use crate::config::SolverConfig;
use crate::report::IterationTrace;
use crate::types::SolverError;
use tracing::{trace, warn};

/// Result of an iterative run before it is wrapped in a report.
#[derive(Debug, Clone)]
pub(crate) struct Sweeps {
    pub initial_guess: Vec<f64>,
    pub trace: IterationTrace<Vec<f64>>,
    pub solution: Vec<f64>,
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Update {
    Simultaneous,
    InPlace,
}

pub(crate) fn jacobi(
    system: &AugmentedMatrix,
    initial_guess: Option<&[f64]>,
    config: &SolverConfig,
) -> Result<Sweeps, SolverError> {
    iterate(LinearMethod::Jacobi, Update::Simultaneous, system, initial_guess, config)
}

pub(crate) fn gauss_seidel(
    system: &AugmentedMatrix,
    initial_guess: Option<&[f64]>,
    config: &SolverConfig,
) -> Result<Sweeps, SolverError> {
    iterate(LinearMethod::GaussSeidel, Update::InPlace, system, initial_guess, config)
}

fn checked_guess(n: usize, initial_guess: Option<&[f64]>) -> Result<Vec<f64>, SolverError> {
    match initial_guess {
        None => Ok(vec![0.0; n]),
        Some(guess) if guess.len() != n => Err(SolverError::invalid_input(format!(
            "initial guess has {} entries, expected {}",
            guess.len(),
            n
        ))),
        Some(guess) if guess.iter().any(|v| !v.is_finite()) => {
            Err(SolverError::invalid_input("initial guess is not finite"))
        }
        Some(guess) => Ok(guess.to_vec()),
    }
}

fn iterate(
    method: LinearMethod,
    update: Update,
    system: &AugmentedMatrix,
    initial_guess: Option<&[f64]>,
    config: &SolverConfig,
) -> Result<Sweeps, SolverError> {
    let n = system.order();
    let m = system.as_matrix();
    let guess = checked_guess(n, initial_guess)?;

    let tolerance = system.pivot_tolerance();
    if let Some(row) = (0..n).find(|&i| m[(i, i)].abs() <= tolerance) {
        return Err(SolverError::ZeroDiagonal { row });
    }

    let mut x = guess.clone();
    let mut trace = IterationTrace::new();
    let mut converged = false;

    for sweep in 0..config.max_iterations {
        let previous = x.clone();
        for i in 0..n {
            let source = match update {
                Update::Simultaneous => &previous,
                Update::InPlace => &x,
            };
            let off_diagonal: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| m[(i, j)] * source[j])
                .sum();
            x[i] = (m[(i, n)] - off_diagonal) / m[(i, i)];
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::NonFinite {
                method: method.title().to_string(),
            });
        }

        let error = x
            .iter()
            .zip(&previous)
            .fold(0.0_f64, |e, (new, old)| e.max((new - old).abs()));
        trace!(%method, sweep, error, "sweep");
        trace.push(x.clone(), error);

        if error <= config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(%method, iterations = config.max_iterations, "iteration budget exhausted");
    }

    Ok(Sweeps {
        initial_guess: guess,
        trace,
        solution: x,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dominant() -> AugmentedMatrix {
        AugmentedMatrix::from_rows(&[
            vec![4.0, 1.0, 2.0, 4.0],
            vec![1.0, 5.0, 1.0, 7.0],
            vec![2.0, 1.0, 3.0, 3.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_jacobi_first_sweep_from_zero() {
        let config = SolverConfig::new(1e-10, 1);
        let sweeps = jacobi(&dominant(), None, &config).unwrap();
        assert_eq!(sweeps.initial_guess, vec![0.0; 3]);
        assert_eq!(sweeps.trace.entries()[0].iterate, vec![1.0, 1.4, 1.0]);
        assert_eq!(sweeps.trace.entries()[0].error, 1.4);
        assert!(!sweeps.converged);
    }

    #[test]
    fn test_gauss_seidel_first_sweep_uses_updates() {
        let config = SolverConfig::new(1e-10, 1);
        let sweeps = gauss_seidel(&dominant(), None, &config).unwrap();
        let x = &sweeps.trace.entries()[0].iterate;
        // x0 = 1, x1 = (7 - 1) / 5 = 1.2, x2 = (3 - 2 - 1.2) / 3
        assert_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 1.2, epsilon = 1e-15);
        assert_relative_eq!(x[2], -0.2 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_both_converge() {
        let config = SolverConfig::new(1e-10, 200);
        let j = jacobi(&dominant(), None, &config).unwrap();
        let gs = gauss_seidel(&dominant(), None, &config).unwrap();
        assert!(j.converged && gs.converged);
        assert!(gs.trace.len() <= j.trace.len());
        for (a, b) in j.solution.iter().zip(&gs.solution) {
            assert_relative_eq!(*a, *b, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_exact_guess_converges_in_one_sweep() {
        let system = AugmentedMatrix::from_rows(&[vec![2.0, 1.0, 3.0], vec![1.0, 3.0, 4.0]]).unwrap();
        let sweeps = jacobi(&system, Some(&[1.0, 1.0]), &SolverConfig::default()).unwrap();
        assert_eq!(sweeps.trace.len(), 1);
        assert_eq!(sweeps.solution, vec![1.0, 1.0]);
        assert!(sweeps.converged);
    }

    #[test]
    fn test_zero_diagonal() {
        let system = AugmentedMatrix::from_rows(&[vec![0.0, 1.0, 1.0], vec![1.0, 0.0, 1.0]]).unwrap();
        assert_eq!(
            jacobi(&system, None, &SolverConfig::default()).unwrap_err(),
            SolverError::ZeroDiagonal { row: 0 }
        );
    }

    #[test]
    fn test_guess_length_checked() {
        let err = gauss_seidel(&dominant(), Some(&[0.0]), &SolverConfig::default()).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_divergent_system_exhausts_budget() {
        // Not diagonally dominant: Jacobi grows by a factor of 2 per sweep.
        let system = AugmentedMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![2.0, 1.0, 3.0]]).unwrap();
        let config = SolverConfig::new(1e-6, 20);
        let sweeps = jacobi(&system, None, &config).unwrap();
        assert!(!sweeps.converged);
        assert_eq!(sweeps.trace.len(), 20);
    }
}
