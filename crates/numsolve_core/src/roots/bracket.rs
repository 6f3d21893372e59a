//! Bracketing methods: bisection and regula falsi.
//!
//! Both require a sign change over `[xl, xu]` and keep the root bracketed,
//! so every estimate lies inside the current interval.

use super::iteration::{bracket_iteration, checked_bracket, ensure_nonzero, Stage};
use super::RootMethod;
use crate::config::SolverConfig;
use crate::expression::Expression;
use crate::types::SolverError;

/// Halve the bracket each step: `xr = (xl + xu) / 2`.
pub(crate) fn bisection(
    f: &dyn Expression,
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> Result<Stage, SolverError> {
    let (xl, xu) = checked_bracket(f, a, b)?;
    bracket_iteration(RootMethod::Bisection, f, xl, xu, config, |xl, xu, _, _| {
        Ok((xl + xu) / 2.0)
    })
}

/// False position: `xr = (xl·f(xu) - xu·f(xl)) / (f(xu) - f(xl))`.
pub(crate) fn regula_falsi(
    f: &dyn Expression,
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> Result<Stage, SolverError> {
    let method = RootMethod::RegulaFalsi;
    let (xl, xu) = checked_bracket(f, a, b)?;
    bracket_iteration(method, f, xl, xu, config, |xl, xu, fl, fu| {
        let denominator = ensure_nonzero(method, fu - fl, xl)?;
        Ok((xl * fu - xu * fl) / denominator)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Polynomial;
    use approx::assert_relative_eq;

    fn cubic() -> Polynomial {
        // x³ - x - 2, single real root near 1.5214
        Polynomial::new(vec![1.0, 0.0, -1.0, -2.0])
    }

    #[test]
    fn test_bisection_converges() {
        let stage = bisection(&cubic(), 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert!(stage.converged);
        assert_relative_eq!(stage.root, 1.521_379_706_804_567_6, epsilon = 1e-4);
        assert!(stage.error <= 1e-5);
    }

    #[test]
    fn test_bisection_first_error_is_bracket_width() {
        let stage = bisection(&cubic(), 1.0, 2.0, &SolverConfig::default()).unwrap();
        let first = &stage.trace.entries()[0];
        assert_eq!(first.iterate, 1.5);
        assert_eq!(first.error, 1.0);
        // Subsequent errors halve.
        assert_eq!(stage.trace.entries()[1].error, 0.25);
    }

    #[test]
    fn test_bisection_orders_arguments() {
        let forward = bisection(&cubic(), 1.0, 2.0, &SolverConfig::default()).unwrap();
        let reversed = bisection(&cubic(), 2.0, 1.0, &SolverConfig::default()).unwrap();
        assert_eq!(forward.root, reversed.root);
        assert_eq!(forward.trace, reversed.trace);
    }

    #[test]
    fn test_bisection_exact_midpoint_root() {
        // x² - 4 on [0, 4]: midpoint is the root
        let f = Polynomial::new(vec![1.0, 0.0, -4.0]);
        let stage = bisection(&f, 0.0, 4.0, &SolverConfig::default()).unwrap();
        assert_eq!(stage.trace.len(), 1);
        assert_eq!(stage.root, 2.0);
        assert_eq!(stage.error, 0.0);
    }

    #[test]
    fn test_bisection_endpoint_root() {
        // f(x) = x on [0, 2]: the lower endpoint is the root
        let f = Polynomial::new(vec![1.0, 0.0]);
        let stage = bisection(&f, 0.0, 2.0, &SolverConfig::default()).unwrap();
        assert_eq!(stage.root, 0.0);
        assert_eq!(stage.error, 0.0);
    }

    #[test]
    fn test_bisection_no_sign_change() {
        let f = Polynomial::new(vec![1.0, 0.0, 1.0]);
        let err = bisection(&f, 1.0, 2.0, &SolverConfig::default()).unwrap_err();
        assert_eq!(err, SolverError::NoSignChange { xl: 1.0, xu: 2.0 });
    }

    #[test]
    fn test_tiny_function_without_sign_change() {
        // 1e-200·(x² + 1): f(1)·f(2) underflows to zero
        let f = Polynomial::new(vec![1e-200, 0.0, 1e-200]);
        let err = bisection(&f, 1.0, 2.0, &SolverConfig::default()).unwrap_err();
        assert_eq!(err, SolverError::NoSignChange { xl: 1.0, xu: 2.0 });
        let err = regula_falsi(&f, 1.0, 2.0, &SolverConfig::default()).unwrap_err();
        assert_eq!(err, SolverError::NoSignChange { xl: 1.0, xu: 2.0 });
    }

    #[test]
    fn test_tiny_function_is_bracketed_not_exact() {
        // 1e-200·(x - 1.3): no endpoint is a root
        let f = Polynomial::new(vec![1e-200, -1.3e-200]);
        let stage = bisection(&f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert!(stage.converged);
        assert!(stage.trace.len() > 1);
        assert_eq!(stage.trace.entries()[0].error, 1.0);
        assert_relative_eq!(stage.root, 1.3, epsilon = 1e-5);

        let stage = regula_falsi(&f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert!(stage.converged);
        assert_relative_eq!(stage.root, 1.3, epsilon = 1e-10);
    }

    #[test]
    fn test_empty_bracket() {
        let err = bisection(&cubic(), 1.5, 1.5, &SolverConfig::default()).unwrap_err();
        assert_eq!(err, SolverError::EmptyBracket { x: 1.5 });
    }

    #[test]
    fn test_regula_falsi_converges() {
        let stage = regula_falsi(&cubic(), 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert!(stage.converged);
        assert_relative_eq!(stage.root, 1.521_379_706_804_567_6, epsilon = 1e-4);
    }

    #[test]
    fn test_regula_falsi_linear_is_exact() {
        // 2x - 3: the secant line is the function itself
        let f = Polynomial::new(vec![2.0, -3.0]);
        let stage = regula_falsi(&f, 0.0, 5.0, &SolverConfig::default()).unwrap();
        assert_eq!(stage.root, 1.5);
        assert_eq!(stage.error, 0.0);
    }

    #[test]
    fn test_budget_exhaustion_returns_partial() {
        let config = SolverConfig::new(1e-12, 3);
        let stage = bisection(&cubic(), 1.0, 2.0, &config).unwrap();
        assert!(!stage.converged);
        assert_eq!(stage.trace.len(), 3);
        assert_eq!(stage.root, 1.625);
    }
}
