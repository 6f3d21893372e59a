//! Secant and fixed-point iterations.

use super::iteration::{ensure_nonzero, open_iteration, Stage};
use super::RootMethod;
use crate::config::SolverConfig;
use crate::expression::Expression;
use crate::types::SolverError;

/// Secant method from the current point `x0` and the previous point `x1`:
/// `x_{n+1} = x_n - f(x_n)·(x_{n-1} - x_n) / (f(x_{n-1}) - f(x_n))`.
pub(crate) fn secant(
    f: &dyn Expression,
    x0: f64,
    x1: f64,
    config: &SolverConfig,
) -> Result<Stage, SolverError> {
    let method = RootMethod::Secant;
    if x0 == x1 {
        return Err(SolverError::invalid_input(format!(
            "secant needs two distinct starting points, got {} twice",
            x0
        )));
    }

    let mut previous = x1;
    open_iteration(method, x0, config, |x| {
        let (fx, f_prev) = (f.evaluate(x), f.evaluate(previous));
        let denominator = ensure_nonzero(method, f_prev - fx, x)?;
        let next = x - fx * (previous - x) / denominator;
        previous = x;
        Ok(next)
    })
}

/// Fixed-point iteration on `g(x) = x - f(x)`.
pub(crate) fn fixed_point(
    f: &dyn Expression,
    x0: f64,
    config: &SolverConfig,
) -> Result<Stage, SolverError> {
    open_iteration(RootMethod::FixedPoint, x0, config, |x| Ok(x - f.evaluate(x)))
}
