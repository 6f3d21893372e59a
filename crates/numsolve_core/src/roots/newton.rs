//! Newton-Raphson and its two multiple-root modifications.

use super::iteration::{ensure_nonzero, open_iteration, Stage};
use super::RootMethod;
use crate::config::SolverConfig;
use crate::expression::Expression;
use crate::types::SolverError;

fn checked_derivative(df: &dyn Expression, x: f64) -> Result<f64, SolverError> {
    let value = df.evaluate(x);
    if value == 0.0 {
        Err(SolverError::ZeroDerivative { x })
    } else {
        Ok(value)
    }
}

/// Newton's iteration: `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
///
/// Converges quadratically near a simple root; fails with
/// [`SolverError::ZeroDerivative`] if `f'` vanishes at an iterate.
pub(crate) fn newton_raphson(
    f: &dyn Expression,
    df: &dyn Expression,
    x0: f64,
    config: &SolverConfig,
) -> Result<Stage, SolverError> {
    open_iteration(RootMethod::NewtonRaphson, x0, config, |x| {
        let slope = checked_derivative(df, x)?;
        Ok(x - f.evaluate(x) / slope)
    })
}

/// Newton's iteration scaled by a known root multiplicity `m`.
pub(crate) fn modified_newton_known(
    f: &dyn Expression,
    df: &dyn Expression,
    x0: f64,
    multiplicity: f64,
    config: &SolverConfig,
) -> Result<Stage, SolverError> {
    if !multiplicity.is_finite() || multiplicity <= 0.0 {
        return Err(SolverError::invalid_input(format!(
            "root multiplicity must be positive, got {}",
            multiplicity
        )));
    }
    open_iteration(RootMethod::ModifiedNewtonKnown, x0, config, |x| {
        let slope = checked_derivative(df, x)?;
        Ok(x - multiplicity * f.evaluate(x) / slope)
    })
}

/// Newton's iteration on `u = f / f'`, which has only simple roots:
/// `x_{n+1} = x_n - f'·f / (f'² - f·f'')`.
pub(crate) fn modified_newton_unknown(
    f: &dyn Expression,
    df: &dyn Expression,
    d2f: &dyn Expression,
    x0: f64,
    config: &SolverConfig,
) -> Result<Stage, SolverError> {
    let method = RootMethod::ModifiedNewtonUnknown;
    open_iteration(method, x0, config, |x| {
        let (fx, dfx, d2fx) = (f.evaluate(x), df.evaluate(x), d2f.evaluate(x));
        let denominator = ensure_nonzero(method, dfx * dfx - fx * d2fx, x)?;
        Ok(x - dfx * fx / denominator)
    })
}
