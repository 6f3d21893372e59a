//! Iteration loops shared by the root-finding methods.

use super::RootMethod;
use crate::config::SolverConfig;
use crate::expression::Expression;
use crate::report::IterationTrace;
use crate::types::SolverError;
use tracing::{trace, warn};

/// Result of one converging (or budget-exhausted) iteration run.
#[derive(Debug, Clone)]
pub(crate) struct Stage {
    pub trace: IterationTrace,
    pub root: f64,
    pub error: f64,
    pub converged: bool,
}

pub(crate) fn ensure_finite(method: RootMethod, x: f64) -> Result<f64, SolverError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(SolverError::NonFinite {
            method: method.title().to_string(),
        })
    }
}

pub(crate) fn ensure_nonzero(method: RootMethod, denominator: f64, x: f64) -> Result<f64, SolverError> {
    if denominator == 0.0 {
        Err(SolverError::ZeroDenominator {
            method: method.title().to_string(),
            x,
        })
    } else {
        Ok(denominator)
    }
}

/// Drive a single-point update `x -> step(x)` until `|x_new - x| <= tolerance`.
pub(crate) fn open_iteration<F>(
    method: RootMethod,
    x0: f64,
    config: &SolverConfig,
    mut step: F,
) -> Result<Stage, SolverError>
where
    F: FnMut(f64) -> Result<f64, SolverError>,
{
    let mut x = x0;
    let mut error = f64::INFINITY;
    let mut converged = false;
    let mut trace = IterationTrace::new();

    for iteration in 0..config.max_iterations {
        let next = ensure_finite(method, step(x)?)?;
        error = (next - x).abs();
        trace.push(next, error);
        trace!(%method, iteration, x = next, error, "step");
        x = next;

        if error <= config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(%method, iterations = config.max_iterations, error, "iteration budget exhausted");
    }

    Ok(Stage {
        trace,
        root: x,
        error,
        converged,
    })
}

/// Strict sign change between `a` and `b`, compared without multiplying so
/// tiny values cannot underflow to zero.
pub(crate) fn opposite_signs(a: f64, b: f64) -> bool {
    a != 0.0 && b != 0.0 && a.is_sign_positive() != b.is_sign_positive()
}

/// Order and validate a bracket: distinct endpoints with a sign change.
pub(crate) fn checked_bracket(
    f: &dyn Expression,
    a: f64,
    b: f64,
) -> Result<(f64, f64), SolverError> {
    let (xl, xu) = (a.min(b), a.max(b));
    if xl == xu {
        return Err(SolverError::EmptyBracket { x: xl });
    }

    let (fl, fu) = (f.evaluate(xl), f.evaluate(xu));
    if !fl.is_finite() || !fu.is_finite() {
        return Err(SolverError::invalid_input(format!(
            "function is not finite at bracket endpoints: f({}) = {}, f({}) = {}",
            xl, fl, xu, fu
        )));
    }
    if fl != 0.0 && fu != 0.0 && fl.is_sign_positive() == fu.is_sign_positive() {
        return Err(SolverError::NoSignChange { xl, xu });
    }
    Ok((xl, xu))
}

/// Shrink `[xl, xu]` around a sign change, placing each new estimate with `estimate`.
///
/// The first estimate's error is the starting bracket width, not `|xr|` as a
/// zero "previous estimate" would give. When the new
/// estimate leaves no strict sign change on either side, one of the three
/// points is an exact root: it becomes the estimate and the error is 0.
pub(crate) fn bracket_iteration<E>(
    method: RootMethod,
    f: &dyn Expression,
    mut xl: f64,
    mut xu: f64,
    config: &SolverConfig,
    estimate: E,
) -> Result<Stage, SolverError>
where
    E: Fn(f64, f64, f64, f64) -> Result<f64, SolverError>,
{
    let mut previous: Option<f64> = None;
    let mut xr = xl;
    let mut error = f64::INFINITY;
    let mut converged = false;
    let mut trace = IterationTrace::new();

    for iteration in 0..config.max_iterations {
        let fl = f.evaluate(xl);
        let fu = f.evaluate(xu);
        xr = ensure_finite(method, estimate(xl, xu, fl, fu)?)?;
        let fr = ensure_finite(method, f.evaluate(xr))?;

        error = match previous {
            Some(p) => (xr - p).abs(),
            None => xu - xl,
        };

        if opposite_signs(fr, fu) {
            xl = xr;
        } else if opposite_signs(fr, fl) {
            xu = xr;
        } else {
            if fr != 0.0 {
                xr = if fl == 0.0 { xl } else { xu };
            }
            error = 0.0;
        }

        previous = Some(xr);
        trace.push(xr, error);
        trace!(%method, iteration, xl, xu, xr, error, "bracket step");

        if error <= config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(%method, iterations = config.max_iterations, error, "iteration budget exhausted");
    }

    Ok(Stage {
        trace,
        root: xr,
        error,
        converged,
    })
}
