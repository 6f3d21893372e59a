//! Core trait for single-variable expressions.

use std::fmt;
use std::sync::Arc;

/// A function of one free variable that can be evaluated and differentiated.
///
/// Root-finders hold an expression read-only for the whole solve and hand a
/// shared handle to the report, so implementations must be immutable and
/// thread-safe.
///
/// # Example
///
/// ```
/// use numsolve_core::expression::{Expression, Polynomial};
///
/// // x² - 4
/// let p = Polynomial::new(vec![1.0, 0.0, -4.0]);
/// assert_eq!(p.evaluate(3.0), 5.0);
///
/// let dp = p.differentiate();
/// assert_eq!(dp.evaluate(3.0), 6.0);
/// ```
pub trait Expression: fmt::Debug + fmt::Display + Send + Sync {
    /// Value of the expression at `x`.
    fn evaluate(&self, x: f64) -> f64;

    /// Symbolic derivative with respect to the free variable.
    fn differentiate(&self) -> Arc<dyn Expression>;

    /// Dense polynomial coefficients, highest degree first.
    ///
    /// Returns `None` unless the expression is a polynomial.
    fn coefficients(&self) -> Option<Vec<f64>> {
        None
    }
}
