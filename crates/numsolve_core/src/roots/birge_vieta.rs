//! Birge-Vieta: Newton iteration on a polynomial with successive deflation.
//!
//! The value and slope of the current polynomial are obtained by nested
//! multiplication (two rows of synthetic division), so no symbolic
//! derivative is needed. Once a stage stops, the polynomial is divided by
//! `(x - root)` and the next stage starts from the previous root, until the
//! quotient is constant. A stage that runs out of iterations is still
//! deflated with its last iterate.

use super::iteration::{open_iteration, Stage};
use super::RootMethod;
use crate::config::SolverConfig;
use crate::expression::{Expression, Polynomial};
use crate::types::SolverError;
use tracing::debug;

/// Nested multiplication at `x` for coefficients `a` (highest degree first).
///
/// `b[0] = c[0] = a[0]`, `b[i] = a[i] + x·b[i-1]`, `c[i] = b[i] + x·c[i-1]`.
/// `b[m]` is `p(x)` and `c[m-1]` is `p'(x)`; `b[0..m]` are the quotient
/// coefficients of `p / (x - r)`.
pub(crate) fn nested_multiplication(a: &[f64], x: f64) -> (Vec<f64>, Vec<f64>) {
    let mut b = vec![0.0; a.len()];
    let mut c = vec![0.0; a.len()];
    b[0] = a[0];
    c[0] = a[0];
    for i in 1..a.len() {
        b[i] = a[i] + x * b[i - 1];
        c[i] = b[i] + x * c[i - 1];
    }
    (b, c)
}

/// Find every root reachable by deflation, one stage per degree.
pub(crate) fn birge_vieta(
    f: &dyn Expression,
    x0: f64,
    config: &SolverConfig,
) -> Result<Vec<Stage>, SolverError> {
    let coefficients = f
        .coefficients()
        .ok_or_else(|| SolverError::NotPolynomial(f.to_string()))?;
    let mut polynomial = Polynomial::new(coefficients);
    if polynomial.degree() == 0 {
        return Err(SolverError::invalid_input(format!(
            "Birge-Vieta needs a polynomial of degree >= 1, got {}",
            polynomial
        )));
    }

    let mut stages = Vec::with_capacity(polynomial.degree());
    let mut x = x0;

    while polynomial.degree() > 0 {
        let m = polynomial.degree();
        let a = polynomial.coeffs().to_vec();

        let stage = open_iteration(RootMethod::BirgeVieta, x, config, |xi| {
            let (b, c) = nested_multiplication(&a, xi);
            if c[m - 1] == 0.0 {
                return Err(SolverError::ZeroDerivative { x: xi });
            }
            Ok(xi - b[m] / c[m - 1])
        })?;

        debug!(
            degree = m,
            root = stage.root,
            iterations = stage.trace.len(),
            converged = stage.converged,
            "deflation stage finished"
        );

        x = stage.root;
        polynomial = polynomial.deflate(x).0;
        stages.push(stage);
    }

    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Expr;
    use approx::assert_relative_eq;

    fn quartic() -> Polynomial {
        Polynomial::new(vec![1.0, -9.0, -2.0, 120.0, -130.0])
    }

    #[test]
    fn test_nested_multiplication_value_and_slope() {
        let p = quartic();
        let x = 1.7;
        let (b, c) = nested_multiplication(p.coeffs(), x);
        assert_relative_eq!(b[4], p.eval(x), epsilon = 1e-10);
        assert_relative_eq!(c[3], p.derivative().eval(x), epsilon = 1e-10);
    }

    #[test]
    fn test_nested_multiplication_quotient() {
        // x² - 4 at the root 2: quotient x + 2, remainder 0
        let (b, _) = nested_multiplication(&[1.0, 0.0, -4.0], 2.0);
        assert_eq!(b, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_one_stage_per_degree() {
        let stages = birge_vieta(&quartic(), -3.0, &SolverConfig::default()).unwrap();
        assert_eq!(stages.len(), 4);
        assert!(stages.iter().all(|s| s.converged));
        assert!(stages.iter().all(|s| !s.trace.is_empty()));
    }

    #[test]
    fn test_roots_in_stage_order() {
        let stages = birge_vieta(&quartic(), -3.0, &SolverConfig::default()).unwrap();
        let roots: Vec<f64> = stages.iter().map(|s| s.root).collect();
        let expected = [-3.600_135, 1.228_589, 3.972_068, 7.399_477];
        for (root, want) in roots.iter().zip(expected) {
            assert_relative_eq!(*root, want, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_tiny_scale_quartic() {
        let scaled: Vec<f64> = quartic().coeffs().iter().map(|c| c * 1e-40).collect();
        let stages = birge_vieta(&Polynomial::new(scaled), -3.0, &SolverConfig::default()).unwrap();
        assert_eq!(stages.len(), 4);
        assert!(stages.iter().all(|s| s.converged));
        assert_relative_eq!(stages[0].root, -3.600_135, epsilon = 1e-4);
    }

    #[test]
    fn test_linear_polynomial() {
        let f = Polynomial::new(vec![2.0, -3.0]);
        let stages = birge_vieta(&f, 0.0, &SolverConfig::default()).unwrap();
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].root, 1.5);
    }

    #[test]
    fn test_expression_tree_polynomial() {
        // (x - 1)(x - 2)
        let f = (Expr::x() - 1.0) * (Expr::x() - 2.0);
        let stages = birge_vieta(&f, 0.0, &SolverConfig::default()).unwrap();
        assert_eq!(stages.len(), 2);
        assert_relative_eq!(stages[0].root, 1.0, epsilon = 1e-6);
        assert_relative_eq!(stages[1].root, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_non_polynomial() {
        let f = Expr::x().sin();
        let err = birge_vieta(&f, 0.0, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::NotPolynomial(_)));
    }

    #[test]
    fn test_rejects_constant() {
        let f = Polynomial::new(vec![3.0]);
        let err = birge_vieta(&f, 0.0, &SolverConfig::default()).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_unconverged_stage_still_deflates() {
        // x² + 1 has no real roots; the first stage wanders, then deflation continues.
        let f = Polynomial::new(vec![1.0, 0.0, 1.0]);
        let config = SolverConfig::new(1e-12, 10);
        let stages = birge_vieta(&f, 0.5, &config).unwrap();
        assert_eq!(stages.len(), 2);
        assert!(!stages[0].converged);
        assert_eq!(stages[0].trace.len(), 10);
    }
}
