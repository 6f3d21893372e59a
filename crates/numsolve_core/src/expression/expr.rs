//! Expression tree over a single variable with symbolic differentiation.

use super::{Expression, Polynomial};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

/// Largest integer exponent expanded when extracting polynomial coefficients.
const MAX_EXPANDED_POWER: f64 = 64.0;

/// Symbolic expression in the single free variable `x`.
///
/// Trees are built with the constructor helpers and the arithmetic operators.
/// Differentiation folds trivial `0` and `1` factors so derivative trees stay
/// small; no other simplification is attempted.
///
/// # Example
///
/// ```
/// use numsolve_core::expression::{Expr, Expression};
///
/// // x·eˣ - 1
/// let f = Expr::x() * Expr::x().exp() - 1.0;
/// let df = f.diff();
///
/// // d/dx (x·eˣ) = eˣ + x·eˣ
/// let x = 0.5_f64;
/// assert!((df.eval(x) - (x.exp() + x * x.exp())).abs() < 1e-12);
/// assert!(f.to_polynomial().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The free variable.
    Var,
    /// Numeric constant.
    Const(f64),
    /// Negation.
    Neg(Box<Expr>),
    /// Sum.
    Add(Box<Expr>, Box<Expr>),
    /// Difference.
    Sub(Box<Expr>, Box<Expr>),
    /// Product.
    Mul(Box<Expr>, Box<Expr>),
    /// Quotient.
    Div(Box<Expr>, Box<Expr>),
    /// Power with arbitrary exponent.
    Pow(Box<Expr>, Box<Expr>),
    /// Natural exponential.
    Exp(Box<Expr>),
    /// Natural logarithm.
    Ln(Box<Expr>),
    /// Sine.
    Sin(Box<Expr>),
    /// Cosine.
    Cos(Box<Expr>),
}

impl Expr {
    /// The free variable `x`.
    pub fn x() -> Self {
        Expr::Var
    }

    /// A numeric constant.
    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }

    /// Raise to a constant integer power.
    pub fn powi(self, n: i32) -> Self {
        Expr::Pow(Box::new(self), Box::new(Expr::Const(n as f64)))
    }

    /// Raise to an arbitrary power.
    pub fn pow(self, exponent: impl Into<Expr>) -> Self {
        Expr::Pow(Box::new(self), Box::new(exponent.into()))
    }

    /// `e` raised to this expression.
    pub fn exp(self) -> Self {
        Expr::Exp(Box::new(self))
    }

    /// Natural logarithm of this expression.
    pub fn ln(self) -> Self {
        Expr::Ln(Box::new(self))
    }

    /// Sine of this expression.
    pub fn sin(self) -> Self {
        Expr::Sin(Box::new(self))
    }

    /// Cosine of this expression.
    pub fn cos(self) -> Self {
        Expr::Cos(Box::new(self))
    }

    /// Evaluate at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Var => x,
            Expr::Const(c) => *c,
            Expr::Neg(u) => -u.eval(x),
            Expr::Add(u, v) => u.eval(x) + v.eval(x),
            Expr::Sub(u, v) => u.eval(x) - v.eval(x),
            Expr::Mul(u, v) => u.eval(x) * v.eval(x),
            Expr::Div(u, v) => u.eval(x) / v.eval(x),
            Expr::Pow(u, v) => u.eval(x).powf(v.eval(x)),
            Expr::Exp(u) => u.eval(x).exp(),
            Expr::Ln(u) => u.eval(x).ln(),
            Expr::Sin(u) => u.eval(x).sin(),
            Expr::Cos(u) => u.eval(x).cos(),
        }
    }

    /// Symbolic derivative with respect to `x`.
    pub fn diff(&self) -> Expr {
        match self {
            Expr::Var => Expr::Const(1.0),
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Neg(u) => neg(u.diff()),
            Expr::Add(u, v) => add(u.diff(), v.diff()),
            Expr::Sub(u, v) => sub(u.diff(), v.diff()),
            Expr::Mul(u, v) => add(
                mul(u.diff(), (**v).clone()),
                mul((**u).clone(), v.diff()),
            ),
            Expr::Div(u, v) => div(
                sub(
                    mul(u.diff(), (**v).clone()),
                    mul((**u).clone(), v.diff()),
                ),
                pow((**v).clone(), Expr::Const(2.0)),
            ),
            Expr::Pow(u, v) => match **v {
                Expr::Const(c) => mul(
                    mul(Expr::Const(c), pow((**u).clone(), Expr::Const(c - 1.0))),
                    u.diff(),
                ),
                _ => mul(
                    self.clone(),
                    add(
                        mul(v.diff(), Expr::Ln(u.clone())),
                        div(mul((**v).clone(), u.diff()), (**u).clone()),
                    ),
                ),
            },
            Expr::Exp(u) => mul(self.clone(), u.diff()),
            Expr::Ln(u) => div(u.diff(), (**u).clone()),
            Expr::Sin(u) => mul(Expr::Cos(u.clone()), u.diff()),
            Expr::Cos(u) => neg(mul(Expr::Sin(u.clone()), u.diff())),
        }
    }

    /// Expand into a dense polynomial, if the tree is polynomial.
    ///
    /// Accepts sums, products, negation, division by a non-zero constant and
    /// non-negative integer constant powers.
    pub fn to_polynomial(&self) -> Option<Polynomial> {
        self.ascending_coeffs().map(Polynomial::from_ascending)
    }

    fn ascending_coeffs(&self) -> Option<Vec<f64>> {
        match self {
            Expr::Var => Some(vec![0.0, 1.0]),
            Expr::Const(c) => Some(vec![*c]),
            Expr::Neg(u) => Some(u.ascending_coeffs()?.iter().map(|c| -c).collect()),
            Expr::Add(u, v) => Some(combine(&u.ascending_coeffs()?, &v.ascending_coeffs()?, 1.0)),
            Expr::Sub(u, v) => Some(combine(&u.ascending_coeffs()?, &v.ascending_coeffs()?, -1.0)),
            Expr::Mul(u, v) => Some(convolve(&u.ascending_coeffs()?, &v.ascending_coeffs()?)),
            Expr::Div(u, v) => match **v {
                Expr::Const(c) if c != 0.0 => {
                    Some(u.ascending_coeffs()?.iter().map(|a| a / c).collect())
                }
                _ => None,
            },
            Expr::Pow(u, v) => match **v {
                Expr::Const(c) if c >= 0.0 && c.fract() == 0.0 && c <= MAX_EXPANDED_POWER => {
                    let base = u.ascending_coeffs()?;
                    let mut acc = vec![1.0];
                    for _ in 0..c as usize {
                        acc = convolve(&acc, &base);
                    }
                    Some(acc)
                }
                _ => None,
            },
            Expr::Exp(_) | Expr::Ln(_) | Expr::Sin(_) | Expr::Cos(_) => None,
        }
    }
}

fn combine(a: &[f64], b: &[f64], sign: f64) -> Vec<f64> {
    let n = a.len().max(b.len());
    (0..n)
        .map(|i| a.get(i).copied().unwrap_or(0.0) + sign * b.get(i).copied().unwrap_or(0.0))
        .collect()
}

fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

fn is_const(e: &Expr, value: f64) -> bool {
    matches!(e, Expr::Const(c) if *c == value)
}

fn neg(u: Expr) -> Expr {
    match u {
        Expr::Const(c) => Expr::Const(-c),
        Expr::Neg(inner) => *inner,
        u => Expr::Neg(Box::new(u)),
    }
}

fn add(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
        (u, v) if is_const(&u, 0.0) => v,
        (u, v) if is_const(&v, 0.0) => u,
        (u, v) => Expr::Add(Box::new(u), Box::new(v)),
    }
}

fn sub(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
        (u, v) if is_const(&v, 0.0) => u,
        (u, v) if is_const(&u, 0.0) => neg(v),
        (u, v) => Expr::Sub(Box::new(u), Box::new(v)),
    }
}

fn mul(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
        (u, v) if is_const(&u, 0.0) || is_const(&v, 0.0) => Expr::Const(0.0),
        (u, v) if is_const(&u, 1.0) => v,
        (u, v) if is_const(&v, 1.0) => u,
        (u, v) => Expr::Mul(Box::new(u), Box::new(v)),
    }
}

fn div(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (u, _) if is_const(&u, 0.0) => Expr::Const(0.0),
        (u, v) if is_const(&v, 1.0) => u,
        (u, v) => Expr::Div(Box::new(u), Box::new(v)),
    }
}

fn pow(u: Expr, v: Expr) -> Expr {
    match (u, v) {
        (_, v) if is_const(&v, 0.0) => Expr::Const(1.0),
        (u, v) if is_const(&v, 1.0) => u,
        (u, v) => Expr::Pow(Box::new(u), Box::new(v)),
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl<R: Into<Expr>> Add<R> for Expr {
    type Output = Expr;

    fn add(self, rhs: R) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs.into()))
    }
}

impl<R: Into<Expr>> Sub<R> for Expr {
    type Output = Expr;

    fn sub(self, rhs: R) -> Expr {
        Expr::Sub(Box::new(self), Box::new(rhs.into()))
    }
}

impl<R: Into<Expr>> Mul<R> for Expr {
    type Output = Expr;

    fn mul(self, rhs: R) -> Expr {
        Expr::Mul(Box::new(self), Box::new(rhs.into()))
    }
}

impl<R: Into<Expr>> Div<R> for Expr {
    type Output = Expr;

    fn div(self, rhs: R) -> Expr {
        Expr::Div(Box::new(self), Box::new(rhs.into()))
    }
}

impl Mul<Expr> for f64 {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(Box::new(Expr::Const(self)), Box::new(rhs))
    }
}

impl Sub<Expr> for f64 {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(Expr::Const(self)), Box::new(rhs))
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var => write!(f, "x"),
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Neg(u) => write!(f, "-({})", u),
            Expr::Add(u, v) => write!(f, "({} + {})", u, v),
            Expr::Sub(u, v) => write!(f, "({} - {})", u, v),
            Expr::Mul(u, v) => write!(f, "{}*{}", u, v),
            Expr::Div(u, v) => write!(f, "{}/{}", u, v),
            Expr::Pow(u, v) => write!(f, "{}^{}", u, v),
            Expr::Exp(u) => write!(f, "exp({})", u),
            Expr::Ln(u) => write!(f, "ln({})", u),
            Expr::Sin(u) => write!(f, "sin({})", u),
            Expr::Cos(u) => write!(f, "cos({})", u),
        }
    }
}

impl Expression for Expr {
    fn evaluate(&self, x: f64) -> f64 {
        self.eval(x)
    }

    fn differentiate(&self) -> Arc<dyn Expression> {
        Arc::new(self.diff())
    }

    fn coefficients(&self) -> Option<Vec<f64>> {
        self.to_polynomial().map(|p| p.coeffs().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eval_polynomial_tree() {
        let f = Expr::x().powi(2) - 4.0;
        assert_eq!(f.eval(3.0), 5.0);
        assert_eq!(f.eval(-2.0), 0.0);
    }

    #[test]
    fn test_diff_power_rule() {
        let f = Expr::x().powi(3);
        let df = f.diff();
        assert_relative_eq!(df.eval(2.0), 12.0, epsilon = 1e-12);
        assert_relative_eq!(df.diff().eval(2.0), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_diff_product_and_quotient() {
        // x·sin(x)
        let f = Expr::x() * Expr::x().sin();
        let x = 0.7_f64;
        assert_relative_eq!(f.diff().eval(x), x.sin() + x * x.cos(), epsilon = 1e-12);

        // 1 / x
        let g = Expr::constant(1.0) / Expr::x();
        assert_relative_eq!(g.diff().eval(2.0), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_diff_chain_rule() {
        // cos(x²)
        let f = Expr::x().powi(2).cos();
        let x = 1.3_f64;
        assert_relative_eq!(
            f.diff().eval(x),
            -(x * x).sin() * 2.0 * x,
            epsilon = 1e-12
        );

        // ln(x² + 1)
        let g = (Expr::x().powi(2) + 1.0).ln();
        assert_relative_eq!(g.diff().eval(x), 2.0 * x / (x * x + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_diff_variable_exponent() {
        // x^x
        let f = Expr::x().pow(Expr::x());
        let x = 1.5_f64;
        let expected = x.powf(x) * (x.ln() + 1.0);
        assert_relative_eq!(f.diff().eval(x), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_diff_folds_constants() {
        assert_eq!(Expr::constant(5.0).diff(), Expr::Const(0.0));
        assert_eq!(Expr::x().diff(), Expr::Const(1.0));
        assert_eq!((Expr::x() + 3.0).diff(), Expr::Const(1.0));
        assert_eq!((2.0 * Expr::x()).diff(), Expr::Const(2.0));
    }

    #[test]
    fn test_to_polynomial() {
        // (x - 1)² · (x + 2)
        let f = (Expr::x() - 1.0).powi(2) * (Expr::x() + 2.0);
        let p = f.to_polynomial().unwrap();
        assert_eq!(p.coeffs(), &[1.0, 0.0, -3.0, 2.0]);
    }

    #[test]
    fn test_to_polynomial_division_by_constant() {
        let f = (Expr::x().powi(2) - 4.0) / 2.0;
        let p = f.to_polynomial().unwrap();
        assert_eq!(p.coeffs(), &[0.5, 0.0, -2.0]);
    }

    #[test]
    fn test_to_polynomial_rejects_transcendental() {
        assert!(Expr::x().exp().to_polynomial().is_none());
        assert!((Expr::constant(1.0) / Expr::x()).to_polynomial().is_none());
        assert!(Expr::x().pow(0.5).to_polynomial().is_none());
    }

    #[test]
    fn test_expression_trait() {
        let f: Arc<dyn Expression> = Arc::new(Expr::x().powi(2) - 4.0);
        let df = f.differentiate();
        assert_relative_eq!(df.evaluate(3.0), 6.0, epsilon = 1e-12);
        assert_eq!(f.coefficients(), Some(vec![1.0, 0.0, -4.0]));
    }

    #[test]
    fn test_display() {
        let f = Expr::x().powi(2) - 4.0;
        assert_eq!(f.to_string(), "(x^2 - 4)");
    }
}
