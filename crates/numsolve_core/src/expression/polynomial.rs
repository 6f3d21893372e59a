//! Dense single-variable polynomials.

use super::Expression;
use std::fmt;
use std::sync::Arc;

/// Polynomial with dense `f64` coefficients, highest degree first.
///
/// Leading zero coefficients are trimmed on construction, so `degree()` is
/// exact. The zero polynomial is stored as `[0.0]` with degree 0.
///
/// # Example
///
/// ```
/// use numsolve_core::expression::Polynomial;
///
/// // x³ - 6x² + 11x - 6 = (x - 1)(x - 2)(x - 3)
/// let p = Polynomial::new(vec![1.0, -6.0, 11.0, -6.0]);
/// assert_eq!(p.degree(), 3);
/// assert_eq!(p.eval(2.0), 0.0);
///
/// let (q, remainder) = p.deflate(1.0);
/// assert_eq!(q.coeffs(), &[1.0, -5.0, 6.0]);
/// assert_eq!(remainder, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Build from coefficients ordered highest degree first.
    pub fn new(coeffs: Vec<f64>) -> Self {
        let first_nonzero = coeffs.iter().position(|&c| c != 0.0);
        let coeffs = match first_nonzero {
            Some(start) => coeffs[start..].to_vec(),
            None => vec![0.0],
        };
        Self { coeffs }
    }

    /// Build from coefficients ordered lowest degree first.
    pub fn from_ascending(mut coeffs: Vec<f64>) -> Self {
        coeffs.reverse();
        Self::new(coeffs)
    }

    /// Coefficients, highest degree first.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Evaluate with Horner's scheme.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Derivative polynomial.
    pub fn derivative(&self) -> Polynomial {
        let n = self.degree();
        if n == 0 {
            return Polynomial::new(vec![0.0]);
        }
        let coeffs = self.coeffs[..n]
            .iter()
            .enumerate()
            .map(|(i, &c)| c * (n - i) as f64)
            .collect();
        Polynomial::new(coeffs)
    }

    /// Synthetic division by `(x - r)`.
    ///
    /// Returns the quotient and the remainder, which equals `p(r)`.
    pub fn deflate(&self, r: f64) -> (Polynomial, f64) {
        let mut b = Vec::with_capacity(self.coeffs.len());
        let mut acc = 0.0;
        for &a in &self.coeffs {
            acc = a + r * acc;
            b.push(acc);
        }
        let remainder = b.pop().unwrap_or(0.0);
        if b.is_empty() {
            b.push(0.0);
        }
        (Polynomial::new(b), remainder)
    }
}

impl Expression for Polynomial {
    fn evaluate(&self, x: f64) -> f64 {
        self.eval(x)
    }

    fn differentiate(&self) -> Arc<dyn Expression> {
        Arc::new(self.derivative())
    }

    fn coefficients(&self) -> Option<Vec<f64>> {
        Some(self.coeffs.clone())
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.degree();
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            let power = n - i;
            if c == 0.0 && !(first && power == 0) {
                continue;
            }
            let magnitude = c.abs();
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            if magnitude != 1.0 || power == 0 {
                write!(f, "{}", magnitude)?;
            }
            match power {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", power)?,
            }
            first = false;
        }
        Ok(())
    }
}
