//! Single-variable expressions consumed by the root-finders.
//!
//! The root-finding engine only needs two capabilities from a function:
//! evaluate it at a point and produce its derivative as another function.
//! Both are captured by the [`Expression`] trait.
//!
//! ## Implementations
//!
//! - [`Polynomial`]: Dense coefficients, Horner evaluation, synthetic division
//! - [`Expr`]: Expression tree with symbolic differentiation
//!
//! Only polynomials (or `Expr` trees that expand to one) expose
//! [`Expression::coefficients`], which Birge-Vieta requires.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use numsolve_core::expression::{Expr, Expression};
//!
//! let f: Arc<dyn Expression> = Arc::new(Expr::x().powi(2) - 4.0);
//! let df = f.differentiate();
//!
//! assert_eq!(f.evaluate(3.0), 5.0);
//! assert_eq!(df.evaluate(3.0), 6.0);
//! ```

mod expr;
mod polynomial;
mod traits;

pub use expr::Expr;
pub use polynomial::Polynomial;
pub use traits::Expression;
