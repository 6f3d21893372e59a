//! Root-finding for single-variable functions.
//!
//! ## Available Methods
//!
//! ### Bracketing
//!
//! - [`RootMethod::Bisection`]: Halves a sign-change bracket each step
//! - [`RootMethod::RegulaFalsi`]: Replaces the midpoint with the chord crossing
//!
//! ### Open
//!
//! - [`RootMethod::NewtonRaphson`]: Quadratic convergence near simple roots
//! - [`RootMethod::ModifiedNewtonKnown`]: Newton scaled by a known multiplicity
//! - [`RootMethod::ModifiedNewtonUnknown`]: Newton on `f / f'`
//! - [`RootMethod::Secant`]: Derivative-free, two starting points
//! - [`RootMethod::FixedPoint`]: Iterates `x - f(x)`
//!
//! ### Polynomial
//!
//! - [`RootMethod::BirgeVieta`]: Newton with deflation, one root per degree
//!
//! ## Convergence
//!
//! Every method stops when `|x_new - x_old| <= tolerance` or after
//! `max_iterations` steps (see [`SolverConfig`](crate::SolverConfig)). The
//! first bisection / regula falsi estimate has no predecessor, so its error is
//! the starting bracket width. Division by an exact zero is reported as
//! numeric degeneracy.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use numsolve_core::expression::{Expression, Polynomial};
//! use numsolve_core::roots::RootMethod;
//! use numsolve_core::SolverConfig;
//!
//! let f: Arc<dyn Expression> = Arc::new(Polynomial::new(vec![1.0, -9.0, -2.0, 120.0, -130.0]));
//! let report = RootMethod::BirgeVieta
//!     .solve(&f, &[-3.0], &SolverConfig::default())
//!     .unwrap();
//!
//! assert_eq!(report.roots.len(), 4);
//! ```

mod birge_vieta;
mod bracket;
mod finder;
mod iteration;
mod method;
mod newton;
mod secant;

pub use finder::RootFinder;
pub use method::RootMethod;
