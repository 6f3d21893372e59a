//! # numsolve_core: Root-Finding and Linear-System Solvers
//!
//! Classical numerical methods with full iteration traces, so every step a
//! method takes can be tabulated or plotted afterwards.
//!
//! - Expressions: `Expression` trait, `Expr` trees, `Polynomial` (`expression`)
//! - Root-finding: bracketing, Newton family, secant, fixed-point,
//!   Birge-Vieta (`roots`)
//! - Linear systems: Gauss, Gauss-Jordan, LU, Jacobi, Gauss-Seidel (`linear`)
//! - Result records: `RootReport`, `LinearReport`, `IterationTrace` (`report`)
//! - Error types: `SolverError`, `ErrorKind` (`types::error`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use numsolve_core::expression::{Expr, Expression};
//! use numsolve_core::linear::{AugmentedMatrix, LinearMethod};
//! use numsolve_core::roots::RootMethod;
//! use numsolve_core::SolverConfig;
//!
//! let config = SolverConfig::default();
//!
//! // Root of x² - 4 from x0 = 3
//! let f: Arc<dyn Expression> = Arc::new(Expr::x().powi(2) - 4.0);
//! let report = RootMethod::NewtonRaphson.solve(&f, &[3.0], &config).unwrap();
//! assert!((report.roots[0] - 2.0).abs() < 1e-5);
//!
//! // 2x + y = 3, x + 3y = 4
//! let system = AugmentedMatrix::from_rows(&[vec![2.0, 1.0, 3.0], vec![1.0, 3.0, 4.0]]).unwrap();
//! let report = LinearMethod::Gauss.solve(system, None, &config).unwrap();
//! # assert!((report.solution[1] - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for reports, methods and configuration

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod expression;
pub mod linear;
pub mod report;
pub mod roots;
pub mod types;

pub use config::SolverConfig;
pub use report::{IterationTrace, LinearReport, RootReport, TraceEntry};
pub use types::{ErrorKind, SolverError};
