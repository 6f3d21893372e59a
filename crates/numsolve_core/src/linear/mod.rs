//! Square linear systems `A x = b`.
//!
//! ## Available Methods
//!
//! ### Direct
//!
//! - [`LinearMethod::Gauss`]: Forward elimination and back substitution
//! - [`LinearMethod::GaussJordan`]: Reduction to the identity
//! - [`LinearMethod::LuDecomposition`]: Reusable [`LuDecomposition`]
//!
//! ### Iterative
//!
//! - [`LinearMethod::Jacobi`]: Simultaneous updates
//! - [`LinearMethod::GaussSeidel`]: In-place updates
//!
//! ## Pivoting
//!
//! Direct methods pick the largest-magnitude entry in each column (the
//! earliest row on ties). A pivot or diagonal entry with magnitude
//! `<= n * f64::EPSILON * max|a_ij|` over the coefficient block is treated
//! as zero and reported as a singular system.
//!
//! ## Example
//!
//! ```
//! use numsolve_core::linear::{AugmentedMatrix, LinearMethod};
//! use numsolve_core::SolverConfig;
//!
//! let system = AugmentedMatrix::from_rows(&[
//!     vec![4.0, 1.0, 2.0, 4.0],
//!     vec![1.0, 5.0, 1.0, 7.0],
//!     vec![2.0, 1.0, 3.0, 3.0],
//! ]).unwrap();
//!
//! let direct = LinearMethod::Gauss.solve(system.clone(), None, &SolverConfig::default()).unwrap();
//! let iterative = LinearMethod::GaussSeidel.solve(system, None, &SolverConfig::default()).unwrap();
//!
//! for (a, b) in direct.solution.iter().zip(&iterative.solution) {
//!     assert!((a - b).abs() < 1e-4);
//! }
//! ```

mod gauss;
mod iterative;
mod lu;
mod matrix;
mod method;
mod permutation;

pub use lu::LuDecomposition;
pub use matrix::{AugmentedMatrix, Matrix};
pub use method::{LinearMethod, LinearSolver};
pub use permutation::Permutation;
