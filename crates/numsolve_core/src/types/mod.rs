//! Shared types for the numerical core.
//!
//! - [`SolverError`] and [`ErrorKind`]: the error taxonomy returned by every solver

pub mod error;

pub use error::{ErrorKind, SolverError};
