//! Error types for the numsolve CLI.

use numsolve_core::SolverError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Solver rejected the input or hit a numeric degeneracy
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_error_conversion() {
        let err: CliError = SolverError::ZeroPivot { column: 1 }.into();
        assert_eq!(
            err.to_string(),
            "Solver error: zero pivot in column 1: matrix is singular"
        );
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = CliError::invalid_argument("bad number 'x'");
        assert_eq!(err.to_string(), "Invalid argument: bad number 'x'");
    }
}
