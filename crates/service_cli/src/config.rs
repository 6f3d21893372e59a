//! CLI configuration management.
//!
//! Loads solver and output settings from a TOML file, applies environment
//! variable overrides and validates the result. A missing file falls back to
//! the defaults.
//!
//! ```toml
//! [solver]
//! tolerance = 1e-8
//! max_iterations = 100
//!
//! [output]
//! format = "table"
//! precision = 8
//! ```

use numsolve_core::SolverConfig;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Output format for solver reports
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable iteration tables
    #[default]
    Table,
    /// Pretty-printed JSON reports
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown format: {}. Supported: table, json", other)),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: OutputFormat,
    /// Digits after the decimal point in tables
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: 8,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Tolerance and iteration budget for every method
    pub solver: SolverConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// - `NUMSOLVE_TOLERANCE`
    /// - `NUMSOLVE_MAX_ITERATIONS`
    /// - `NUMSOLVE_FORMAT`
    /// - `NUMSOLVE_PRECISION`
    ///
    /// Unparseable values are collected and reported by [`CliConfig::validate`].
    pub fn with_env_override(self) -> (Self, Vec<String>) {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut errors = Vec::new();

        if let Some(value) = lookup("NUMSOLVE_TOLERANCE") {
            match value.parse() {
                Ok(tolerance) => self.solver.tolerance = tolerance,
                Err(_) => errors.push(format!("NUMSOLVE_TOLERANCE '{}' is not a number", value)),
            }
        }

        if let Some(value) = lookup("NUMSOLVE_MAX_ITERATIONS") {
            match value.parse() {
                Ok(max_iterations) => self.solver.max_iterations = max_iterations,
                Err(_) => errors.push(format!(
                    "NUMSOLVE_MAX_ITERATIONS '{}' is not a non-negative integer",
                    value
                )),
            }
        }

        if let Some(value) = lookup("NUMSOLVE_FORMAT") {
            match value.parse() {
                Ok(format) => self.output.format = format,
                Err(e) => errors.push(e),
            }
        }

        if let Some(value) = lookup("NUMSOLVE_PRECISION") {
            match value.parse() {
                Ok(precision) => self.output.precision = precision,
                Err(_) => errors.push(format!("NUMSOLVE_PRECISION '{}' is not an integer", value)),
            }
        }

        (self, errors)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.solver.validate() {
            errors.push(e);
        }

        if self.output.precision > 17 {
            errors.push(format!(
                "precision {} exceeds maximum meaningful f64 digits (17)",
                self.output.precision
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let (config, mut errors) = Self::load_or_default(path)?.with_env_override();
        if let Err(ConfigError::Validation(more)) = config.validate() {
            errors.extend(more);
        }
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.solver, SolverConfig::default());
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.output.precision, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = CliConfig::parse(
            r#"
            [solver]
            tolerance = 1e-8

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.solver.tolerance, 1e-8);
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.precision, 8);
    }

    #[test]
    fn test_parse_error() {
        let err = CliConfig::parse("[solver\ntolerance = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = CliConfig::load_or_default(Path::new("/nonexistent/numsolve.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("NUMSOLVE_TOLERANCE", "1e-9"),
            ("NUMSOLVE_MAX_ITERATIONS", "abc"),
            ("NUMSOLVE_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let (config, errors) =
            CliConfig::default().with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.solver.tolerance, 1e-9);
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("NUMSOLVE_MAX_ITERATIONS"));
    }

    #[test]
    fn test_validation_collects_errors() {
        let mut config = CliConfig::default();
        config.solver.tolerance = 0.0;
        config.output.precision = 30;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation errors, got {:?}", other),
        }
    }
}
