//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod linsys;
pub mod methods;
pub mod output;
pub mod roots;

use crate::{CliError, Result};

/// Parse a comma-separated list of numbers
pub fn parse_list(input: &str) -> Result<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| CliError::invalid_argument(format!("'{}' is not a number", s)))
        })
        .collect()
}

/// Parse `"a,b,c;d,e,f"` into rows
pub fn parse_rows(input: &str) -> Result<Vec<Vec<f64>>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_list)
        .collect()
}
