//! Linsys command implementation
//!
//! Solves a square linear system with one method or with every method.

use numsolve_core::linear::{AugmentedMatrix, LinearMethod};
use numsolve_core::{LinearReport, SolverError};
use tracing::{info, warn};

use super::output::linear_table;
use super::{parse_list, parse_rows};
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Parse a method name or `all`
pub fn parse_methods(method: &str) -> Result<Vec<LinearMethod>> {
    if method.eq_ignore_ascii_case("all") {
        return Ok(LinearMethod::ALL.to_vec());
    }
    method
        .parse()
        .map(|m| vec![m])
        .map_err(CliError::InvalidArgument)
}

/// Run every method on its own copy of `system`.
pub fn solve(
    methods: &[LinearMethod],
    system: &AugmentedMatrix,
    guess: Option<&[f64]>,
    config: &CliConfig,
) -> Vec<(LinearMethod, std::result::Result<LinearReport, SolverError>)> {
    methods
        .iter()
        .map(|&method| {
            let outcome = method.solve(system.clone(), guess, &config.solver);
            if let Err(e) = &outcome {
                warn!("{} failed: {}", method.title(), e);
            }
            (method, outcome)
        })
        .collect()
}

/// Run the linsys command
pub fn run(method: &str, system: &str, guess: Option<&str>, config: &CliConfig) -> Result<()> {
    let methods = parse_methods(method)?;
    let system = AugmentedMatrix::from_rows(&parse_rows(system)?)?;
    let guess = guess.map(parse_list).transpose()?;

    info!("Solving {}x{} system", system.order(), system.order());
    info!("  Method: {}", method);
    if let Some(guess) = &guess {
        info!("  Initial guess: {:?}", guess);
    }

    let outcomes = solve(&methods, &system, guess.as_deref(), config);

    if let ([_], Some((_, Err(e)))) = (methods.as_slice(), outcomes.first()) {
        return Err(e.clone().into());
    }

    match config.output.format {
        OutputFormat::Json => {
            let reports: Vec<&LinearReport> =
                outcomes.iter().filter_map(|(_, o)| o.as_ref().ok()).collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Table => {
            for (method, outcome) in &outcomes {
                match outcome {
                    Ok(report) => println!("{}", linear_table(report, config.output.precision)),
                    Err(e) => println!("{}: {}\n", method.title(), e),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_methods() {
        assert_eq!(parse_methods("all").unwrap().len(), 5);
        assert_eq!(parse_methods("lu").unwrap(), vec![LinearMethod::LuDecomposition]);
        assert!(parse_methods("qr").is_err());
    }

    #[test]
    fn test_all_methods_agree() {
        let system = AugmentedMatrix::from_rows(&parse_rows("4,1,2,4;1,5,1,7;2,1,3,3").unwrap()).unwrap();
        let mut config = CliConfig::default();
        config.solver.tolerance = 1e-10;
        config.solver.max_iterations = 500;

        let outcomes = solve(&LinearMethod::ALL, &system, None, &config);
        let reference = outcomes[0].1.as_ref().unwrap().solution.clone();
        for (_, outcome) in &outcomes {
            let report = outcome.as_ref().unwrap();
            for (a, b) in report.solution.iter().zip(&reference) {
                assert_relative_eq!(*a, *b, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_run_rejects_bad_shape() {
        let err = run("gauss", "1,2;3,4", None, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Solver(SolverError::InvalidInput(_))));
    }
}
