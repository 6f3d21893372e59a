//! Roots command implementation
//!
//! Finds roots of a polynomial with one method or with every method.

use numsolve_core::expression::{Expression, Polynomial};
use numsolve_core::roots::RootMethod;
use numsolve_core::RootReport;
use std::sync::Arc;
use tracing::{info, warn};

use super::output::root_table;
use super::parse_list;
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Selected method, or every method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// One method
    One(RootMethod),
    /// Every method that accepts the given arguments
    All,
}

impl std::str::FromStr for Selection {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse()
            .map(Self::One)
            .map_err(CliError::InvalidArgument)
    }
}

/// Initial arguments for `method` from the user's list.
///
/// Bracketing and secant take the first two values; Modified Newton 1 takes
/// the first value plus the multiplicity; the rest take the first value.
fn arguments_for(method: RootMethod, args: &[f64], multiplicity: f64) -> Vec<f64> {
    match method {
        RootMethod::ModifiedNewtonKnown if args.len() == 1 => vec![args[0], multiplicity],
        _ if method.argument_count() <= args.len() => args[..method.argument_count()].to_vec(),
        _ => args.to_vec(),
    }
}

/// Run every selected method and collect its report or error.
pub fn solve(
    selection: Selection,
    f: &Arc<dyn Expression>,
    args: &[f64],
    multiplicity: f64,
    config: &CliConfig,
) -> Vec<(RootMethod, std::result::Result<RootReport, numsolve_core::SolverError>)> {
    let methods: Vec<RootMethod> = match selection {
        Selection::One(method) => vec![method],
        Selection::All => RootMethod::ALL.to_vec(),
    };

    methods
        .into_iter()
        .map(|method| {
            let arguments = match selection {
                Selection::One(_) if method != RootMethod::ModifiedNewtonKnown => args.to_vec(),
                _ => arguments_for(method, args, multiplicity),
            };
            let outcome = method.solve(f, &arguments, &config.solver);
            if let Err(e) = &outcome {
                warn!("{} failed: {}", method.title(), e);
            }
            (method, outcome)
        })
        .collect()
}

/// Run the roots command
pub fn run(
    method: &str,
    poly: &str,
    args: &str,
    multiplicity: f64,
    config: &CliConfig,
) -> Result<()> {
    let selection: Selection = method.parse()?;
    let coefficients = parse_list(poly)?;
    if coefficients.is_empty() {
        return Err(CliError::invalid_argument("--poly needs at least one coefficient"));
    }
    let args = parse_list(args)?;
    let f: Arc<dyn Expression> = Arc::new(Polynomial::new(coefficients));

    info!("Solving f(x) = {}", f);
    info!("  Method: {}", method);
    info!("  Arguments: {:?}", args);
    info!("  Tolerance: {:e}", config.solver.tolerance);

    let outcomes = solve(selection, &f, &args, multiplicity, config);

    // A single failing method is an error; with "all" failures are listed.
    if let (Selection::One(_), Some((_, Err(e)))) = (selection, outcomes.first()) {
        return Err(e.clone().into());
    }

    match config.output.format {
        OutputFormat::Json => {
            let reports: Vec<&RootReport> =
                outcomes.iter().filter_map(|(_, o)| o.as_ref().ok()).collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Table => {
            for (method, outcome) in &outcomes {
                match outcome {
                    Ok(report) => println!("{}", root_table(report, config.output.precision)),
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

    fn quadratic() -> Arc<dyn Expression> {
        Arc::new(Polynomial::new(vec![1.0, 0.0, -4.0]))
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!("ALL".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!(
            "secant".parse::<Selection>().unwrap(),
            Selection::One(RootMethod::Secant)
        );
        assert!("steffensen".parse::<Selection>().is_err());
    }

    #[test]
    fn test_arguments_for() {
        let args = [1.0, 3.0];
        assert_eq!(arguments_for(RootMethod::Bisection, &args, 1.0), vec![1.0, 3.0]);
        assert_eq!(arguments_for(RootMethod::NewtonRaphson, &args, 1.0), vec![1.0]);
        assert_eq!(
            arguments_for(RootMethod::ModifiedNewtonKnown, &[1.5], 2.0),
            vec![1.5, 2.0]
        );
        assert_eq!(arguments_for(RootMethod::Secant, &[1.0], 1.0), vec![1.0]);
    }

    #[test]
    fn test_all_methods_on_bracket() {
        let outcomes = solve(Selection::All, &quadratic(), &[1.0, 3.0], 1.0, &CliConfig::default());
        assert_eq!(outcomes.len(), RootMethod::ALL.len());

        for (method, outcome) in &outcomes {
            if *method == RootMethod::FixedPoint {
                // x - (x² - 4) diverges from 1
                continue;
            }
            let report = outcome.as_ref().unwrap();
            assert_relative_eq!(report.roots[0], 2.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_single_method_keeps_user_arguments() {
        let outcomes = solve(
            Selection::One(RootMethod::NewtonRaphson),
            &quadratic(),
            &[1.0, 3.0],
            1.0,
            &CliConfig::default(),
        );
        assert!(matches!(
            outcomes[0].1,
            Err(numsolve_core::SolverError::ArgumentCount { .. })
        ));
    }
}
