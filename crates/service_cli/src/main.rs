//! numsolve CLI - Command Line Front End for the Numerical Solvers
//!
//! # Commands
//!
//! - `numsolve roots --method <name|all> --poly <coeffs> --args <values>` - Find polynomial roots
//! - `numsolve linsys --method <name|all> --system <rows>` - Solve a square linear system
//! - `numsolve methods` - List available methods
//!
//! Solver tolerance, iteration budget and output format come from
//! `numsolve.toml` (see the `config` module) with `NUMSOLVE_*` environment overrides.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Root-finding and linear-system solver CLI
#[derive(Parser)]
#[command(name = "numsolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "numsolve.toml")]
    config: PathBuf,

    /// Output format (table, json); overrides the configuration file
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find roots of a polynomial
    Roots {
        /// Method name (e.g. bisection, newton-raphson, birge-vieta) or "all"
        #[arg(short, long, default_value = "all")]
        method: String,

        /// Polynomial coefficients, highest degree first (e.g. "1,0,-4" for x^2 - 4)
        #[arg(short, long, allow_hyphen_values = true)]
        poly: String,

        /// Initial arguments: a bracket, one or two starting points
        #[arg(short, long, allow_hyphen_values = true)]
        args: String,

        /// Root multiplicity for modified-newton-1 when only x0 is given
        #[arg(long, default_value = "1")]
        multiplicity: f64,
    },

    /// Solve a square linear system given as an augmented matrix
    Linsys {
        /// Method name (gauss, gauss-jordan, lu, jacobi, gauss-seidel) or "all"
        #[arg(short, long, default_value = "all")]
        method: String,

        /// Rows of [A | b] separated by ';' (e.g. "2,1,3;1,3,4")
        #[arg(short, long, allow_hyphen_values = true)]
        system: String,

        /// Initial guess for iterative methods (default: zeros)
        #[arg(short, long, allow_hyphen_values = true)]
        guess: Option<String>,
    },

    /// List available methods
    Methods,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let mut config = config::CliConfig::load_with_env_and_validate(&cli.config)?;
    if let Some(format) = &cli.format {
        config.output.format = format.parse().map_err(CliError::InvalidArgument)?;
    }
    info!("Configuration: {:?}", config);

    match cli.command {
        Commands::Roots {
            method,
            poly,
            args,
            multiplicity,
        } => commands::roots::run(&method, &poly, &args, multiplicity, &config),
        Commands::Linsys {
            method,
            system,
            guess,
        } => commands::linsys::run(&method, &system, guess.as_deref(), &config),
        Commands::Methods => commands::methods::run(),
    }
}
