//! Root-finding method enumeration and dispatch.

use super::birge_vieta::birge_vieta;
use super::bracket::{bisection, regula_falsi};
use super::iteration::Stage;
use super::newton::{modified_newton_known, modified_newton_unknown, newton_raphson};
use super::secant::{fixed_point, secant};
use crate::config::SolverConfig;
use crate::expression::Expression;
use crate::report::RootReport;
use crate::types::SolverError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, debug_span};

/// Available root-finding methods.
///
/// # Examples
///
/// ```
/// use numsolve_core::roots::RootMethod;
///
/// let method: RootMethod = "regula-falsi".parse().unwrap();
/// assert_eq!(method, RootMethod::RegulaFalsi);
/// assert_eq!(method.title(), "Regula-Falsi");
/// assert_eq!(method.argument_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RootMethod {
    /// Interval halving. Arguments: `[xl, xu]`.
    Bisection,
    /// False position. Arguments: `[xl, xu]`.
    RegulaFalsi,
    /// Newton's method. Arguments: `[x0]`.
    NewtonRaphson,
    /// Newton scaled by a known multiplicity. Arguments: `[x0, m]`.
    #[cfg_attr(feature = "serde", serde(rename = "modified-newton-1"))]
    ModifiedNewtonKnown,
    /// Newton on `f / f'` for roots of unknown multiplicity. Arguments: `[x0]`.
    #[cfg_attr(feature = "serde", serde(rename = "modified-newton-2"))]
    ModifiedNewtonUnknown,
    /// Secant method. Arguments: `[x0, x1]`, `x0` is the current point and
    /// `x1` the previous one.
    Secant,
    /// Fixed-point iteration on `x - f(x)`. Arguments: `[x0]`.
    FixedPoint,
    /// Newton with polynomial deflation, polynomials only. Arguments: `[x0]`.
    BirgeVieta,
}

impl RootMethod {
    /// Every method, in menu order.
    pub const ALL: [RootMethod; 8] = [
        RootMethod::Bisection,
        RootMethod::RegulaFalsi,
        RootMethod::NewtonRaphson,
        RootMethod::ModifiedNewtonKnown,
        RootMethod::ModifiedNewtonUnknown,
        RootMethod::Secant,
        RootMethod::FixedPoint,
        RootMethod::BirgeVieta,
    ];

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            RootMethod::Bisection => "Bisection",
            RootMethod::RegulaFalsi => "Regula-Falsi",
            RootMethod::NewtonRaphson => "Newton-Raphson",
            RootMethod::ModifiedNewtonKnown => "Modified Newton 1",
            RootMethod::ModifiedNewtonUnknown => "Modified Newton 2",
            RootMethod::Secant => "Secant",
            RootMethod::FixedPoint => "Fixed-Point",
            RootMethod::BirgeVieta => "Birge-Vieta",
        }
    }

    /// Short kebab-case identifier, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            RootMethod::Bisection => "bisection",
            RootMethod::RegulaFalsi => "regula-falsi",
            RootMethod::NewtonRaphson => "newton-raphson",
            RootMethod::ModifiedNewtonKnown => "modified-newton-1",
            RootMethod::ModifiedNewtonUnknown => "modified-newton-2",
            RootMethod::Secant => "secant",
            RootMethod::FixedPoint => "fixed-point",
            RootMethod::BirgeVieta => "birge-vieta",
        }
    }

    /// Number of initial arguments the method expects.
    pub fn argument_count(&self) -> usize {
        match self {
            RootMethod::Bisection
            | RootMethod::RegulaFalsi
            | RootMethod::ModifiedNewtonKnown
            | RootMethod::Secant => 2,
            RootMethod::NewtonRaphson
            | RootMethod::ModifiedNewtonUnknown
            | RootMethod::FixedPoint
            | RootMethod::BirgeVieta => 1,
        }
    }

    /// Returns `true` for methods that keep the root bracketed.
    pub fn is_bracketing(&self) -> bool {
        matches!(self, RootMethod::Bisection | RootMethod::RegulaFalsi)
    }

    /// Run this method on `expression`.
    ///
    /// # Arguments
    ///
    /// * `expression` - Function whose root is sought
    /// * `arguments` - Initial arguments, see [`RootMethod::argument_count`]
    /// * `config` - Tolerance and iteration budget
    ///
    /// # Errors
    ///
    /// Precondition errors (argument count, bracket, non-polynomial input,
    /// invalid config) are returned before iterating. Numeric degeneracy
    /// aborts the run. Exhausting the budget is reported through
    /// [`RootReport::converged`], not as an error.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use numsolve_core::expression::{Expression, Polynomial};
    /// use numsolve_core::roots::RootMethod;
    /// use numsolve_core::SolverConfig;
    ///
    /// let f: Arc<dyn Expression> = Arc::new(Polynomial::new(vec![1.0, 0.0, -4.0]));
    /// let report = RootMethod::NewtonRaphson
    ///     .solve(&f, &[3.0], &SolverConfig::default())
    ///     .unwrap();
    ///
    /// assert!(report.converged);
    /// assert!((report.roots[0] - 2.0).abs() < 1e-5);
    /// ```
    pub fn solve(
        self,
        expression: &Arc<dyn Expression>,
        arguments: &[f64],
        config: &SolverConfig,
    ) -> Result<RootReport, SolverError> {
        let span = debug_span!("root_solve", method = self.name());
        let _enter = span.enter();

        config.validate().map_err(SolverError::InvalidInput)?;
        if arguments.len() != self.argument_count() {
            return Err(SolverError::ArgumentCount {
                method: self.title().to_string(),
                expected: self.argument_count(),
                got: arguments.len(),
            });
        }
        if let Some(bad) = arguments.iter().find(|a| !a.is_finite()) {
            return Err(SolverError::invalid_input(format!(
                "initial arguments must be finite, got {}",
                bad
            )));
        }

        let start = Instant::now();
        let f = expression.as_ref();
        let derivative = expression.differentiate();

        let stages = match self {
            RootMethod::Bisection => vec![bisection(f, arguments[0], arguments[1], config)?],
            RootMethod::RegulaFalsi => {
                vec![regula_falsi(f, arguments[0], arguments[1], config)?]
            }
            RootMethod::NewtonRaphson => {
                vec![newton_raphson(f, derivative.as_ref(), arguments[0], config)?]
            }
            RootMethod::ModifiedNewtonKnown => vec![modified_newton_known(
                f,
                derivative.as_ref(),
                arguments[0],
                arguments[1],
                config,
            )?],
            RootMethod::ModifiedNewtonUnknown => {
                let second = derivative.differentiate();
                vec![modified_newton_unknown(
                    f,
                    derivative.as_ref(),
                    second.as_ref(),
                    arguments[0],
                    config,
                )?]
            }
            RootMethod::Secant => vec![secant(f, arguments[0], arguments[1], config)?],
            RootMethod::FixedPoint => vec![fixed_point(f, arguments[0], config)?],
            RootMethod::BirgeVieta => birge_vieta(f, arguments[0], config)?,
        };
        let elapsed = start.elapsed();

        let converged = stages.iter().all(|s| s.converged);
        let (mut traces, mut roots, mut errors) = (
            Vec::with_capacity(stages.len()),
            Vec::with_capacity(stages.len()),
            Vec::with_capacity(stages.len()),
        );
        for Stage {
            trace,
            root,
            error,
            ..
        } in stages
        {
            traces.push(trace);
            roots.push(root);
            errors.push(error);
        }

        debug!(
            function = %expression,
            roots = ?roots,
            converged,
            elapsed_us = elapsed.as_micros() as u64,
            "solve finished"
        );

        Ok(RootReport {
            method: self,
            title: self.title().to_string(),
            traces,
            roots,
            errors,
            error_bound: config.tolerance,
            converged,
            elapsed,
            function: Arc::clone(expression),
            derivative,
        })
    }
}

impl fmt::Display for RootMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RootMethod {
    type Err = String;

    /// Parses a method name (case-insensitive, `-`/`_`/space ignored).
    ///
    /// Also accepts the short forms "newton", "false-position", "mn1",
    /// "mn2", "fixed" and "horner".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "bisection" => Ok(RootMethod::Bisection),
            "regulafalsi" | "falseposition" => Ok(RootMethod::RegulaFalsi),
            "newtonraphson" | "newton" => Ok(RootMethod::NewtonRaphson),
            "modifiednewton1" | "mn1" => Ok(RootMethod::ModifiedNewtonKnown),
            "modifiednewton2" | "mn2" => Ok(RootMethod::ModifiedNewtonUnknown),
            "secant" => Ok(RootMethod::Secant),
            "fixedpoint" | "fixed" => Ok(RootMethod::FixedPoint),
            "birgevieta" | "horner" => Ok(RootMethod::BirgeVieta),
            _ => Err(format!("Unknown root-finding method: {}", s)),
        }
    }
}
