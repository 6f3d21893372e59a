//! Solver-struct front end for the root-finding methods.

use super::RootMethod;
use crate::config::SolverConfig;
use crate::expression::Expression;
use crate::report::RootReport;
use crate::types::SolverError;
use std::sync::Arc;

/// Root finder bound to one method and configuration.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use numsolve_core::expression::{Expr, Expression};
/// use numsolve_core::roots::{RootFinder, RootMethod};
/// use numsolve_core::SolverConfig;
///
/// // Solve x³ - x - 2 = 0 on [1, 2]
/// let f: Arc<dyn Expression> = Arc::new(Expr::x().powi(3) - Expr::x() - 2.0);
/// let finder = RootFinder::new(RootMethod::Bisection, SolverConfig::new(1e-8, 100));
///
/// let report = finder.solve(&f, &[1.0, 2.0]).unwrap();
/// assert!((report.roots[0] - 1.5213797).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinder {
    method: RootMethod,
    config: SolverConfig,
}

impl RootFinder {
    /// Create a root finder with the given method and configuration.
    pub fn new(method: RootMethod, config: SolverConfig) -> Self {
        Self { method, config }
    }

    /// Create a root finder with default configuration.
    pub fn with_defaults(method: RootMethod) -> Self {
        Self {
            method,
            config: SolverConfig::default(),
        }
    }

    /// Selected method.
    pub fn method(&self) -> RootMethod {
        self.method
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve `expression` from the given initial arguments.
    ///
    /// See [`RootMethod::solve`].
    pub fn solve(
        &self,
        expression: &Arc<dyn Expression>,
        arguments: &[f64],
    ) -> Result<RootReport, SolverError> {
        self.method.solve(expression, arguments, &self.config)
    }
}
