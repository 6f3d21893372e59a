//! Result records shared by the root-finding and linear-system engines.
//!
//! Reports are built fresh by every solve call and carry everything a
//! presentation layer needs: iteration traces, final values, errors, the
//! error bound and method metadata.

use crate::expression::Expression;
use crate::linear::{LinearMethod, Matrix};
use crate::roots::RootMethod;
use std::sync::Arc;
use std::time::Duration;

/// One recorded iteration: the new iterate and its error estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry<X> {
    /// Iterate produced by this step.
    pub iterate: X,
    /// Error estimate measured at this step.
    pub error: f64,
}

/// Ordered sequence of iterations, one entry appended per step.
///
/// `X = f64` for root-finders, `X = Vec<f64>` for iterative linear solvers.
///
/// # Example
///
/// ```
/// use numsolve_core::report::IterationTrace;
///
/// let mut trace = IterationTrace::new();
/// trace.push(2.5, 0.5);
/// trace.push(2.05, 0.45);
///
/// assert_eq!(trace.len(), 2);
/// assert_eq!(trace.last_iterate(), Some(&2.05));
/// assert_eq!(trace.last_error(), Some(0.45));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationTrace<X = f64> {
    entries: Vec<TraceEntry<X>>,
}

impl<X> IterationTrace<X> {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an iteration.
    pub fn push(&mut self, iterate: X, error: f64) {
        self.entries.push(TraceEntry { iterate, error });
    }

    /// Number of recorded iterations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded entries in iteration order.
    pub fn entries(&self) -> &[TraceEntry<X>] {
        &self.entries
    }

    /// Iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry<X>> {
        self.entries.iter()
    }

    /// Iterates in order.
    pub fn iterates(&self) -> impl Iterator<Item = &X> {
        self.entries.iter().map(|e| &e.iterate)
    }

    /// Errors in order.
    pub fn errors(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.error)
    }

    /// Most recent iterate.
    pub fn last_iterate(&self) -> Option<&X> {
        self.entries.last().map(|e| &e.iterate)
    }

    /// Most recent error.
    pub fn last_error(&self) -> Option<f64> {
        self.entries.last().map(|e| e.error)
    }
}

impl<X> Default for IterationTrace<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, X> IntoIterator for &'a IterationTrace<X> {
    type Item = &'a TraceEntry<X>;
    type IntoIter = std::slice::Iter<'a, TraceEntry<X>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outcome of a root-finding solve.
///
/// Single-root methods produce one trace; Birge-Vieta produces one trace per
/// deflation stage. `roots`, `errors` and `traces` always have equal length.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RootReport {
    /// Method that produced this report.
    pub method: RootMethod,
    /// Display title of the method.
    pub title: String,
    /// One trace per stage.
    pub traces: Vec<IterationTrace>,
    /// Final root estimate per stage.
    pub roots: Vec<f64>,
    /// Final error per stage.
    pub errors: Vec<f64>,
    /// Configured convergence tolerance.
    pub error_bound: f64,
    /// `true` when every stage met the tolerance.
    pub converged: bool,
    /// Wall-clock time spent solving.
    pub elapsed: Duration,
    /// The function that was solved.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub function: Arc<dyn Expression>,
    /// Its derivative.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub derivative: Arc<dyn Expression>,
}

impl RootReport {
    /// First (or only) root.
    pub fn root(&self) -> Option<f64> {
        self.roots.first().copied()
    }

    /// Total iterations across all stages.
    pub fn iterations(&self) -> usize {
        self.traces.iter().map(IterationTrace::len).sum()
    }

    /// Function value at each recorded iterate of a stage, for tabulation.
    pub fn residuals(&self, stage: usize) -> Vec<f64> {
        self.traces
            .get(stage)
            .map(|t| t.iterates().map(|&x| self.function.evaluate(x)).collect())
            .unwrap_or_default()
    }
}

/// Outcome of a linear-system solve.
///
/// Direct methods leave `trace` empty. Iterative methods record one entry per
/// sweep: the full solution vector and `max_i |x_new_i - x_old_i|`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearReport {
    /// Method that produced this report.
    pub method: LinearMethod,
    /// Display title of the method.
    pub title: String,
    /// Solution vector (last iterate for iterative methods).
    pub solution: Vec<f64>,
    /// Starting vector of an iterative method; empty for direct methods.
    pub initial_guess: Vec<f64>,
    /// Per-sweep iterates and errors.
    pub trace: IterationTrace<Vec<f64>>,
    /// Configured convergence tolerance (0 for direct methods).
    pub error_bound: f64,
    /// `true` for direct methods and for iterative methods that met the tolerance.
    pub converged: bool,
    /// Wall-clock time spent solving.
    pub elapsed: Duration,
}

impl LinearReport {
    /// Number of sweeps performed (0 for direct methods).
    pub fn iterations(&self) -> usize {
        self.trace.len()
    }

    /// Last measured error, if the method iterated.
    pub fn final_error(&self) -> Option<f64> {
        self.trace.last_error()
    }

    /// Iterate history with one column per iterate, initial guess first.
    ///
    /// Returns `None` for direct methods.
    pub fn history_matrix(&self) -> Option<Matrix> {
        if self.initial_guess.is_empty() {
            return None;
        }
        let n = self.initial_guess.len();
        let columns: Vec<&Vec<f64>> = std::iter::once(&self.initial_guess)
            .chain(self.trace.iterates())
            .collect();
        let mut history = Matrix::zeros(n, columns.len());
        for (j, column) in columns.iter().enumerate() {
            for (i, &value) in column.iter().enumerate() {
                history[(i, j)] = value;
            }
        }
        Some(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Polynomial;

    #[test]
    fn test_trace_push_and_read() {
        let mut trace: IterationTrace = IterationTrace::default();
        assert!(trace.is_empty());
        trace.push(1.5, 0.5);
        trace.push(1.25, 0.25);

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.iterates().copied().collect::<Vec<_>>(), vec![1.5, 1.25]);
        assert_eq!(trace.errors().collect::<Vec<_>>(), vec![0.5, 0.25]);
        assert_eq!(trace.entries()[0], TraceEntry { iterate: 1.5, error: 0.5 });
    }

    #[test]
    fn test_root_report_helpers() {
        let f: Arc<dyn Expression> = Arc::new(Polynomial::new(vec![1.0, 0.0, -4.0]));
        let mut trace = IterationTrace::new();
        trace.push(2.5, 0.5);
        trace.push(2.0, 0.5);

        let report = RootReport {
            method: RootMethod::NewtonRaphson,
            title: RootMethod::NewtonRaphson.title().to_string(),
            traces: vec![trace],
            roots: vec![2.0],
            errors: vec![0.5],
            error_bound: 1e-5,
            converged: false,
            elapsed: Duration::ZERO,
            derivative: f.differentiate(),
            function: f,
        };

        assert_eq!(report.root(), Some(2.0));
        assert_eq!(report.iterations(), 2);
        assert_eq!(report.residuals(0), vec![2.25, 0.0]);
        assert!(report.residuals(1).is_empty());
    }

    #[test]
    fn test_history_matrix_columns() {
        let mut trace = IterationTrace::new();
        trace.push(vec![1.0, 2.0], 2.0);
        trace.push(vec![1.5, 2.5], 0.5);

        let report = LinearReport {
            method: LinearMethod::Jacobi,
            title: "Jacobi".to_string(),
            solution: vec![1.5, 2.5],
            initial_guess: vec![0.0, 0.0],
            trace,
            error_bound: 1e-5,
            converged: false,
            elapsed: Duration::ZERO,
        };

        let history = report.history_matrix().unwrap();
        assert_eq!(history.nrows(), 2);
        assert_eq!(history.ncols(), 3);
        assert_eq!(history[(0, 0)], 0.0);
        assert_eq!(history[(1, 1)], 2.0);
        assert_eq!(history[(0, 2)], 1.5);
        assert_eq!(report.final_error(), Some(0.5));
    }
}
