//! Solver configuration types.

/// Configuration shared by every iterative method.
///
/// Root-finders and the Jacobi/Gauss-Seidel solvers stop as soon as the
/// measured error is `<= tolerance`, or after `max_iterations` steps.
/// Running out of iterations is not an error: the last iterate is reported.
///
/// # Example
///
/// ```
/// use numsolve_core::SolverConfig;
///
/// // Use default configuration
/// let config = SolverConfig::default();
/// assert_eq!(config.tolerance, 1e-5);
/// assert_eq!(config.max_iterations, 50);
///
/// // Custom configuration
/// let custom = SolverConfig {
///     tolerance: 1e-10,
///     max_iterations: 200,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Convergence tolerance on the step error.
    ///
    /// Root-finders measure `|x_new - x_old|`; iterative linear solvers
    /// measure the largest component change.
    pub tolerance: f64,

    /// Maximum number of iterations per stage.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `tolerance`: 1e-5
    /// - `max_iterations`: 50
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iterations: 50,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is not positive and finite, or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use numsolve_core::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-8, 100);
    /// assert_eq!(config.max_iterations, 100);
    /// ```
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(
            tolerance > 0.0 && tolerance.is_finite(),
            "tolerance must be positive"
        );
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Tighter tolerance (1e-12) and more iterations (500).
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 500,
        }
    }

    /// Relaxed tolerance (1e-3) and fewer iterations (20).
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-3,
            max_iterations: 20,
        }
    }

    /// Check a configuration built by struct literal or deserialisation.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            ));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }
        Ok(())
    }
}
