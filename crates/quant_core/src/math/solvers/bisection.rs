//! Bisection search for monotonic functions.

use super::{BisectionConfig, BracketCheck, EndpointPolicy};
use crate::entity::Link;
use crate::types::SolverError;

/// Bisection root finder.
///
/// Searches for `x` in `[lower, upper]` with `f(x) = target`, where `f` is
/// monotonic over the bracket. The update closure may have side effects;
/// typically it sets an entity input and reads a lazily recomputed output.
///
/// # Algorithm
///
/// 1. Evaluate the lower endpoint, then the upper one. An endpoint within
///    tolerance of the target short-circuits (see [`EndpointPolicy`]).
/// 2. The endpoint values must not share a strict sign. With
///    [`BracketCheck::TargetShifted`] the deviations from the target are
///    tested instead.
/// 3. Halve the bracket, keeping the half whose endpoints straddle the
///    target, until the midpoint hits the target or the bracket is no wider
///    than the tolerance.
///
/// # Example
///
/// ```
/// use quant_core::math::solvers::{BisectionConfig, BisectionSolver};
///
/// let solver = BisectionSolver::new(BisectionConfig::new(1e-10, 200));
/// let root = solver.find_root(|x| x * x, 2.0, 0.0, 2.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BisectionSolver {
    config: BisectionConfig,
}

impl BisectionSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: BisectionConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Solver configuration.
    pub fn config(&self) -> &BisectionConfig {
        &self.config
    }

    /// Find `x` in `[lower, upper]` such that `update(x)` is within
    /// tolerance of `target`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - The midpoint that hit the target or the centre of the
    ///   final bracket. An endpoint hit returns according to the policy.
    /// * `Err(SolverError::InvalidTolerance)` - Non-positive tolerance
    /// * `Err(SolverError::InvalidBracket)` - Endpoints fail the bracket check
    /// * `Err(SolverError::MaxIterationsExceeded)` - Bracket never narrowed enough
    pub fn find_root<F>(
        &self,
        mut update: F,
        target: f64,
        lower: f64,
        upper: f64,
    ) -> Result<f64, SolverError>
    where
        F: FnMut(f64) -> f64,
    {
        self.config.validate()?;
        let tol = self.config.tolerance;
        let hits = |v: f64| (v - target).abs() <= tol;

        let v_lower = update(lower);
        if hits(v_lower) {
            return Ok(self.endpoint(lower, v_lower));
        }
        let mut v_upper = update(upper);
        if hits(v_upper) {
            return Ok(self.endpoint(upper, v_upper));
        }

        if self.config.bracket_check.rejects(v_lower, v_upper, target) {
            return Err(SolverError::InvalidBracket {
                lower,
                upper,
                f_lower: v_lower,
                f_upper: v_upper,
                target,
            });
        }

        let (mut lo, mut hi) = (lower, upper);
        let mut iterations = 0;
        while (lo - hi).abs() > tol {
            if iterations >= self.config.max_iterations {
                return Err(SolverError::MaxIterationsExceeded { iterations });
            }
            iterations += 1;

            let mid = 0.5 * (lo + hi);
            let v_mid = update(mid);
            if hits(v_mid) {
                return Ok(mid);
            }
            if (v_mid - target) * (v_upper - target) < 0.0 {
                lo = mid;
            } else {
                hi = mid;
                v_upper = v_mid;
            }
        }

        Ok(0.5 * (lo + hi))
    }

    /// Run [`find_root`](Self::find_root) over a remote link.
    pub fn find_root_link(
        &self,
        link: &Link,
        target: f64,
        lower: f64,
        upper: f64,
    ) -> Result<f64, SolverError> {
        self.find_root(|x| link(x), target, lower, upper)
    }

    fn endpoint(&self, x: f64, value: f64) -> f64 {
        match self.config.endpoint_policy {
            EndpointPolicy::DependentValue => value,
            EndpointPolicy::IndependentValue => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ========================================
    // Convergence
    // ========================================

    #[test]
    fn test_square_root() {
        let solver = BisectionSolver::with_defaults();
        let root = solver.find_root(|x| x * x, 2.0, 0.0, 2.0).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-5);
    }

    #[test]
    fn test_decreasing_function() {
        let solver = BisectionSolver::new(BisectionConfig::new(1e-9, 200));
        let root = solver.find_root(|x| 10.0 - 2.0 * x, 4.0, 0.0, 5.0).unwrap();
        assert_abs_diff_eq!(root, 3.0, epsilon = 1e-8);
    }

    #[test]
    fn test_reversed_bracket() {
        let solver = BisectionSolver::with_defaults();
        let root = solver.find_root(|x| x * x * x, 8.0, 3.0, 0.0).unwrap();
        assert_abs_diff_eq!(root, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_update_with_side_effects() {
        let mut calls = 0;
        let solver = BisectionSolver::new(
            BisectionConfig::default().with_bracket_check(BracketCheck::TargetShifted),
        );
        let root = solver
            .find_root(
                |x| {
                    calls += 1;
                    x.exp()
                },
                std::f64::consts::E,
                0.0,
                2.0,
            )
            .unwrap();
        assert_abs_diff_eq!(root, 1.0, epsilon = 1e-4);
        assert!(calls > 2);
    }

    // ========================================
    // Endpoint short-circuit
    // ========================================

    #[test]
    fn test_lower_endpoint_returns_dependent_value() {
        let solver = BisectionSolver::with_defaults();
        let result = solver.find_root(|x| 3.0 * x + 1.0, 1.0, 0.0, 4.0).unwrap();
        assert_eq!(result, 1.0);
    }

    #[test]
    fn test_upper_endpoint_returns_dependent_value() {
        let solver = BisectionSolver::with_defaults();
        let result = solver.find_root(|x| 3.0 * x + 1.0, 13.0, 0.0, 4.0).unwrap();
        assert_eq!(result, 13.0);
    }

    #[test]
    fn test_endpoint_independent_policy() {
        let config = BisectionConfig::default().with_policy(EndpointPolicy::IndependentValue);
        let solver = BisectionSolver::new(config);
        let result = solver.find_root(|x| 3.0 * x + 1.0, 13.0, 0.0, 4.0).unwrap();
        assert_eq!(result, 4.0);
    }

    #[test]
    fn test_lower_hit_skips_upper_evaluation() {
        let mut seen = Vec::new();
        let solver = BisectionSolver::with_defaults();
        solver
            .find_root(
                |x| {
                    seen.push(x);
                    x
                },
                0.0,
                0.0,
                1.0,
            )
            .unwrap();
        assert_eq!(seen, vec![0.0]);
    }

    // ========================================
    // Errors
    // ========================================

    #[test]
    fn test_invalid_bracket() {
        let solver = BisectionSolver::with_defaults();
        let err = solver.find_root(|x| x * x, -1.0, 1.0, 2.0).unwrap_err();
        assert!(matches!(err, SolverError::InvalidBracket { .. }));
    }

    #[test]
    fn test_positive_endpoints_rejected_by_default() {
        // 1 and 9 straddle 5 but their product is positive
        let solver = BisectionSolver::with_defaults();
        let err = solver.find_root(|x| x, 5.0, 1.0, 9.0).unwrap_err();
        assert_eq!(
            err,
            SolverError::InvalidBracket {
                lower: 1.0,
                upper: 9.0,
                f_lower: 1.0,
                f_upper: 9.0,
                target: 5.0,
            }
        );
    }

    #[test]
    fn test_target_shifted_bracket() {
        let solver = BisectionSolver::new(
            BisectionConfig::default().with_bracket_check(BracketCheck::TargetShifted),
        );
        let root = solver.find_root(|x| x, 5.0, 1.0, 9.0).unwrap();
        assert_abs_diff_eq!(root, 5.0, epsilon = 1e-5);

        let err = solver.find_root(|x| x, 10.0, 1.0, 9.0).unwrap_err();
        assert!(matches!(err, SolverError::InvalidBracket { .. }));
    }

    #[test]
    fn test_invalid_tolerance() {
        let solver = BisectionSolver::new(BisectionConfig::new(0.0, 10));
        assert_eq!(
            solver.find_root(|x| x, 0.5, 0.0, 1.0),
            Err(SolverError::InvalidTolerance(0.0))
        );
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = BisectionSolver::new(BisectionConfig::new(1e-12, 5));
        let err = solver.find_root(|x| x * x, 2.0, 0.0, 2.0).unwrap_err();
        assert_eq!(err, SolverError::MaxIterationsExceeded { iterations: 5 });
    }

    #[test]
    fn test_find_root_link() {
        let link: Link = Box::new(|x| 2.0 * x);
        let solver = BisectionSolver::with_defaults();
        let root = solver.find_root_link(&link, 1.0, 0.0, 3.0).unwrap();
        assert_abs_diff_eq!(root, 0.5, epsilon = 1e-5);
    }
}
