//! Bisection configuration types.

use crate::types::SolverError;

/// What to return when a bracket endpoint already hits the target.
///
/// The classic search returns the *dependent* value it evaluated at the
/// endpoint, while the midpoint paths return the *independent* coordinate.
/// Callers that back out an input (implied volatility, for instance) want
/// the coordinate in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndpointPolicy {
    /// Return the function value evaluated at the endpoint.
    #[default]
    DependentValue,
    /// Return the endpoint coordinate itself.
    IndependentValue,
}

/// How the endpoint values are tested for a sign change.
///
/// The classic search multiplies the raw endpoint values, so a bracket whose
/// values are both positive is rejected even when they straddle a non-zero
/// target. Searches for a non-zero target (an option price, say) shift both
/// values by the target first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BracketCheck {
    /// Reject when `f(lower) * f(upper) > 0`.
    #[default]
    Raw,
    /// Reject when `(f(lower) - target) * (f(upper) - target) > 0`.
    TargetShifted,
}

impl BracketCheck {
    /// Whether the endpoint values fail to bracket `target`.
    pub fn rejects(&self, v_lower: f64, v_upper: f64, target: f64) -> bool {
        match self {
            BracketCheck::Raw => v_lower * v_upper > 0.0,
            BracketCheck::TargetShifted => (v_lower - target) * (v_upper - target) > 0.0,
        }
    }
}

/// Configuration for [`BisectionSolver`](super::BisectionSolver).
///
/// # Example
///
/// ```
/// use quant_core::math::solvers::{BisectionConfig, BracketCheck, EndpointPolicy};
///
/// let config = BisectionConfig::default();
/// assert_eq!(config.tolerance, 1e-5);
/// assert_eq!(config.max_iterations, 200);
/// assert_eq!(config.endpoint_policy, EndpointPolicy::DependentValue);
/// assert_eq!(config.bracket_check, BracketCheck::Raw);
///
/// let implied = BisectionConfig::default()
///     .with_policy(EndpointPolicy::IndependentValue)
///     .with_bracket_check(BracketCheck::TargetShifted);
/// assert_eq!(implied.endpoint_policy, EndpointPolicy::IndependentValue);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BisectionConfig {
    /// Tolerance on both `|f(x) - target|` and the bracket width.
    pub tolerance: f64,

    /// Maximum number of halvings before giving up.
    pub max_iterations: usize,

    /// Endpoint short-circuit return value.
    pub endpoint_policy: EndpointPolicy,

    /// Sign test applied to the endpoint values.
    pub bracket_check: BracketCheck,
}

impl Default for BisectionConfig {
    /// Default values:
    /// - `tolerance`: 1e-5
    /// - `max_iterations`: 200
    /// - `endpoint_policy`: [`EndpointPolicy::DependentValue`]
    /// - `bracket_check`: [`BracketCheck::Raw`]
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iterations: 200,
            endpoint_policy: EndpointPolicy::DependentValue,
            bracket_check: BracketCheck::Raw,
        }
    }
}

impl BisectionConfig {
    /// Create a configuration with the given tolerance and iteration limit.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Replace the endpoint policy.
    pub fn with_policy(mut self, policy: EndpointPolicy) -> Self {
        self.endpoint_policy = policy;
        self
    }

    /// Replace the bracket sign test.
    pub fn with_bracket_check(mut self, check: BracketCheck) -> Self {
        self.bracket_check = check;
        self
    }

    /// Check the tolerance is positive and finite.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.tolerance > 0.0 && self.tolerance.is_finite() {
            Ok(())
        } else {
            Err(SolverError::InvalidTolerance(self.tolerance))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BisectionConfig::default();
        assert!((config.tolerance - 1e-5).abs() < 1e-15);
        assert_eq!(config.max_iterations, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_keeps_default_policy() {
        let config = BisectionConfig::new(1e-8, 500);
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.endpoint_policy, EndpointPolicy::DependentValue);
    }

    #[test]
    fn test_validate_rejects_bad_tolerance() {
        for tol in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let config = BisectionConfig::new(tol, 10);
            assert!(matches!(
                config.validate(),
                Err(SolverError::InvalidTolerance(_))
            ));
        }
    }

    #[test]
    fn test_bracket_check_raw_vs_shifted() {
        // 1 and 9 are both positive but straddle 5
        assert!(BracketCheck::Raw.rejects(1.0, 9.0, 5.0));
        assert!(!BracketCheck::TargetShifted.rejects(1.0, 9.0, 5.0));
        assert!(!BracketCheck::Raw.rejects(0.0, 9.0, 5.0));
        assert!(BracketCheck::TargetShifted.rejects(6.0, 9.0, 5.0));
    }

    #[test]
    fn test_config_copy() {
        let config1 = BisectionConfig::default();
        let config2 = config1;
        assert_eq!(config1, config2);
    }
}
