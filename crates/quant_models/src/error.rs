//! Model error types.
//!
//! This module provides structured error handling for entity construction
//! and the analytic model helpers.

use quant_core::types::{InterpolationError, ReactiveError, SolverError};
use thiserror::Error;

/// Errors raised while building or querying domain entities.
///
/// # Variants
/// - `MissingPricingMode`: An option received neither a volatility nor a price
/// - `InvalidMarketData`: Market arrays are inconsistent or too short
/// - `InvalidParameter`: General parameter validation failure
/// - `Reactive`: Input coercion or property registration failed
/// - `Interpolation`: Curve construction or evaluation failed
/// - `Solver`: A root search inside a model failed
///
/// # Examples
/// ```
/// use quant_models::ModelError;
///
/// let err = ModelError::MissingPricingMode { entity: "go1".to_string() };
/// assert!(format!("{}", err).contains("go1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Neither sigma (pricing mode) nor price (implied mode) was supplied.
    #[error("Option '{entity}' needs either a volatility or a price")]
    MissingPricingMode {
        /// Entity name
        entity: String,
    },

    /// Market arrays failed validation.
    #[error("Invalid market data: {message}")]
    InvalidMarketData {
        /// Description of the problem
        message: String,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },

    /// Reactive layer failure.
    #[error(transparent)]
    Reactive(#[from] ReactiveError),

    /// Interpolation failure.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    /// Root-finding failure.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Result alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reactive_error() {
        let err: ModelError = ReactiveError::MissingInput {
            parameter: "price".to_string(),
        }
        .into();
        assert!(matches!(err, ModelError::Reactive(_)));
        assert_eq!(
            format!("{}", err),
            "Missing input for 'price' and no default is defined"
        );
    }

    #[test]
    fn test_invalid_market_data_display() {
        let err = ModelError::InvalidMarketData {
            message: "lengths differ".to_string(),
        };
        assert_eq!(format!("{}", err), "Invalid market data: lengths differ");
    }
}
