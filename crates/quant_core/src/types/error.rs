//! Error types for structured error handling.
//!
//! This module provides:
//! - `ReactiveError`: Errors from input coercion and remote accessors
//! - `SolverError`: Errors from root-finding solvers
//! - `InterpolationError`: Errors from interpolation operations
//! - `LinearAlgebraError`: Errors from the dense and banded linear solvers
//! - `SamplingError`: Errors from the Monte Carlo sample driver

use thiserror::Error;

/// Errors raised by the reactive value graph and the remote accessor protocol.
///
/// # Variants
/// - `TypeMismatch`: A dynamic input was neither a number nor null
/// - `MissingInput`: An input was omitted and the parameter has no default
/// - `UnknownKey`: A remote accessor was asked for a property the entity lacks
/// - `DuplicateKey`: A property was registered twice on the same entity
/// - `Cycle`: Linking a cell would make it read itself
///
/// # Examples
/// ```
/// use quant_core::types::ReactiveError;
///
/// let err = ReactiveError::UnknownKey { entity: "s1".to_string(), key: "rho".to_string() };
/// assert_eq!(format!("{}", err), "Unknown key 'rho' on entity 's1'");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReactiveError {
    /// Input could not be coerced to a reactive value.
    #[error("Type mismatch for '{parameter}': expected a number or a reactive value, found {found}")]
    TypeMismatch {
        /// Parameter being coerced
        parameter: String,
        /// Description of the offending input
        found: String,
    },

    /// Input omitted for a parameter without a default.
    #[error("Missing input for '{parameter}' and no default is defined")]
    MissingInput {
        /// Parameter being coerced
        parameter: String,
    },

    /// Property key not registered on the entity.
    #[error("Unknown key '{key}' on entity '{entity}'")]
    UnknownKey {
        /// Entity display name
        entity: String,
        /// Requested key
        key: String,
    },

    /// Property key registered twice.
    #[error("Duplicate key '{key}' on entity '{entity}'")]
    DuplicateKey {
        /// Entity display name
        entity: String,
        /// Offending key
        key: String,
    },

    /// Rebinding would introduce a reference cycle.
    #[error("Binding would create a reference cycle")]
    Cycle,
}

/// Root-finding solver errors.
///
/// # Variants
/// - `InvalidBracket`: Endpoint values fail the bracket sign test
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `InvalidTolerance`: Tolerance is not a positive finite number
///
/// # Examples
/// ```
/// use quant_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// The bracket does not straddle the target.
    #[error("Invalid bracket [{lower}, {upper}]: f(lower) = {f_lower} and f(upper) = {f_upper} do not straddle target {target}")]
    InvalidBracket {
        /// Lower bracket endpoint
        lower: f64,
        /// Upper bracket endpoint
        upper: f64,
        /// Value at the lower endpoint
        f_lower: f64,
        /// Value at the upper endpoint
        f_upper: f64,
        /// Target value
        target: f64,
    },

    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Tolerance must be positive and finite.
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),
}

/// Interpolation-related errors.
///
/// # Examples
/// ```
/// use quant_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Knots are not strictly increasing.
    #[error("Data is not strictly increasing at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The underlying linear system could not be solved.
    #[error(transparent)]
    LinearAlgebra(#[from] LinearAlgebraError),
}

/// Linear system solver errors.
///
/// # Examples
/// ```
/// use quant_core::types::LinearAlgebraError;
///
/// let err = LinearAlgebraError::Singular { index: 2 };
/// assert_eq!(format!("{}", err), "Matrix is singular: zero pivot at row 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinearAlgebraError {
    /// Operand sizes are inconsistent.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// A zero pivot was met during elimination.
    #[error("Matrix is singular: zero pivot at row {index}")]
    Singular {
        /// Row of the zero pivot
        index: usize,
    },
}

/// Monte Carlo sample driver errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SamplingError {
    /// Paths must have at least one stage.
    #[error("Number of stages must be positive, got {0}")]
    InvalidStages(usize),

    /// Multi-stage path simulation is not available.
    #[error("Multi-stage path simulation ({stages} stages) is not supported")]
    MultiStageUnsupported {
        /// Requested number of stages
        stages: usize,
    },
}
