//! Optimiser error types.

use quant_core::types::ReactiveError;
use quant_models::ModelError;
use thiserror::Error;

/// Errors raised while setting up or running the annealer.
///
/// All setup errors are returned before any worker starts.
///
/// # Examples
/// ```
/// use quant_optimiser::AnnealingError;
///
/// let err = AnnealingError::DimensionMismatch { names: 3, bounds: 2 };
/// assert_eq!(format!("{}", err), "3 variable names but 2 bounds");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnealingError {
    /// Number of variable names and bounds differ.
    #[error("{names} variable names but {bounds} bounds")]
    DimensionMismatch {
        /// Variable names supplied
        names: usize,
        /// Bounds supplied
        bounds: usize,
    },

    /// A lower bound is not below its upper bound.
    #[error("Invalid bounds for '{name}': lower {lower} must be below upper {upper}")]
    InvalidBounds {
        /// Variable name
        name: String,
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// No trial instances were supplied.
    #[error("At least one trial instance is required")]
    NoTrials,

    /// Algorithm parameters are unusable.
    #[error("Invalid annealing configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// A variable could not be resolved on a trial.
    #[error(transparent)]
    Accessor(#[from] ReactiveError),

    /// Building a trial failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Every worker failed; the first reason is reported.
    #[error("All {workers} workers failed, first failure: {first}")]
    AllWorkersFailed {
        /// Number of workers
        workers: usize,
        /// First failure in worker order
        first: String,
    },
}
