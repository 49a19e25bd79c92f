//! CLI error types.

use quant_core::types::{ReactiveError, SamplingError, SolverError};
use quant_models::ModelError;
use quant_optimiser::AnnealingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `quantfn` commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Entity construction or model evaluation failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Annealer setup failed or every worker failed.
    #[error("Annealing error: {0}")]
    Annealing(#[from] AnnealingError),

    /// Remote accessor lookup failed.
    #[error("Accessor error: {0}")]
    Reactive(#[from] ReactiveError),

    /// Root search failed.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    /// Sample driver rejected its configuration.
    #[error("Sampling error: {0}")]
    Sampling(#[from] SamplingError),

    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A `check` diagnostic did not hold.
    #[error("Self-check failed: {0}")]
    SelfCheck(String),

    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input or output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
