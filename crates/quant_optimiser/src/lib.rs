//! # quant_optimiser
//!
//! Stochastic optimisation over named entity inputs.
//!
//! ## Architecture Position
//!
//! Layer 2.5: depends on `quant_core` (L1) for entities and random numbers and
//! on `quant_models` (L2) for equation sets.
//!
//! ## Modules
//!
//! - `annealing`: multi-worker simulated annealing with per-worker fault
//!   isolation
//! - `equations`: annealing solver builder for equation systems
//!
//! ## Example
//!
//! ```rust,ignore
//! use quant_optimiser::annealing::{AnnealingConfig, SimulatedAnnealing};
//!
//! let saa = SimulatedAnnealing::new(trials, &["sigma"], &[(0.0, 1.0)], objective, config)?;
//! let best = saa.run()?;
//! ```

#![warn(missing_docs)]

pub mod annealing;
pub mod equations;

mod error;

pub use error::AnnealingError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::annealing::*;
    pub use crate::equations::*;
    pub use crate::AnnealingError;
}
