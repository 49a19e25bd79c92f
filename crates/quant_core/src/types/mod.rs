//! Core error types.
//!
//! # Re-exports
//!
//! [`ReactiveError`], [`SolverError`], [`InterpolationError`],
//! [`LinearAlgebraError`] and [`SamplingError`] are re-exported at this
//! module level.

pub mod error;

pub use error::{
    InterpolationError, LinearAlgebraError, ReactiveError, SamplingError, SolverError,
};
