//! Root-finding for monotonic functions.
//!
//! - [`BisectionSolver`]: derivative-free bracketing search
//!
//! ## Configuration
//!
//! [`BisectionConfig`] holds:
//! - `tolerance`: on the target deviation and bracket width (default: 1e-5)
//! - `max_iterations`: maximum halvings (default: 200)
//! - `endpoint_policy`: what an endpoint hit returns
//! - `bracket_check`: raw or target-shifted endpoint sign test
//!
//! ## Example
//!
//! ```
//! use quant_core::math::solvers::BisectionSolver;
//!
//! let solver = BisectionSolver::with_defaults();
//! let x = solver.find_root(|x| x.ln(), 1.0, 1.0, 5.0).unwrap();
//! assert!((x - std::f64::consts::E).abs() < 1e-4);
//! ```

mod bisection;
mod config;

pub use bisection::BisectionSolver;
pub use config::{BisectionConfig, BracketCheck, EndpointPolicy};
