//! # quant_core: Reactive Foundation for the Quant Toolkit
//!
//! ## Layer 1 (Foundation) Role
//!
//! quant_core is the bottom layer of the workspace, providing:
//! - Lazily evaluated shared cells (`reactive`)
//! - Named entities with string-keyed remote accessors (`entity`)
//! - Normal distribution, interpolation, least squares and linear solvers (`math`)
//! - Bisection root finding (`math::solvers`)
//! - Seeded Box–Muller sampling (`rng`) and a Monte Carlo driver (`mc`)
//! - Error types: `ReactiveError`, `SolverError`, `InterpolationError`,
//!   `LinearAlgebraError`, `SamplingError` (`types::error`)
//!
//! ## Dependencies
//!
//! Layer 1 has no dependencies on other quant_* crates:
//! - parking_lot: locks guarding cell bindings
//! - rand: seeded PRNG
//! - thiserror: error enums
//! - serde_json: dynamically typed constructor inputs
//! - serde: serialisation of configs and errors (optional)
//!
//! ## Usage Example
//!
//! ```rust
//! use quant_core::math::solvers::BisectionSolver;
//! use quant_core::reactive::Reactive;
//!
//! let x = Reactive::constant(0.0);
//! let xc = x.clone();
//! let y = Reactive::formula(move || xc.get().powi(3));
//!
//! let solver = BisectionSolver::with_defaults();
//! let root = solver
//!     .find_root(|v| { x.rebind_constant(v); y.get() }, 27.0, 0.0, 5.0)
//!     .unwrap();
//! assert!((root - 3.0).abs() < 1e-5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for solver configuration and errors

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod entity;
pub mod math;
pub mod mc;
pub mod reactive;
pub mod rng;
pub mod types;
