//! # Random Number Generation
//!
//! Seeded normal sampling for Monte Carlo drivers and the annealing
//! optimiser.
//!
//! - **Reproducibility**: every generator records its seed
//! - **Independence**: [`GaussianRng::child_seed`] derives per-worker streams
//!   from one master seed, so no generator is ever shared between threads
//!
//! ```rust
//! use quant_core::rng::GaussianRng;
//!
//! let mut rng = GaussianRng::from_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod gaussian;

pub use gaussian::GaussianRng;
