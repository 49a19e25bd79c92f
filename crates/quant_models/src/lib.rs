//! # Quant Models (L2: Business Logic)
//!
//! Financial entities built on the reactive value graph.
//!
//! This crate provides:
//! - Instruments (stocks, yields, bonds, generic, European and exchange options)
//! - Models (Hull–White short rate, equation sets)
//! - Market data (sampled curves with linear, spline and least-squares resampling)
//! - Analytical formulas (generalised Black–Scholes, Margrabe volatility)
//!
//! ## Design Principles
//!
//! - **Inputs are cells**: every constructor takes [`Input`](quant_core::reactive::Input)s,
//!   so any parameter can be a number, a default or a live link to another entity
//! - **Outputs are formulas**: prices and analytics recompute on every read
//! - **Keyed access**: every entity implements
//!   [`NamedEntity`](quant_core::entity::NamedEntity) for the solvers

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytical;
pub mod error;
pub mod instruments;
pub mod market_data;
pub mod models;

pub use error::ModelError;
