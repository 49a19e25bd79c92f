//! Interest-rate and equation-solving models.
//!
//! - [`HullWhiteModel`]: one-factor short-rate model on a market curve
//! - [`EquationSet`]: residual equations over named variables

mod equation_set;
mod hull_white;

pub use equation_set::{EquationBuilder, EquationSet};
pub use hull_white::{HullWhiteModel, MarketCurve};
