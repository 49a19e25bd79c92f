//! Numeric utilities.
//!
//! - [`distributions`]: normal CDF and PDF
//! - [`interpolators`]: linear and cubic spline interpolation
//! - [`least_squares`]: polynomial regression
//! - [`linear_algebra`]: tridiagonal and LU solvers
//! - [`solvers`]: bisection root finding

pub mod distributions;
pub mod interpolators;
pub mod least_squares;
pub mod linear_algebra;
pub mod solvers;
