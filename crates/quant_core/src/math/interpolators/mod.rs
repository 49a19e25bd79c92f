//! Interpolation methods.
//!
//! ## Available Interpolators
//!
//! - [`linear`]: piecewise linear value with nearest-segment extrapolation
//! - [`LinearInterpolator`]: owned, sorted piecewise linear interpolator
//! - [`CubicSpline`]: cubic spline with first or second derivative end
//!   conditions ([`BoundaryCondition`])
//!
//! ## Core Trait
//!
//! Interpolators implement [`Interpolator`]:
//! - `interpolate(x) -> Result<f64, InterpolationError>`
//! - `domain() -> (f64, f64)`
//!
//! ## Example
//!
//! ```
//! use quant_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//! ```

mod cubic_spline;
mod linear;
mod traits;

pub use cubic_spline::{BoundaryCondition, CubicSpline};
pub use linear::{linear, LinearInterpolator};
pub use traits::Interpolator;
