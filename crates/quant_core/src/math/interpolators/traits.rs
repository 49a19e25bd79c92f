//! Common interface for 1D interpolators.

use crate::types::InterpolationError;

/// A one-dimensional interpolation scheme over sorted knots.
pub trait Interpolator {
    /// Interpolated value at `x`.
    ///
    /// # Errors
    ///
    /// [`InterpolationError::OutOfBounds`] when `x` lies outside
    /// [`domain`](Self::domain).
    fn interpolate(&self, x: f64) -> Result<f64, InterpolationError>;

    /// Valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (f64, f64);

    /// Returns true if `x` lies in the domain.
    #[inline]
    fn contains(&self, x: f64) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }
}
