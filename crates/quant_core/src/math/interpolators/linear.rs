//! Linear interpolation.

use super::Interpolator;
use crate::types::InterpolationError;

/// Piecewise linear value at `x0` over sorted knots, extrapolating with the
/// nearest segment.
///
/// The segment is the first `k` with `xs[k+1] > x0`, falling back to the
/// last segment. Points left of the first knot therefore use the first
/// segment, points at or right of the last knot use the last one.
///
/// `xs` must be sorted ascending with at least two entries and `ys` must be
/// at least as long; shorter input yields `NaN`.
///
/// # Example
///
/// ```
/// use quant_core::math::interpolators::linear;
///
/// assert_eq!(linear(2.0, &[1.0, 3.0], &[2.0, 8.0]), 5.0);
/// assert_eq!(linear(5.0, &[1.0, 3.0], &[2.0, 8.0]), 14.0);
/// ```
pub fn linear(x0: f64, xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() < 2 || ys.len() < xs.len() {
        return f64::NAN;
    }
    let last = xs.len() - 1;
    let k = (0..last).find(|&k| xs[k + 1] > x0).unwrap_or(last - 1);
    ys[k] + (x0 - xs[k]) / (xs[k + 1] - xs[k]) * (ys[k + 1] - ys[k])
}

/// Piecewise linear interpolator.
///
/// Stores sorted (x, y) data points and interpolates between adjacent
/// points. Data points are sorted by x during construction and at least 2
/// are required.
///
/// [`Interpolator::interpolate`] rejects points outside the knots;
/// [`LinearInterpolator::extrapolate`] extends the end segments instead.
///
/// # Example
///
/// ```
/// use quant_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[2.0, 0.0, 1.0], &[4.0, 0.0, 2.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 2.0));
/// assert!((interp.interpolate(0.5).unwrap() - 1.0).abs() < 1e-12);
/// assert!((interp.extrapolate(3.0) - 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    /// Sorted x-coordinates
    xs: Vec<f64>,
    /// y-values in sorted x order
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Construct from x and y data points.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InvalidInput)` - Mismatched lengths
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 points
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (xs, ys) = pairs.into_iter().unzip();

        Ok(Self { xs, ys })
    }

    /// Sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// y-values in sorted x order.
    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Value at `x`, extending the end segments outside the domain.
    pub fn extrapolate(&self, x: f64) -> f64 {
        linear(x, &self.xs, &self.ys)
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> Result<f64, InterpolationError> {
        let (min, max) = self.domain();
        if x < min || x > max {
            return Err(InterpolationError::OutOfBounds { x, min, max });
        }
        Ok(linear(x, &self.xs, &self.ys))
    }

    #[inline]
    fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ========================================
    // Free function
    // ========================================

    #[test]
    fn test_linear_midpoint() {
        assert_eq!(linear(2.0, &[1.0, 3.0], &[2.0, 8.0]), 5.0);
    }

    #[test]
    fn test_linear_at_knots() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [1.0, 3.0, 2.0];
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_abs_diff_eq!(linear(*x, &xs, &ys), *y, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_linear_extrapolates_with_nearest_segment() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 3.0];
        assert_abs_diff_eq!(linear(-1.0, &xs, &ys), -1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(linear(3.0, &xs, &ys), 5.0, epsilon = 1e-15);
    }

    #[test]
    fn test_linear_degenerate_input() {
        assert!(linear(0.0, &[1.0], &[1.0]).is_nan());
        assert!(linear(0.0, &[1.0, 2.0], &[1.0]).is_nan());
    }

    // ========================================
    // Interpolator
    // ========================================

    #[test]
    fn test_new_sorts_data() {
        let interp = LinearInterpolator::new(&[3.0, 1.0, 2.0], &[9.0, 1.0, 4.0]).unwrap();
        assert_eq!(interp.xs(), &[1.0, 2.0, 3.0]);
        assert_eq!(interp.ys(), &[1.0, 4.0, 9.0]);
        assert_eq!(interp.len(), 3);
        assert!(!interp.is_empty());
    }

    #[test]
    fn test_new_errors() {
        assert!(matches!(
            LinearInterpolator::new(&[1.0], &[1.0]),
            Err(InterpolationError::InsufficientData { got: 1, need: 2 })
        ));
        match LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 1.0]) {
            Err(InterpolationError::InvalidInput(msg)) => assert!(msg.contains("same length")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_interpolate_in_domain() {
        let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
        assert_abs_diff_eq!(interp.interpolate(1.5).unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.interpolate(2.0).unwrap(), 4.0, epsilon = 1e-12);
        assert!(interp.contains(0.0));
    }

    #[test]
    fn test_interpolate_out_of_bounds() {
        let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert_eq!(
            interp.interpolate(1.5),
            Err(InterpolationError::OutOfBounds {
                x: 1.5,
                min: 0.0,
                max: 1.0
            })
        );
        assert_abs_diff_eq!(interp.extrapolate(1.5), 1.5, epsilon = 1e-12);
    }
}
