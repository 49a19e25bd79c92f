//! Sampled curves and their resampling.

use std::fmt;

use quant_core::math::interpolators::{
    BoundaryCondition, CubicSpline, Interpolator, LinearInterpolator,
};
use quant_core::math::least_squares::{evaluate_polynomial, fit_polynomial};

use crate::error::{ModelError, Result};

/// A curve through points sorted by x.
///
/// Reads between points are linear; reads outside extend the nearest
/// segment. The `*_expand` methods resample onto `k` evenly spaced points
/// starting at the first knot (the last knot itself is excluded).
///
/// # Examples
/// ```
/// use quant_models::market_data::Curve;
///
/// let curve = Curve::new(&[3.0, 1.0], &[8.0, 2.0]).unwrap();
/// assert_eq!(curve.value_at(2.0), 5.0);
/// assert_eq!(curve.value_at(5.0), 14.0);
/// ```
#[derive(Clone, Debug)]
pub struct Curve {
    interp: LinearInterpolator,
}

impl Curve {
    /// Builds a curve from unsorted coordinates.
    ///
    /// # Errors
    ///
    /// `ModelError::Interpolation` if the lengths differ or fewer than two
    /// points are given.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self> {
        Ok(Self {
            interp: LinearInterpolator::new(xs, ys)?,
        })
    }

    /// Builds a curve from `(x, y)` pairs.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
        Self::new(&xs, &ys)
    }

    /// Linear value at `x` with nearest-segment extrapolation.
    pub fn value_at(&self, x: f64) -> f64 {
        self.interp.extrapolate(x)
    }

    /// Sorted x values.
    pub fn xs(&self) -> &[f64] {
        self.interp.xs()
    }

    /// y values in x order.
    pub fn ys(&self) -> &[f64] {
        self.interp.ys()
    }

    /// Points in x order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.xs().iter().copied().zip(self.ys().iter().copied()).collect()
    }

    /// Covered x range.
    pub fn domain(&self) -> (f64, f64) {
        self.interp.domain()
    }

    /// Resamples with linear interpolation.
    pub fn linear_expand(&self, k: usize) -> Result<Curve> {
        let grid = self.grid(k)?;
        let ys: Vec<f64> = grid.iter().map(|&x| self.value_at(x)).collect();
        Curve::new(&grid, &ys)
    }

    /// Resamples through a natural cubic spline.
    pub fn cubic_spline_expand(&self, k: usize) -> Result<Curve> {
        let grid = self.grid(k)?;
        let spline = CubicSpline::new(self.xs(), self.ys(), BoundaryCondition::NATURAL)?;
        let ys = spline.interpolate_many(&grid)?;
        Curve::new(&grid, &ys)
    }

    /// Resamples through a least-squares polynomial of `degree`.
    pub fn least_squares_expand(&self, degree: usize, k: usize) -> Result<Curve> {
        let grid = self.grid(k)?;
        let coeffs = fit_polynomial(self.xs(), self.ys(), degree)?;
        let ys: Vec<f64> = grid.iter().map(|&x| evaluate_polynomial(&coeffs, x)).collect();
        Curve::new(&grid, &ys)
    }

    /// `min + i·(max − min)/k` for `i` in `0..k`.
    fn grid(&self, k: usize) -> Result<Vec<f64>> {
        if k < 2 {
            return Err(ModelError::InvalidParameter {
                message: format!("resampling needs at least 2 points, got {}", k),
            });
        }
        let (min, max) = self.domain();
        let step = (max - min) / k as f64;
        Ok((0..k).map(|i| min + i as f64 * step).collect())
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (x, y)) in self.points().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:.6},{:.6}", x, y)?;
        }
        Ok(())
    }
}
