//! Cubic spline interpolation.

use super::Interpolator;
use crate::math::linear_algebra::solve_tridiagonal;
use crate::types::InterpolationError;

/// End conditions closing the spline moment equations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// Prescribed second derivatives `(S''(x_0), S''(x_n))`.
    /// `SecondDerivative(0.0, 0.0)` is the natural spline.
    SecondDerivative(f64, f64),
    /// Prescribed first derivatives `(S'(x_0), S'(x_n))` (clamped spline).
    FirstDerivative(f64, f64),
}

impl BoundaryCondition {
    /// Natural spline: zero curvature at both ends.
    pub const NATURAL: Self = Self::SecondDerivative(0.0, 0.0);
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        Self::NATURAL
    }
}

/// Cubic spline through sorted knots, stored as per-knot second
/// derivatives (moments).
///
/// On `[x_k, x_{k+1}]` with `h = x_{k+1} - x_k` the spline is
///
/// ```text
/// S(x) = M_k (x_{k+1} - x)³ / 6h + M_{k+1} (x - x_k)³ / 6h
///      + (y_k - h² M_k / 6) (x_{k+1} - x) / h
///      + (y_{k+1} - h² M_{k+1} / 6) (x - x_k) / h
/// ```
///
/// The moments solve a diagonally dominant tridiagonal system, so
/// construction is O(n).
///
/// # Example
///
/// ```
/// use quant_core::math::interpolators::{BoundaryCondition, CubicSpline, Interpolator};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys = [0.0, 1.0, 8.0, 27.0];
/// // clamped with the exact end slopes of x³ reproduces x³
/// let spline = CubicSpline::new(&xs, &ys, BoundaryCondition::FirstDerivative(0.0, 27.0)).unwrap();
/// assert!((spline.interpolate(1.5).unwrap() - 3.375).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Build a spline through `(xs, ys)` under `boundary`.
    ///
    /// Points are sorted by x first; at least 2 are required and x values
    /// must be distinct.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for mismatched lengths
    /// - `InsufficientData` for fewer than 2 points
    /// - `NonMonotonicData` for repeated x values
    pub fn new(
        xs: &[f64],
        ys: &[f64],
        boundary: BoundaryCondition,
    ) -> Result<Self, InterpolationError> {
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
        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Some(index) = (1..xs.len()).find(|&i| xs[i] <= xs[i - 1]) {
            return Err(InterpolationError::NonMonotonicData { index });
        }

        let moments = solve_moments(&xs, &ys, boundary)?;
        Ok(Self { xs, ys, moments })
    }

    /// Sorted knots.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Second derivative of the spline at each knot.
    pub fn moments(&self) -> &[f64] {
        &self.moments
    }

    /// Evaluate at every point of `points`.
    pub fn interpolate_many(&self, points: &[f64]) -> Result<Vec<f64>, InterpolationError> {
        points.iter().map(|&x| self.interpolate(x)).collect()
    }

    fn segment(&self, x: f64) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        pos.clamp(1, self.xs.len() - 1) - 1
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> Result<f64, InterpolationError> {
        let (min, max) = self.domain();
        if !(x >= min && x <= max) {
            return Err(InterpolationError::OutOfBounds { x, min, max });
        }

        let k = self.segment(x);
        let (x0, x1) = (self.xs[k], self.xs[k + 1]);
        let (y0, y1) = (self.ys[k], self.ys[k + 1]);
        let (m0, m1) = (self.moments[k], self.moments[k + 1]);
        let h = x1 - x0;
        let (a, b) = (x1 - x, x - x0);

        Ok(a.powi(3) * m0 / (6.0 * h)
            + b.powi(3) * m1 / (6.0 * h)
            + (y0 - h * h * m0 / 6.0) * a / h
            + (y1 - h * h * m1 / 6.0) * b / h)
    }

    fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

/// Assemble and solve the moment equations
/// `mu_k M_{k-1} + 2 M_k + lambda_k M_{k+1} = d_k`.
fn solve_moments(
    xs: &[f64],
    ys: &[f64],
    boundary: BoundaryCondition,
) -> Result<Vec<f64>, InterpolationError> {
    let n = xs.len();
    // h[k] = x_k - x_{k-1}, h[0] unused
    let mut h = vec![0.0; n];
    for k in 1..n {
        h[k] = xs[k] - xs[k - 1];
    }
    let mut mu = vec![0.0; n];
    let mut lambda = vec![0.0; n];
    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        mu[k] = h[k] / (h[k] + h[k + 1]);
        lambda[k] = 1.0 - mu[k];
        d[k] = 6.0 * ((ys[k + 1] - ys[k]) / h[k + 1] - (ys[k] - ys[k - 1]) / h[k])
            / (h[k] + h[k + 1]);
    }

    match boundary {
        BoundaryCondition::SecondDerivative(m_first, m_last) => {
            let mut moments = vec![0.0; n];
            moments[0] = m_first;
            moments[n - 1] = m_last;
            if n == 2 {
                return Ok(moments);
            }

            // interior unknowns M_1 .. M_{n-2}
            let diag = vec![2.0; n - 2];
            let sub: Vec<f64> = (2..n - 1).map(|k| mu[k]).collect();
            let sup: Vec<f64> = (1..n - 2).map(|k| lambda[k]).collect();
            let mut rhs: Vec<f64> = (1..n - 1).map(|k| d[k]).collect();
            rhs[0] -= mu[1] * m_first;
            rhs[n - 3] -= lambda[n - 2] * m_last;

            let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;
            moments[1..n - 1].copy_from_slice(&interior);
            Ok(moments)
        }
        BoundaryCondition::FirstDerivative(d_first, d_last) => {
            d[0] = 6.0 * ((ys[1] - ys[0]) / h[1] - d_first) / h[1];
            d[n - 1] = 6.0 * (d_last - (ys[n - 1] - ys[n - 2]) / h[n - 1]) / h[n - 1];

            let diag = vec![2.0; n];
            let mut sub = vec![0.0; n - 1];
            let mut sup = vec![0.0; n - 1];
            sup[0] = 1.0;
            sub[n - 2] = 1.0;
            for k in 1..n - 1 {
                sub[k - 1] = mu[k];
                sup[k] = lambda[k];
            }

            Ok(solve_tridiagonal(&sub, &diag, &sup, &d)?)
        }
    }
}
