//! One-factor Hull–White short-rate model fitted to a market curve.
//!
//! Zero-coupon bonds are affine in the short rate:
//!
//! - B(t₀,t₁) = (1 − e^(−a(t₁−t₀)))/a
//! - A(t₀,t₁) = Pᴹ(t₁)/Pᴹ(t₀) · exp(B·fᴹ(t₀) − σ²/(4a)·(1 − e^(−2at₀))·B²)
//! - P(t₀,t₁) = A·e^(−B·r(t₀))
//!
//! Market discount factors Pᴹ and instantaneous forwards fᴹ are linearly
//! interpolated on the market time grid.

use std::fmt;

use quant_core::entity::{NamedEntity, PropertyBag};
use quant_core::math::distributions::normal_cdf;
use quant_core::math::interpolators::linear;
use quant_core::reactive::{Input, Reactive};

use crate::error::{ModelError, Result};

/// Market curve inputs for [`HullWhiteModel`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketCurve {
    times: Vec<f64>,
    discount_factors: Vec<f64>,
    forwards: Vec<f64>,
}

impl MarketCurve {
    /// Validates and stores the curve.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidMarketData`] if the arrays differ in length, hold
    /// fewer than two points, or the times are not strictly increasing.
    pub fn new(times: Vec<f64>, discount_factors: Vec<f64>, forwards: Vec<f64>) -> Result<Self> {
        if times.len() != discount_factors.len() || times.len() != forwards.len() {
            return Err(ModelError::InvalidMarketData {
                message: format!(
                    "array lengths differ: times {}, discount factors {}, forwards {}",
                    times.len(),
                    discount_factors.len(),
                    forwards.len()
                ),
            });
        }
        if times.len() < 2 {
            return Err(ModelError::InvalidMarketData {
                message: format!("need at least 2 points, got {}", times.len()),
            });
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ModelError::InvalidMarketData {
                message: "times must be strictly increasing".to_string(),
            });
        }
        Ok(Self {
            times,
            discount_factors,
            forwards,
        })
    }

    /// Market time grid.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Interpolated market discount factor.
    pub fn discount(&self, t: f64) -> f64 {
        linear(t, &self.times, &self.discount_factors)
    }

    /// Interpolated instantaneous forward rate.
    pub fn forward(&self, t: f64) -> f64 {
        linear(t, &self.times, &self.forwards)
    }
}

/// Hull–White model with reactive mean reversion `a` and volatility `sigma`.
#[derive(Debug)]
pub struct HullWhiteModel {
    bag: PropertyBag,
    a: Reactive,
    sigma: Reactive,
    market: MarketCurve,
}

impl HullWhiteModel {
    /// Creates the model. Both parameters are required.
    pub fn new(
        name: &str,
        a: impl Into<Input>,
        sigma: impl Into<Input>,
        market: MarketCurve,
    ) -> Result<Self> {
        let a = a.into().into_reactive("a", None)?;
        let sigma = sigma.into().into_reactive("sigma", None)?;
        let mut bag = PropertyBag::new(name);
        bag.register("a", None, a.clone())?;
        bag.register("sigma", Some("σ"), sigma.clone())?;
        Ok(Self {
            bag,
            a,
            sigma,
            market,
        })
    }

    /// Mean-reversion cell.
    pub fn a(&self) -> &Reactive {
        &self.a
    }

    /// Volatility cell.
    pub fn sigma(&self) -> &Reactive {
        &self.sigma
    }

    /// Market curve.
    pub fn market(&self) -> &MarketCurve {
        &self.market
    }

    /// Affine coefficients `(A(t0, t1), B(t0, t1))`.
    pub fn ab(&self, t0: f64, t1: f64) -> (f64, f64) {
        let (a, sigma) = (self.a.get(), self.sigma.get());
        let b = (1.0 - (-a * (t1 - t0)).exp()) / a;
        let variance = sigma * sigma / (4.0 * a) * (1.0 - (-2.0 * a * t0).exp()) * b * b;
        let ratio = self.market.discount(t1) / self.market.discount(t0);
        (ratio * (b * self.market.forward(t0) - variance).exp(), b)
    }

    /// Price at `t0` of the zero-coupon bond maturing at `t1`, given the short
    /// rate `r0`.
    pub fn bond_price(&self, t0: f64, t1: f64, r0: f64) -> f64 {
        let (a, b) = self.ab(t0, t1);
        a * (-b * r0).exp()
    }

    /// Put expiring at `t1` with strike `x` on the bond maturing at `t2`.
    pub fn zero_bond_put(&self, t0: f64, t1: f64, t2: f64, x: f64, r0: f64) -> f64 {
        let (_, b12) = self.ab(t0, t2);
        let p1 = self.bond_price(t0, t1, r0);
        let p2 = self.bond_price(t0, t2, r0);
        let a = self.a.get();
        let sigma_p =
            self.sigma.get() * ((1.0 - (-2.0 * a * (t1 - t0)).exp()) / (2.0 * a)).sqrt() * b12;
        let h = (p2 / (p1 * x)).ln() / sigma_p + sigma_p / 2.0;
        -p2 * normal_cdf(-h) + x * p1 * normal_cdf(-h + sigma_p)
    }

    /// Caplet on `[t1, t2]` with cap rate `x` and notional `n`, priced as a
    /// put on the zero-coupon bond.
    pub fn caplet(&self, t0: f64, t1: f64, t2: f64, x: f64, n: f64, r0: f64) -> f64 {
        let accrual = 1.0 + x * (t2 - t1);
        n * accrual * self.zero_bond_put(t0, t1, t2, 1.0 / accrual, r0)
    }

    /// Cap starting at `t_alpha` with consecutive accrual periods `taus`.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParameter`] if `taus` is empty.
    pub fn cap(&self, t0: f64, t_alpha: f64, taus: &[f64], x: f64, n: f64, r0: f64) -> Result<f64> {
        if taus.is_empty() {
            return Err(ModelError::InvalidParameter {
                message: "cap needs at least one accrual period".to_string(),
            });
        }
        let mut start = t_alpha;
        let mut total = 0.0;
        for tau in taus {
            let end = start + tau;
            total += self.caplet(t0, start, end, x, n, r0);
            start = end;
        }
        Ok(total)
    }
}

impl NamedEntity for HullWhiteModel {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl fmt::Display for HullWhiteModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RATE: f64 = 0.05;

    /// Flat continuously compounded curve at 5%.
    fn flat_model() -> HullWhiteModel {
        let times: Vec<f64> = (0..=10).map(f64::from).collect();
        let discount = times.iter().map(|t| (-RATE * t).exp()).collect();
        let forwards = vec![RATE; times.len()];
        let market = MarketCurve::new(times, discount, forwards).unwrap();
        HullWhiteModel::new("hw", 0.1, 0.01, market).unwrap()
    }

    #[test]
    fn test_market_curve_validation() {
        assert!(MarketCurve::new(vec![0.0, 1.0], vec![1.0], vec![0.0, 0.0]).is_err());
        assert!(MarketCurve::new(vec![0.0], vec![1.0], vec![0.0]).is_err());
        assert!(MarketCurve::new(vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 0.0]).is_err());
    }

    #[test]
    fn test_bond_price_reprices_market_at_time_zero() {
        let hw = flat_model();
        // at t0 = 0 with r0 = f(0) the model returns the market discount factor
        for t in [1.0, 3.0, 7.0] {
            assert_relative_eq!(hw.bond_price(0.0, t, RATE), (-RATE * t).exp(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_b_coefficient() {
        let hw = flat_model();
        let (_, b) = hw.ab(1.0, 3.0);
        assert_relative_eq!(b, (1.0 - (-0.2f64).exp()) / 0.1, epsilon = 1e-14);
    }

    #[test]
    fn test_put_call_bounds() {
        let hw = flat_model();
        let p1 = hw.bond_price(0.0, 1.0, RATE);
        let p2 = hw.bond_price(0.0, 2.0, RATE);
        let x = 0.95;
        let put = hw.zero_bond_put(0.0, 1.0, 2.0, x, RATE);
        // worth at least its intrinsic forward value, at most the strike
        assert!(put >= (x * p1 - p2).max(0.0) - 1e-12);
        assert!(put <= x * p1);
    }

    #[test]
    fn test_cap_is_sum_of_caplets() {
        let hw = flat_model();
        let taus = [0.5, 0.5, 1.0];
        let cap = hw.cap(0.0, 1.0, &taus, 0.05, 100.0, RATE).unwrap();
        let expected = hw.caplet(0.0, 1.0, 1.5, 0.05, 100.0, RATE)
            + hw.caplet(0.0, 1.5, 2.0, 0.05, 100.0, RATE)
            + hw.caplet(0.0, 2.0, 3.0, 0.05, 100.0, RATE);
        assert_relative_eq!(cap, expected, epsilon = 1e-12);
        assert!(cap > 0.0);
    }

    #[test]
    fn test_cap_requires_periods() {
        let hw = flat_model();
        assert!(matches!(
            hw.cap(0.0, 1.0, &[], 0.05, 100.0, RATE),
            Err(ModelError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_sigma_rebinding_raises_caplet() {
        let hw = flat_model();
        let before = hw.caplet(0.0, 1.0, 2.0, 0.05, 100.0, RATE);
        hw.remote_setter("sigma").unwrap()(0.02);
        assert!(hw.caplet(0.0, 1.0, 2.0, 0.05, 100.0, RATE) > before);
    }
}
