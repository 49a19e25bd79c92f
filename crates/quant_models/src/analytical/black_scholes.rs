//! Generalised Black–Scholes formula.
//!
//! ## Mathematical Formulas
//!
//! **Price**: V = PV₁·N(d₁) − PV₂·N(d₂)
//!
//! Where:
//! - d₁ = (ln(PV₁/PV₂) + σ²T/2) / (σ√T)
//! - d₂ = d₁ − σ√T
//!
//! PV₁ is the present value of the asset received, PV₂ of the asset
//! delivered. European calls, exchange options and deferred exchange options
//! differ only in how PV₁, PV₂ and σ are formed.

use quant_core::math::distributions::normal_cdf;
use quant_core::reactive::Reactive;

/// Option value from present values, combined volatility and maturity.
///
/// With `sigma == 0` the value collapses to `max(pv1 - pv2, 0)`.
///
/// # Examples
/// ```
/// use quant_models::analytical::generalised_black_scholes;
///
/// let v = generalised_black_scholes(100.0, 120.0, 0.2, 1.0);
/// assert!((v - 2.1473).abs() < 1e-3);
/// assert_eq!(generalised_black_scholes(100.0, 120.0, 0.0, 1.0), 0.0);
/// ```
pub fn generalised_black_scholes(pv1: f64, pv2: f64, sigma: f64, maturity: f64) -> f64 {
    let vol_sqrt_t = sigma * maturity.sqrt();
    let d1 = ((pv1 / pv2).ln() + 0.5 * sigma * sigma * maturity) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    pv1 * normal_cdf(d1) - pv2 * normal_cdf(d2)
}

/// Reactive price cell over the four input cells.
pub fn price_formula(pv1: &Reactive, pv2: &Reactive, sigma: &Reactive, maturity: &Reactive) -> Reactive {
    let (pv1, pv2, sigma, maturity) = (pv1.clone(), pv2.clone(), sigma.clone(), maturity.clone());
    Reactive::formula(move || {
        generalised_black_scholes(pv1.get(), pv2.get(), sigma.get(), maturity.get())
    })
}

/// Combined volatility of the spread between two lognormal assets,
/// `sqrt(σ₁² + σ₂² − 2ρσ₁σ₂)`.
#[inline]
pub fn margrabe_volatility(sigma1: f64, sigma2: f64, rho: f64) -> f64 {
    (sigma1 * sigma1 + sigma2 * sigma2 - 2.0 * rho * sigma1 * sigma2).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_matches_textbook_call() {
        // S = 100, K = 100, r = 5%, σ = 20%, T = 1 → 10.4506
        let pv2 = 100.0 * (-0.05f64).exp();
        assert_abs_diff_eq!(
            generalised_black_scholes(100.0, pv2, 0.2, 1.0),
            10.4506,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_zero_vol_is_intrinsic() {
        assert_abs_diff_eq!(generalised_black_scholes(120.0, 100.0, 0.0, 1.0), 20.0);
        assert_eq!(generalised_black_scholes(80.0, 100.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_price_increases_with_vol() {
        let low = generalised_black_scholes(100.0, 110.0, 0.1, 1.0);
        let high = generalised_black_scholes(100.0, 110.0, 0.3, 1.0);
        assert!(high > low);
    }

    #[test]
    fn test_price_formula_tracks_inputs() {
        let pv1 = Reactive::constant(100.0);
        let pv2 = Reactive::constant(120.0);
        let sigma = Reactive::constant(0.2);
        let t = Reactive::constant(1.0);
        let price = price_formula(&pv1, &pv2, &sigma, &t);
        let before = price.get();
        sigma.rebind_constant(0.3);
        assert!(price.get() > before);
    }

    proptest::proptest! {
        #[test]
        fn prop_price_within_arbitrage_bounds(
            pv1 in 1.0f64..200.0,
            pv2 in 1.0f64..200.0,
            sigma in 0.01f64..1.0,
            t in 0.05f64..5.0,
        ) {
            let v = generalised_black_scholes(pv1, pv2, sigma, t);
            proptest::prop_assert!(v >= (pv1 - pv2).max(0.0) - 1e-4);
            proptest::prop_assert!(v <= pv1 + 1e-9);
        }
    }

    #[test]
    fn test_margrabe_volatility() {
        assert_abs_diff_eq!(margrabe_volatility(0.2, 0.3, 0.5), 0.07f64.sqrt(), epsilon = 1e-15);
        assert_abs_diff_eq!(margrabe_volatility(0.2, 0.2, 1.0), 0.0, epsilon = 1e-15);
    }
}
