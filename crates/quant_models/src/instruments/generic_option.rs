//! Option priced from two present values.

use std::fmt;

use quant_core::entity::{NamedEntity, PropertyBag};
use quant_core::reactive::{Input, Reactive};

use super::option::{implied_or_nan, solve_implied_vol, OptionBase, OptionInstrument};
use crate::analytical::price_formula;
use crate::error::{ModelError, Result};

/// Generalised Black–Scholes option on the exchange of `pv2` for `pv1`.
///
/// In pricing mode the price is a formula of the inputs. In implied mode the
/// price is the quote and `sigma` is a formula that re-solves the volatility
/// on every read.
///
/// # Examples
/// ```
/// use quant_core::entity::NamedEntity;
/// use quant_models::instruments::GenericOption;
///
/// let go1 = GenericOption::pricing("go1", 100.0, 120.0, 1.0, 0.2).unwrap();
/// let go2 = GenericOption::implied("go2", 100.0, 120.0, 1.0, go1.price()).unwrap();
/// assert!((go2.output("sigma").unwrap() - 0.2).abs() < 1e-5);
/// ```
#[derive(Debug)]
pub struct GenericOption {
    bag: PropertyBag,
    base: OptionBase,
    pv1: Reactive,
    pv2: Reactive,
    sigma: Reactive,
}

impl GenericOption {
    /// Creates the option. A non-default `sigma` selects pricing mode;
    /// otherwise a non-default `price` selects implied mode.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingPricingMode`] when both are [`Input::Default`].
    pub fn new(
        name: &str,
        pv1: impl Into<Input>,
        pv2: impl Into<Input>,
        maturity: impl Into<Input>,
        sigma: impl Into<Input>,
        price: impl Into<Input>,
    ) -> Result<Self> {
        let base = OptionBase::new(maturity)?;
        let pv1 = pv1.into().into_reactive("pv1", None)?;
        let pv2 = pv2.into().into_reactive("pv2", None)?;
        let (sigma, price) = (sigma.into(), price.into());

        let sigma = if !sigma.is_default() {
            let sigma = sigma.into_reactive("sigma", None)?;
            base.bind_price(&price_formula(&pv1, &pv2, &sigma, base.maturity()))?;
            sigma
        } else if !price.is_default() {
            base.bind_price(&price.into_reactive("price", None)?)?;
            implied_sigma(name, &pv1, &pv2, &base)
        } else {
            return Err(ModelError::MissingPricingMode {
                entity: name.to_string(),
            });
        };

        let mut bag = PropertyBag::new(name);
        bag.register("pv1", Some("p1"), pv1.clone())?;
        bag.register("pv2", Some("p2"), pv2.clone())?;
        bag.register("sigma", None, sigma.clone())?;
        base.register(&mut bag)?;

        Ok(Self {
            bag,
            base,
            pv1,
            pv2,
            sigma,
        })
    }

    /// Pricing-mode constructor.
    pub fn pricing(
        name: &str,
        pv1: impl Into<Input>,
        pv2: impl Into<Input>,
        maturity: impl Into<Input>,
        sigma: impl Into<Input>,
    ) -> Result<Self> {
        Self::new(name, pv1, pv2, maturity, sigma, Input::Default)
    }

    /// Implied-mode constructor.
    pub fn implied(
        name: &str,
        pv1: impl Into<Input>,
        pv2: impl Into<Input>,
        maturity: impl Into<Input>,
        price: impl Into<Input>,
    ) -> Result<Self> {
        Self::new(name, pv1, pv2, maturity, Input::Default, price)
    }

    /// Present value received.
    pub fn pv1(&self) -> &Reactive {
        &self.pv1
    }

    /// Present value delivered.
    pub fn pv2(&self) -> &Reactive {
        &self.pv2
    }

    /// Volatility cell (a formula in implied mode).
    pub fn sigma(&self) -> &Reactive {
        &self.sigma
    }

    /// Price cell.
    pub fn price(&self) -> &Reactive {
        self.base.price()
    }
}

/// Builds the implied-volatility formula: each read prices a scratch option
/// that shares `pv1`, `pv2` and maturity, and bisects its sigma.
fn implied_sigma(name: &str, pv1: &Reactive, pv2: &Reactive, base: &OptionBase) -> Reactive {
    let entity = name.to_string();
    let (pv1, pv2) = (pv1.clone(), pv2.clone());
    let (maturity, quote) = (base.maturity().clone(), base.price().clone());
    Reactive::formula(move || {
        let solved = GenericOption::pricing("", &pv1, &pv2, &maturity, 0.0).and_then(|scratch| {
            let link = scratch.remote_link("sigma", "price", None)?;
            Ok(solve_implied_vol(&link, quote.get())?)
        });
        implied_or_nan(&entity, solved)
    })
}

impl NamedEntity for GenericOption {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl OptionInstrument for GenericOption {
    fn option_base(&self) -> &OptionBase {
        &self.base
    }
}

impl fmt::Display for GenericOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pricing_mode_value() {
        let go = GenericOption::pricing("go", 100.0, 120.0, 1.0, 0.2).unwrap();
        assert_abs_diff_eq!(go.value(), 2.147_297_4, epsilon = 1e-6);
        assert_eq!(go.time_to_maturity(), 1.0);
    }

    #[test]
    fn test_missing_mode() {
        let err = GenericOption::new("bad", 100.0, 120.0, 1.0, Input::Default, Input::Default)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingPricingMode {
                entity: "bad".to_string()
            }
        );
    }

    #[test]
    fn test_sigma_wins_over_price() {
        let go = GenericOption::new("go", 100.0, 120.0, 1.0, 0.2, 50.0).unwrap();
        assert!(go.price().get() < 3.0);
    }

    #[test]
    fn test_implied_mode_recovers_sigma() {
        let go = GenericOption::implied("go", 100.0, 100.0, 1.0, 7.965_573).unwrap();
        assert_abs_diff_eq!(go.sigma().get(), 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_implied_mode_unreachable_price_is_nan() {
        // above pv1, no volatility in [0, 1] reaches it
        let go = GenericOption::implied("go", 100.0, 120.0, 1.0, 150.0).unwrap();
        assert!(go.sigma().get().is_nan());
    }

    #[test]
    fn test_implied_mode_intrinsic_returns_zero_vol() {
        let go = GenericOption::implied("go", 120.0, 100.0, 1.0, 20.0).unwrap();
        assert_eq!(go.sigma().get(), 0.0);
    }

    #[test]
    fn test_render_order() {
        let go = GenericOption::pricing("go", 100.0, 120.0, 1.0, 0.2).unwrap();
        assert!(go.render().starts_with("go: p1 = 100.00|p2 = 120.00|sigma = 0.20|T = 1.00|P0 = 2.15"));
    }
}
