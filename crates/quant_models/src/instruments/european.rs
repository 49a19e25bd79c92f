//! European call on a dividend-paying stock.

use std::fmt;

use quant_core::entity::{NamedEntity, PropertyBag};
use quant_core::reactive::{Input, Reactive};

use super::option::{implied_or_nan, solve_implied_vol, OptionBase, OptionInstrument};
use super::stock::Stock;
use crate::analytical::price_formula;
use crate::error::{ModelError, Result};

/// European call option inputs besides the name.
#[derive(Clone, Debug, Default)]
pub struct EuropeanCallTerms {
    /// Spot price (required).
    pub spot: Input,
    /// Strike (required).
    pub strike: Input,
    /// Continuously compounded risk-free rate (required).
    pub risk_free: Input,
    /// Maturity in years (required).
    pub maturity: Input,
    /// Volatility; selects pricing mode.
    pub sigma: Input,
    /// Quoted price; selects implied mode when `sigma` is omitted.
    pub price: Input,
    /// Dividend yield, default 0.
    pub divd: Input,
}

/// European call with pv₁ = e^(−qT)·S and pv₂ = e^(−rT)·K.
#[derive(Debug)]
pub struct EuropeanCallOption {
    bag: PropertyBag,
    base: OptionBase,
    spot: Reactive,
    divd: Reactive,
    strike: Reactive,
    sigma: Reactive,
    risk_free: Reactive,
}

impl EuropeanCallOption {
    /// Creates the option in pricing or implied mode.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingPricingMode`] when neither sigma nor price is
    /// given; `ModelError::Reactive` for missing required inputs.
    pub fn new(name: &str, terms: EuropeanCallTerms) -> Result<Self> {
        let base = OptionBase::new(terms.maturity)?;
        let spot = terms.spot.into_reactive("spot", None)?;
        let strike = terms.strike.into_reactive("strike", None)?;
        let risk_free = terms.risk_free.into_reactive("risk_free", None)?;
        let divd = terms.divd.into_reactive("divd", Some(0.0))?;

        let (pv1, pv2) = present_values(&spot, &divd, &strike, &risk_free, base.maturity());

        let sigma = if !terms.sigma.is_default() {
            let sigma = terms.sigma.into_reactive("sigma", None)?;
            base.bind_price(&price_formula(&pv1, &pv2, &sigma, base.maturity()))?;
            sigma
        } else if !terms.price.is_default() {
            base.bind_price(&terms.price.into_reactive("price", None)?)?;
            let scratch_terms = EuropeanCallTerms {
                spot: Input::from(&spot),
                strike: Input::from(&strike),
                risk_free: Input::from(&risk_free),
                maturity: Input::from(base.maturity()),
                sigma: Input::Value(0.0),
                price: Input::Default,
                divd: Input::from(&divd),
            };
            let entity = name.to_string();
            let quote = base.price().clone();
            Reactive::formula(move || {
                let solved = EuropeanCallOption::new("", scratch_terms.clone()).and_then(|t| {
                    let link = t.remote_link("sigma", "price", None)?;
                    Ok(solve_implied_vol(&link, quote.get())?)
                });
                implied_or_nan(&entity, solved)
            })
        } else {
            return Err(ModelError::MissingPricingMode {
                entity: name.to_string(),
            });
        };

        let mut bag = PropertyBag::new(name);
        bag.register("spot", Some("S0"), spot.clone())?;
        bag.register("divd", Some("q"), divd.clone())?;
        bag.register("strike", Some("K"), strike.clone())?;
        bag.register("sigma", Some("σ"), sigma.clone())?;
        bag.register("risk_free", Some("r"), risk_free.clone())?;
        base.register(&mut bag)?;

        Ok(Self {
            bag,
            base,
            spot,
            divd,
            strike,
            sigma,
            risk_free,
        })
    }

    /// Pricing-mode call on `stock`, linked to its price, volatility and
    /// dividend yield.
    pub fn from_stock(
        name: &str,
        stock: &Stock,
        strike: impl Into<Input>,
        risk_free: impl Into<Input>,
        maturity: impl Into<Input>,
    ) -> Result<Self> {
        Self::new(
            name,
            EuropeanCallTerms {
                spot: stock.price().into(),
                strike: strike.into(),
                risk_free: risk_free.into(),
                maturity: maturity.into(),
                sigma: stock.sigma().into(),
                price: Input::Default,
                divd: stock.divd().into(),
            },
        )
    }

    /// Spot cell.
    pub fn spot(&self) -> &Reactive {
        &self.spot
    }

    /// Dividend yield cell.
    pub fn divd(&self) -> &Reactive {
        &self.divd
    }

    /// Strike cell.
    pub fn strike(&self) -> &Reactive {
        &self.strike
    }

    /// Volatility cell.
    pub fn sigma(&self) -> &Reactive {
        &self.sigma
    }

    /// Risk-free rate cell.
    pub fn risk_free(&self) -> &Reactive {
        &self.risk_free
    }

    /// Price cell.
    pub fn price(&self) -> &Reactive {
        self.base.price()
    }
}

fn present_values(
    spot: &Reactive,
    divd: &Reactive,
    strike: &Reactive,
    risk_free: &Reactive,
    maturity: &Reactive,
) -> (Reactive, Reactive) {
    let pv1 = {
        let (s, q, t) = (spot.clone(), divd.clone(), maturity.clone());
        Reactive::formula(move || (-q.get() * t.get()).exp() * s.get())
    };
    let pv2 = {
        let (k, r, t) = (strike.clone(), risk_free.clone(), maturity.clone());
        Reactive::formula(move || (-r.get() * t.get()).exp() * k.get())
    };
    (pv1, pv2)
}

impl NamedEntity for EuropeanCallOption {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl OptionInstrument for EuropeanCallOption {
    fn option_base(&self) -> &OptionBase {
        &self.base
    }
}

impl fmt::Display for EuropeanCallOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn atm_terms() -> EuropeanCallTerms {
        EuropeanCallTerms {
            spot: Input::Value(100.0),
            strike: Input::Value(100.0),
            risk_free: Input::Value(0.05),
            maturity: Input::Value(1.0),
            sigma: Input::Value(0.2),
            ..Default::default()
        }
    }

    #[test]
    fn test_textbook_value() {
        let c = EuropeanCallOption::new("c", atm_terms()).unwrap();
        assert_abs_diff_eq!(c.value(), 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_dividend_lowers_value() {
        let c = EuropeanCallOption::new("c", atm_terms()).unwrap();
        let before = c.value();
        c.divd().rebind_constant(0.03);
        assert!(c.value() < before);
    }

    #[test]
    fn test_implied_round_trip() {
        let c = EuropeanCallOption::new("c", atm_terms()).unwrap();
        let implied = EuropeanCallOption::new(
            "ci",
            EuropeanCallTerms {
                sigma: Input::Default,
                price: c.price().into(),
                ..atm_terms()
            },
        )
        .unwrap();
        assert_abs_diff_eq!(implied.sigma().get(), 0.2, epsilon = 1e-5);

        c.sigma().rebind_constant(0.35);
        assert_abs_diff_eq!(implied.sigma().get(), 0.35, epsilon = 1e-5);
    }

    #[test]
    fn test_from_stock_links_dividend() {
        let s = Stock::new("s", 100.0, 0.2, 0.0, 0.0).unwrap();
        let c = EuropeanCallOption::from_stock("c", &s, 100.0, 0.05, 1.0).unwrap();
        let before = c.value();
        s.divd().rebind_constant(0.03);
        assert_eq!(c.divd().get(), 0.03);
        assert!(c.value() < before);

        s.price().rebind_constant(120.0);
        assert_eq!(c.spot().get(), 120.0);
    }

    #[test]
    fn test_missing_mode() {
        let terms = EuropeanCallTerms {
            sigma: Input::Default,
            ..atm_terms()
        };
        assert!(matches!(
            EuropeanCallOption::new("c", terms),
            Err(ModelError::MissingPricingMode { .. })
        ));
    }
}
