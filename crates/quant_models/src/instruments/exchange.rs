//! Margrabe exchange options between two stocks.
//!
//! The holder receives stock 1 and delivers stock 2. With combined
//! volatility σ = √(σ₁² + σ₂² − 2ρσ₁σ₂), the value is the generalised
//! Black–Scholes price on pvᵢ = e^(−qᵢT)·Sᵢ. The deferred variant discounts
//! the dividends to a later exchange date T' while volatility accrues to T.

use std::fmt;

use quant_core::entity::{NamedEntity, PropertyBag};
use quant_core::reactive::{Input, Reactive};

use super::option::{OptionBase, OptionInstrument};
use super::stock::Stock;
use crate::analytical::{margrabe_volatility, price_formula};
use crate::error::Result;

/// Dividend-discounted stock value, read live from the stock.
fn discounted(stock: &Stock, horizon: &Reactive) -> Reactive {
    let (s, q, t) = (stock.price().clone(), stock.divd().clone(), horizon.clone());
    Reactive::formula(move || (-q.get() * t.get()).exp() * s.get())
}

fn combined_sigma(s1: &Stock, s2: &Stock, rho: &Reactive) -> Reactive {
    let (v1, v2, rho) = (s1.sigma().clone(), s2.sigma().clone(), rho.clone());
    Reactive::formula(move || margrabe_volatility(v1.get(), v2.get(), rho.get()))
}

/// Option to exchange `s2` for `s1` at maturity.
///
/// # Examples
/// ```
/// use quant_core::entity::NamedEntity;
/// use quant_models::instruments::{ExchangeOption, Stock};
///
/// let s1 = Stock::new("s1", 100.0, 0.2, 0.0, 0.03).unwrap();
/// let s2 = Stock::new("s2", 120.0, 0.3, 0.0, 0.02).unwrap();
/// let eo = ExchangeOption::new("eo", &s1, &s2, 0.5, 1.0).unwrap();
/// assert!((eo.output("price").unwrap() - 3.8387).abs() < 1e-3);
/// ```
#[derive(Debug)]
pub struct ExchangeOption {
    bag: PropertyBag,
    base: OptionBase,
    rho: Reactive,
}

impl ExchangeOption {
    /// Creates the option with correlation `rho` and maturity.
    pub fn new(
        name: &str,
        s1: &Stock,
        s2: &Stock,
        rho: impl Into<Input>,
        maturity: impl Into<Input>,
    ) -> Result<Self> {
        let base = OptionBase::new(maturity)?;
        let rho = rho.into().into_reactive("rho", None)?;
        let sigma = combined_sigma(s1, s2, &rho);
        let price = price_formula(
            &discounted(s1, base.maturity()),
            &discounted(s2, base.maturity()),
            &sigma,
            base.maturity(),
        );
        base.bind_price(&price)?;

        let mut bag = PropertyBag::new(name);
        bag.register("rho", Some("ρ"), rho.clone())?;
        base.register(&mut bag)?;
        Ok(Self { bag, base, rho })
    }

    /// Correlation cell.
    pub fn rho(&self) -> &Reactive {
        &self.rho
    }

    /// Price cell.
    pub fn price(&self) -> &Reactive {
        self.base.price()
    }
}

impl NamedEntity for ExchangeOption {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl OptionInstrument for ExchangeOption {
    fn option_base(&self) -> &OptionBase {
        &self.base
    }
}

impl fmt::Display for ExchangeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Exchange option whose assets are delivered at `exchange_maturity`.
#[derive(Debug)]
pub struct DeferredExchangeOption {
    bag: PropertyBag,
    base: OptionBase,
    rho: Reactive,
    exchange_maturity: Reactive,
}

impl DeferredExchangeOption {
    /// Creates the option expiring at `option_maturity` with delivery at
    /// `exchange_maturity`.
    pub fn new(
        name: &str,
        s1: &Stock,
        s2: &Stock,
        rho: impl Into<Input>,
        option_maturity: impl Into<Input>,
        exchange_maturity: impl Into<Input>,
    ) -> Result<Self> {
        let base = OptionBase::new(option_maturity)?;
        let rho = rho.into().into_reactive("rho", None)?;
        let exchange_maturity = exchange_maturity
            .into()
            .into_reactive("exchange_maturity", None)?;
        let sigma = combined_sigma(s1, s2, &rho);
        let price = price_formula(
            &discounted(s1, &exchange_maturity),
            &discounted(s2, &exchange_maturity),
            &sigma,
            base.maturity(),
        );
        base.bind_price(&price)?;

        let mut bag = PropertyBag::new(name);
        bag.register("exchange_maturity", Some("T'"), exchange_maturity.clone())?;
        bag.register("rho", Some("ρ"), rho.clone())?;
        base.register(&mut bag)?;
        Ok(Self {
            bag,
            base,
            rho,
            exchange_maturity,
        })
    }

    /// Correlation cell.
    pub fn rho(&self) -> &Reactive {
        &self.rho
    }

    /// Delivery date cell.
    pub fn exchange_maturity(&self) -> &Reactive {
        &self.exchange_maturity
    }

    /// Price cell.
    pub fn price(&self) -> &Reactive {
        self.base.price()
    }
}

impl NamedEntity for DeferredExchangeOption {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl OptionInstrument for DeferredExchangeOption {
    fn option_base(&self) -> &OptionBase {
        &self.base
    }
}

impl fmt::Display for DeferredExchangeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
