//! Equity underlying.

use std::fmt;

use quant_core::entity::{NamedEntity, PropertyBag};
use quant_core::reactive::{Input, Reactive};

use crate::error::Result;

/// A stock with spot price, dividend yield, drift and volatility.
///
/// Options built from a stock link to its cells, so rebinding the stock's
/// price reprices every option on the next read.
///
/// # Examples
/// ```
/// use quant_core::entity::NamedEntity;
/// use quant_core::reactive::Input;
/// use quant_models::instruments::Stock;
///
/// let s1 = Stock::new("s1", 100.0, 0.2, Input::Default, 0.03).unwrap();
/// assert_eq!(s1.render(), "s1: S0 = 100.00|q = 0.03|μ = 0.00|σ = 0.20");
/// ```
#[derive(Debug)]
pub struct Stock {
    bag: PropertyBag,
    price: Reactive,
    divd: Reactive,
    miu: Reactive,
    sigma: Reactive,
}

impl Stock {
    /// Creates a stock. `price` and `sigma` are required; `miu` and `divd`
    /// default to zero.
    ///
    /// # Errors
    ///
    /// `ModelError::Reactive` if a required input is [`Input::Default`].
    pub fn new(
        name: &str,
        price: impl Into<Input>,
        sigma: impl Into<Input>,
        miu: impl Into<Input>,
        divd: impl Into<Input>,
    ) -> Result<Self> {
        let price = price.into().into_reactive("price", None)?;
        let sigma = sigma.into().into_reactive("sigma", None)?;
        let miu = miu.into().into_reactive("miu", Some(0.0))?;
        let divd = divd.into().into_reactive("divd", Some(0.0))?;

        let mut bag = PropertyBag::new(name);
        bag.register("price", Some("S0"), price.clone())?;
        bag.register("divd", Some("q"), divd.clone())?;
        bag.register("miu", Some("μ"), miu.clone())?;
        bag.register("sigma", Some("σ"), sigma.clone())?;

        Ok(Self {
            bag,
            price,
            divd,
            miu,
            sigma,
        })
    }

    /// Spot price cell.
    pub fn price(&self) -> &Reactive {
        &self.price
    }

    /// Continuous dividend yield cell.
    pub fn divd(&self) -> &Reactive {
        &self.divd
    }

    /// Drift cell.
    pub fn miu(&self) -> &Reactive {
        &self.miu
    }

    /// Volatility cell.
    pub fn sigma(&self) -> &Reactive {
        &self.sigma
    }
}

impl NamedEntity for Stock {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
