//! Flat yield quote.

use std::fmt;

use quant_core::entity::{NamedEntity, PropertyBag};
use quant_core::reactive::{Input, Reactive};

use crate::error::Result;

/// A single yield-to-maturity quote, defaulting to 5%.
///
/// Usually shared between bonds so that one rebinding moves them together.
#[derive(Debug)]
pub struct Yield {
    bag: PropertyBag,
    ytm: Reactive,
}

impl Yield {
    /// Creates the quote.
    pub fn new(name: &str, ytm: impl Into<Input>) -> Result<Self> {
        let ytm = ytm.into().into_reactive("ytm", Some(0.05))?;
        let mut bag = PropertyBag::new(name);
        bag.register("ytm", None, ytm.clone())?;
        Ok(Self { bag, ytm })
    }

    /// Yield cell.
    pub fn ytm(&self) -> &Reactive {
        &self.ytm
    }
}

impl NamedEntity for Yield {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl fmt::Display for Yield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
