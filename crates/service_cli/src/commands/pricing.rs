//! Pricing command implementation
//!
//! Builds two stocks, an exchange option and a deferred exchange option on
//! them, then moves the inputs and prints how the options follow.

use quant_core::entity::NamedEntity;
use quant_models::instruments::{DeferredExchangeOption, ExchangeOption, Stock};
use tracing::info;

use crate::Result;

/// Entities of the dynamic pricing scenario
pub struct PricingScenario {
    pub s1: Stock,
    pub s2: Stock,
    pub eo: ExchangeOption,
    pub deo: DeferredExchangeOption,
}

impl PricingScenario {
    /// s1 (100, σ 0.2, q 3%), s2 (120, σ 0.3, q 2%), ρ = 0.5, T = 1, T' = 2
    pub fn build() -> Result<Self> {
        let s1 = Stock::new("s1", 100.0, 0.2, 0.0, 0.03)?;
        let s2 = Stock::new("s2", 120.0, 0.3, 0.0, 0.02)?;
        let eo = ExchangeOption::new("eo", &s1, &s2, 0.5, 1.0)?;
        let deo = DeferredExchangeOption::new("deo", &s1, &s2, 0.5, 1.0, 2.0)?;
        Ok(Self { s1, s2, eo, deo })
    }

    /// Moves s1 to 120, the s2 dividend to 1% and the exchange correlation
    /// to 0.7 through the remote setters.
    pub fn shock(&self) -> Result<()> {
        self.s1.remote_setter("price")?(120.0);
        self.s2.remote_setter("divd")?(0.01);
        self.eo.remote_setter("rho")?(0.7);
        Ok(())
    }

    /// One rendered line per entity
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.s1.to_string(),
            self.s2.to_string(),
            self.eo.to_string(),
            self.deo.to_string(),
        ]
    }
}

/// Run the pricing command
pub fn run() -> Result<()> {
    info!("Building dynamic pricing scenario");
    let scenario = PricingScenario::build()?;
    for line in scenario.lines() {
        println!("{}", line);
    }
    println!();

    scenario.shock()?;
    info!("Inputs moved: s1.price = 120, s2.divd = 0.01, eo.rho = 0.7");
    for line in scenario.lines() {
        println!("{}", line);
    }
    println!();
    Ok(())
}
