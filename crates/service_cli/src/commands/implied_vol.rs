//! Implied volatility command implementation
//!
//! `go2` is quoted at `go1`'s live price and backs out its volatility by
//! bisection; changing `go1` moves `go2`'s implied volatility with it.

use quant_core::entity::NamedEntity;
use quant_models::instruments::{GenericOption, OptionInstrument};
use tracing::info;

use crate::Result;

/// A priced option and an option implied from its price
pub struct ImpliedPair {
    pub go1: GenericOption,
    pub go2: GenericOption,
}

impl ImpliedPair {
    /// go1 (pv1 100, pv2 120, T 1, σ 0.2); go2 linked to go1's inputs and price
    pub fn build() -> Result<Self> {
        let go1 = GenericOption::pricing("go1", 100.0, 120.0, 1.0, 0.2)?;
        let go2 = GenericOption::implied(
            "go2",
            go1.pv1(),
            go1.pv2(),
            go1.option_base().maturity(),
            go1.price(),
        )?;
        Ok(Self { go1, go2 })
    }

    /// Moves go1's volatility to 0.3 and its second present value to 100
    pub fn shock(&self) -> Result<()> {
        self.go1.remote_setter("sigma")?(0.3);
        self.go1.remote_setter("pv2")?(100.0);
        Ok(())
    }

    fn print(&self) {
        println!("{}", self.go1);
        println!("{}", self.go2);
    }
}

/// Run the implied-vol command
pub fn run() -> Result<()> {
    let pair = ImpliedPair::build()?;
    pair.print();

    pair.shock()?;
    info!("go1 moved: sigma = 0.3, pv2 = 100");
    pair.print();
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_implied_recovers_sigma() {
        let pair = ImpliedPair::build().unwrap();
        assert_abs_diff_eq!(pair.go2.sigma().get(), 0.2, epsilon = 1e-5);
        assert_abs_diff_eq!(pair.go2.value(), pair.go1.value(), epsilon = 1e-12);
    }

    #[test]
    fn test_implied_follows_shock() {
        let pair = ImpliedPair::build().unwrap();
        pair.shock().unwrap();
        assert_eq!(pair.go2.pv2().get(), 100.0);
        assert_abs_diff_eq!(pair.go2.sigma().get(), 0.3, epsilon = 1e-5);
    }
}
