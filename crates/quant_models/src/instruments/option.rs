//! Shared option state and the implied-volatility search.

use quant_core::entity::{Link, NamedEntity, PropertyBag};
use quant_core::math::solvers::{BisectionConfig, BisectionSolver, BracketCheck, EndpointPolicy};
use quant_core::reactive::{Input, Reactive};
use quant_core::types::SolverError;

use crate::error::Result;

/// Volatility bracket searched by implied-volatility formulas.
pub const IMPLIED_VOL_BRACKET: (f64, f64) = (0.0, 1.0);

/// Maturity and price cells common to every option.
///
/// The price starts as the constant 0 and is rebound by the concrete option
/// to its pricing formula or to the quoted price.
#[derive(Clone, Debug)]
pub struct OptionBase {
    maturity: Reactive,
    price: Reactive,
}

impl OptionBase {
    /// Creates the base from a required maturity.
    pub fn new(maturity: impl Into<Input>) -> Result<Self> {
        Ok(Self {
            maturity: maturity.into().into_reactive("maturity", None)?,
            price: Reactive::constant(0.0),
        })
    }

    /// Maturity cell.
    pub fn maturity(&self) -> &Reactive {
        &self.maturity
    }

    /// Price cell.
    pub fn price(&self) -> &Reactive {
        &self.price
    }

    /// Points the price cell at `source`.
    pub(crate) fn bind_price(&self, source: &Reactive) -> Result<()> {
        self.price.rebind_to(source)?;
        Ok(())
    }

    /// Registers `maturity` (T) and `price` (P0).
    pub(crate) fn register(&self, bag: &mut PropertyBag) -> Result<()> {
        bag.register("maturity", Some("T"), self.maturity.clone())?;
        bag.register("price", Some("P0"), self.price.clone())?;
        Ok(())
    }
}

/// Common view over the option entities.
pub trait OptionInstrument: NamedEntity {
    /// Shared maturity and price cells.
    fn option_base(&self) -> &OptionBase;

    /// Current option value.
    fn value(&self) -> f64 {
        self.option_base().price().get()
    }

    /// Current maturity.
    fn time_to_maturity(&self) -> f64 {
        self.option_base().maturity().get()
    }
}

/// Bisects `sigma → price` over [`IMPLIED_VOL_BRACKET`] for `target`.
///
/// Endpoint hits return the volatility, not the price. Prices are positive
/// at both ends of the bracket, so the sign test is shifted by the target.
pub(crate) fn solve_implied_vol(link: &Link, target: f64) -> std::result::Result<f64, SolverError> {
    let solver = BisectionSolver::new(
        BisectionConfig::default()
            .with_policy(EndpointPolicy::IndependentValue)
            .with_bracket_check(BracketCheck::TargetShifted),
    );
    let (lower, upper) = IMPLIED_VOL_BRACKET;
    solver.find_root_link(link, target, lower, upper)
}

/// Maps a failed implied-volatility search to NaN with a warning, since a
/// formula cell cannot return an error.
pub(crate) fn implied_or_nan(
    entity: &str,
    result: std::result::Result<f64, crate::ModelError>,
) -> f64 {
    match result {
        Ok(sigma) => sigma,
        Err(err) => {
            tracing::warn!(entity, error = %err, "Implied volatility search failed");
            f64::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_price_starts_at_zero() {
        let base = OptionBase::new(1.0).unwrap();
        assert_eq!(base.price().get(), 0.0);
        assert_eq!(base.maturity().get(), 1.0);
    }

    #[test]
    fn test_base_requires_maturity() {
        assert!(OptionBase::new(Input::Default).is_err());
    }

    #[test]
    fn test_bind_price_follows_source() {
        let base = OptionBase::new(1.0).unwrap();
        let quote = Reactive::constant(3.5);
        base.bind_price(&quote).unwrap();
        quote.rebind_constant(4.0);
        assert_eq!(base.price().get(), 4.0);
    }

    #[test]
    fn test_solve_implied_vol_linear_link() {
        let link: Link = Box::new(|sigma| 10.0 * sigma);
        let sigma = solve_implied_vol(&link, 2.5).unwrap();
        assert!((sigma - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_implied_or_nan() {
        assert!(implied_or_nan("x", Err(crate::ModelError::MissingPricingMode {
            entity: "x".to_string()
        }))
        .is_nan());
        assert_eq!(implied_or_nan("x", Ok(0.2)), 0.2);
    }
}
