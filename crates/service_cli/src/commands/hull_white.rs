//! Hull–White command implementation

use quant_models::models::{HullWhiteModel, MarketCurve};
use tracing::info;

use crate::Result;

/// Flat continuously compounded rate of the demonstration curve.
pub const FLAT_RATE: f64 = 0.05;

/// Flat curve on yearly knots from 0 to 10
pub fn flat_market() -> Result<MarketCurve> {
    let times: Vec<f64> = (0..=10).map(f64::from).collect();
    let discounts = times.iter().map(|t| (-FLAT_RATE * t).exp()).collect();
    let forwards = vec![FLAT_RATE; times.len()];
    Ok(MarketCurve::new(times, discounts, forwards)?)
}

/// Model with a = 0.1 and σ = 1% over the flat curve
pub fn build() -> Result<HullWhiteModel> {
    Ok(HullWhiteModel::new("hw", 0.1, 0.01, flat_market()?)?)
}

/// Run the hull-white command
pub fn run() -> Result<()> {
    let model = build()?;
    let r0 = FLAT_RATE;
    info!(r0, "Pricing with Hull-White");
    println!("{}", model);

    let (a, b) = model.ab(0.0, 1.0);
    println!("A(0, 1) = {:.6}, B(0, 1) = {:.6}", a, b);
    for t in [1.0, 2.0, 5.0, 10.0] {
        println!("P(0, {:.0}) = {:.6}", t, model.bond_price(0.0, t, r0));
    }
    println!(
        "ZBP(0, 1, 2, K = 0.95) = {:.6}",
        model.zero_bond_put(0.0, 1.0, 2.0, 0.95, r0)
    );
    println!(
        "Caplet [1, 1.5] at 5% on 100 = {:.6}",
        model.caplet(0.0, 1.0, 1.5, 0.05, 100.0, r0)
    );
    let cap = model.cap(0.0, 0.5, &[0.5; 4], 0.05, 100.0, r0)?;
    println!("Cap 0.5y x 4 at 5% on 100 = {:.6}", cap);
    Ok(())
}
