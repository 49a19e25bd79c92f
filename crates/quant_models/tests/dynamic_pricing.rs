//! End-to-end scenarios: linked entities reprice when upstream inputs move.

use approx::assert_abs_diff_eq;
use quant_core::entity::NamedEntity;
use quant_core::reactive::Input;
use quant_models::instruments::{
    Bond, BondTerms, DeferredExchangeOption, EuropeanCallOption, ExchangeOption, GenericOption,
    OptionInstrument, Stock, Yield,
};

// ============================================================================
// Implied volatility round trip
// ============================================================================

#[test]
fn test_generic_option_price_is_reproducible() {
    let go1 = GenericOption::pricing("go1", 100.0, 120.0, 1.0, 0.2).unwrap();
    let first = go1.value();
    assert_abs_diff_eq!(first, 2.147_297_4, epsilon = 1e-6);
    assert_eq!(go1.value(), first);
}

#[test]
fn test_implied_sigma_tracks_linked_price() {
    let go1 = GenericOption::pricing("go1", 100.0, 120.0, 1.0, 0.2).unwrap();
    let go2 = GenericOption::implied("go2", 100.0, 120.0, 1.0, go1.price()).unwrap();
    assert_abs_diff_eq!(go2.output("sigma").unwrap(), 0.2, epsilon = 1e-5);

    go1.remote_setter("sigma").unwrap()(0.3);
    assert_abs_diff_eq!(go2.output("sigma").unwrap(), 0.3, epsilon = 1e-5);

    // go2 keeps its own pv2, so the implied vol of the new price differs
    go1.remote_setter("pv2").unwrap()(100.0);
    let implied = go2.output("sigma").unwrap();
    assert!(implied > 0.3 && implied < 1.0, "implied = {}", implied);
}

#[test]
fn test_implied_sigma_reprices_quote() {
    let quote = GenericOption::pricing("q", 95.0, 100.0, 2.0, 0.25).unwrap();
    let implied = GenericOption::implied("i", 95.0, 100.0, 2.0, quote.price()).unwrap();
    let check = GenericOption::pricing("c", 95.0, 100.0, 2.0, implied.sigma()).unwrap();
    assert_abs_diff_eq!(check.value(), quote.value(), epsilon = 1e-4);
}

// ============================================================================
// Exchange options on linked stocks
// ============================================================================

#[test]
fn test_exchange_options_follow_stock_changes() {
    let s1 = Stock::new("s1", 100.0, 0.2, Input::Default, 0.03).unwrap();
    let s2 = Stock::new("s2", 120.0, 0.3, Input::Default, 0.02).unwrap();
    let eo = ExchangeOption::new("eo", &s1, &s2, 0.5, 1.0).unwrap();
    let deo = DeferredExchangeOption::new("deo", &s1, &s2, 0.5, 1.0, 2.0).unwrap();

    let (eo0, deo0) = (eo.value(), deo.value());
    assert!(deo0 < eo0);

    s1.remote_setter("price").unwrap()(120.0);
    assert!(eo.value() > eo0);
    assert!(deo.value() > deo0);

    let eo1 = eo.value();
    s2.remote_setter("divd").unwrap()(0.01);
    assert!(eo.value() < eo1);

    let eo2 = eo.value();
    eo.remote_setter("rho").unwrap()(0.7);
    assert!(eo.value() < eo2);
    // deo has its own correlation
    assert_abs_diff_eq!(deo.output("rho").unwrap(), 0.5);
}

#[test]
fn test_european_from_stock_and_generic_agree() {
    let s = Stock::new("s", 100.0, 0.2, Input::Default, 0.01).unwrap();
    let call = EuropeanCallOption::from_stock("c", &s, 105.0, 0.03, 0.5).unwrap();
    let pv1 = (-0.01f64 * 0.5).exp() * 100.0;
    let pv2 = (-0.03f64 * 0.5).exp() * 105.0;
    let go = GenericOption::pricing("go", pv1, pv2, 0.5, 0.2).unwrap();
    assert_abs_diff_eq!(call.value(), go.value(), epsilon = 1e-12);
}

// ============================================================================
// Bonds sharing a yield
// ============================================================================

#[test]
fn test_bonds_share_yield_quote() {
    let y = Yield::new("y", Input::Default).unwrap();
    let zero = Bond::new(
        "zero",
        BondTerms {
            ytm: y.ytm().into(),
            maturity: Input::Value(3.0),
            ..Default::default()
        },
    )
    .unwrap();
    let coupon = Bond::new(
        "coupon",
        BondTerms {
            ytm: y.ytm().into(),
            maturity: Input::Value(3.0),
            coupon: Input::Value(0.05),
            ..Default::default()
        },
    )
    .unwrap();

    assert_abs_diff_eq!(zero.output("P").unwrap(), 86.383_760, epsilon = 1e-6);
    assert_abs_diff_eq!(zero.output("D").unwrap(), 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(zero.output("Dm").unwrap(), 2.857_143, epsilon = 1e-6);
    assert_abs_diff_eq!(zero.output("Cov").unwrap(), 10.884_354, epsilon = 1e-6);
    assert_abs_diff_eq!(coupon.output("P").unwrap(), 100.0, epsilon = 1e-9);

    y.remote_setter("ytm").unwrap()(0.06);
    assert!(zero.output("P").unwrap() < 86.38);
    assert!(coupon.output("P").unwrap() < 100.0);
    // a coupon bond's duration is below its maturity
    assert!(coupon.output("D").unwrap() < 3.0);
}
