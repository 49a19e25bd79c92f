//! Instrument entities.
//!
//! Every instrument registers its inputs and outputs in a property bag, so
//! any of them can be read, overwritten or linked by key:
//!
//! - [`Stock`], [`Yield`]: market quotes
//! - [`Bond`]: price, duration and convexity of a coupon bond
//! - [`GenericOption`], [`EuropeanCallOption`]: generalised Black–Scholes
//!   options with pricing and implied-volatility modes
//! - [`ExchangeOption`], [`DeferredExchangeOption`]: Margrabe options on
//!   two stocks

mod bond;
mod european;
mod exchange;
mod generic_option;
mod option;
mod stock;
mod yield_rate;

pub use bond::{Bond, BondTerms};
pub use european::{EuropeanCallOption, EuropeanCallTerms};
pub use exchange::{DeferredExchangeOption, ExchangeOption};
pub use generic_option::GenericOption;
pub use option::{OptionBase, OptionInstrument, IMPLIED_VOL_BRACKET};
pub use stock::Stock;
pub use yield_rate::Yield;
