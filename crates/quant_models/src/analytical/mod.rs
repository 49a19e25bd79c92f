//! Closed-form pricing formulas shared by the option entities.

mod black_scholes;

pub use black_scholes::{generalised_black_scholes, margrabe_volatility, price_formula};
