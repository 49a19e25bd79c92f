//! Reactive value graph.
//!
//! This module provides:
//! - [`Reactive`]: a shared, lazily evaluated scalar cell
//! - [`Input`]: flexible constructor arguments coerced into cells
//!
//! Cells are never cached. Reading a derived cell re-evaluates its whole
//! upstream chain, so any rebinding upstream is seen on the next read.

mod input;
mod value;

pub use input::Input;
pub use value::{FormulaFn, Reactive};
