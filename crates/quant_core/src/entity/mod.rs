//! Named entities and the remote accessor protocol.
//!
//! Every domain object owns a [`PropertyBag`] of keyed reactive outputs.
//! Implementing [`NamedEntity::properties`] is enough to obtain string-keyed
//! getters, setters and links, plus the standard one-line rendering.
//!
//! # Examples
//!
//! ```
//! use quant_core::entity::{NamedEntity, PropertyBag};
//! use quant_core::reactive::Reactive;
//!
//! struct Square {
//!     bag: PropertyBag,
//! }
//!
//! impl NamedEntity for Square {
//!     fn properties(&self) -> &PropertyBag {
//!         &self.bag
//!     }
//! }
//!
//! let side = Reactive::constant(2.0);
//! let s = side.clone();
//! let mut bag = PropertyBag::new("sq");
//! bag.register("side", None, side).unwrap();
//! bag.register("area", None, Reactive::formula(move || s.get() * s.get())).unwrap();
//! let square = Square { bag };
//!
//! let area_of = square.remote_link("side", "area", None).unwrap();
//! assert_eq!(area_of(3.0), 9.0);
//! assert_eq!(square.output("side").unwrap(), 3.0);
//! ```

mod accessor;
mod bag;

pub use accessor::{Getter, Link, Setter};
pub use bag::{Property, PropertyBag};

use crate::reactive::Reactive;
use crate::types::ReactiveError;

/// An object with a display name and keyed reactive outputs.
pub trait NamedEntity {
    /// The entity's property registry.
    fn properties(&self) -> &PropertyBag;

    /// Display name.
    fn name(&self) -> &str {
        self.properties().owner()
    }

    /// Shared handle on the cell registered under `key`.
    fn cell(&self, key: &str) -> Result<Reactive, ReactiveError> {
        self.properties().get(key).cloned()
    }

    /// Current value of the output registered under `key`.
    fn output(&self, key: &str) -> Result<f64, ReactiveError> {
        Ok(self.properties().get(key)?.get())
    }

    /// Returns a closure reading `key` on every call.
    ///
    /// # Errors
    ///
    /// [`ReactiveError::UnknownKey`] if `key` is not registered.
    fn remote_getter(&self, key: &str) -> Result<Getter, ReactiveError> {
        let cell = self.cell(key)?;
        Ok(Box::new(move || cell.get()))
    }

    /// Returns a closure rebinding `key` to a constant on every call.
    ///
    /// Whatever chain the property previously read from is discarded.
    ///
    /// # Errors
    ///
    /// [`ReactiveError::UnknownKey`] if `key` is not registered.
    fn remote_setter(&self, key: &str) -> Result<Setter, ReactiveError> {
        let cell = self.cell(key)?;
        Ok(Box::new(move |value| cell.rebind_constant(value)))
    }

    /// Returns `f(new_x)`: set `x_key` to `new_x`, read `y_key`, then reset
    /// `x_key` to `reset_to` if given.
    ///
    /// The closure mutates the entity; concurrent calls on the same entity
    /// interleave unpredictably.
    ///
    /// # Errors
    ///
    /// [`ReactiveError::UnknownKey`] if either key is not registered. Nothing
    /// is mutated in that case.
    fn remote_link(
        &self,
        x_key: &str,
        y_key: &str,
        reset_to: Option<f64>,
    ) -> Result<Link, ReactiveError> {
        let x = self.cell(x_key)?;
        let y = self.cell(y_key)?;
        Ok(Box::new(move |new_x| {
            x.rebind_constant(new_x);
            let result = y.get();
            if let Some(reset) = reset_to {
                x.rebind_constant(reset);
            }
            result
        }))
    }

    /// One-line summary of all outputs, evaluated now.
    fn render(&self) -> String {
        self.properties().render()
    }
}
