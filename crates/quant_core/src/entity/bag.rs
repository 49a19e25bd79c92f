//! Ordered registry of named outputs owned by an entity.

use crate::reactive::Reactive;
use crate::types::ReactiveError;

/// A single named output.
#[derive(Clone, Debug)]
pub struct Property {
    key: String,
    label: Option<String>,
    cell: Reactive,
}

impl Property {
    /// Identifier used by remote accessors.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Short display label, falling back to the key.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// The shared cell behind this property.
    pub fn cell(&self) -> &Reactive {
        &self.cell
    }
}

/// Ordered set of properties with unique keys.
///
/// Registration order is preserved and drives rendering.
///
/// # Examples
///
/// ```
/// use quant_core::entity::PropertyBag;
/// use quant_core::reactive::Reactive;
///
/// let mut bag = PropertyBag::new("s1");
/// bag.register("price", Some("S0"), Reactive::constant(100.0)).unwrap();
/// bag.register("sigma", Some("σ"), Reactive::constant(0.2)).unwrap();
/// assert_eq!(bag.render(), "s1: S0 = 100.00|σ = 0.20");
/// ```
#[derive(Clone, Debug)]
pub struct PropertyBag {
    owner: String,
    properties: Vec<Property>,
}

impl PropertyBag {
    /// Creates an empty bag for the entity called `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            properties: Vec::new(),
        }
    }

    /// Display name of the owning entity.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Registers a property.
    ///
    /// # Errors
    ///
    /// Returns [`ReactiveError::DuplicateKey`] if `key` is already present.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        label: Option<&str>,
        cell: Reactive,
    ) -> Result<(), ReactiveError> {
        let key = key.into();
        if self.contains(&key) {
            return Err(ReactiveError::DuplicateKey {
                entity: self.owner.clone(),
                key,
            });
        }
        self.properties.push(Property {
            key,
            label: label.map(str::to_string),
            cell,
        });
        Ok(())
    }

    /// Looks up the cell registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ReactiveError::UnknownKey`] if no such property exists.
    pub fn get(&self, key: &str) -> Result<&Reactive, ReactiveError> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| &p.cell)
            .ok_or_else(|| ReactiveError::UnknownKey {
                entity: self.owner.clone(),
                key: key.to_string(),
            })
    }

    /// Returns true if `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.properties.iter().any(|p| p.key == key)
    }

    /// Iterates properties in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Number of registered properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Renders `"<owner>: <label> = <value>|..."` with two-decimal values.
    ///
    /// Every property is evaluated at call time.
    pub fn render(&self) -> String {
        let body = self
            .properties
            .iter()
            .map(|p| format!("{} = {:.2}", p.label(), p.cell.get()))
            .collect::<Vec<_>>()
            .join("|");
        format!("{}: {}", self.owner, body)
    }
}
