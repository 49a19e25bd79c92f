//! Systems of equations over named variables.
//!
//! Each equation is a residual cell built from the set's variable cells; the
//! system is solved when every residual is zero. The objective
//! Σ|residual| is what the annealer minimises.

use std::fmt;

use quant_core::entity::{NamedEntity, PropertyBag};
use quant_core::reactive::{Input, Reactive};

use crate::error::Result;

/// Builds one residual from a set's variables.
pub type EquationBuilder = Box<dyn Fn(&EquationSet) -> Result<Reactive> + Send + Sync>;

/// Named variables plus residual equations.
///
/// # Examples
/// ```
/// use quant_models::models::EquationSet;
///
/// let mut eqs = EquationSet::new("eqs", &["a", "b"]).unwrap();
/// let (a, b) = (eqs.var("a").unwrap(), eqs.var("b").unwrap());
/// eqs.add_equation(quant_core::reactive::Reactive::formula(move || a.get() + b.get() - 3.0));
///
/// eqs.set_var("a", 1.0).unwrap();
/// eqs.set_var("b", 2.0).unwrap();
/// assert_eq!(eqs.objective(), 0.0);
/// ```
#[derive(Debug)]
pub struct EquationSet {
    bag: PropertyBag,
    equations: Vec<Reactive>,
}

impl EquationSet {
    /// Creates a set whose variables start at zero. Blank names are skipped.
    ///
    /// # Errors
    ///
    /// `ModelError::Reactive` if a name repeats.
    pub fn new(name: &str, vars: &[&str]) -> Result<Self> {
        let mut bag = PropertyBag::new(name);
        for var in vars.iter().filter(|v| !v.trim().is_empty()) {
            bag.register(*var, None, Reactive::constant(0.0))?;
        }
        Ok(Self {
            bag,
            equations: Vec::new(),
        })
    }

    /// Cell of variable `name`.
    pub fn var(&self, name: &str) -> Result<Reactive> {
        Ok(self.cell(name)?)
    }

    /// Rebinds an existing variable, or registers a new one.
    ///
    /// Residuals already built keep reading the same cell, so they see the
    /// new binding.
    pub fn set_var(&mut self, name: &str, value: impl Into<Input>) -> Result<()> {
        let value = value.into();
        if !self.bag.contains(name) {
            let cell = value.into_reactive(name, Some(0.0))?;
            self.bag.register(name, None, cell)?;
            return Ok(());
        }
        let cell = self.bag.get(name)?;
        match value {
            Input::Value(v) => cell.rebind_constant(v),
            Input::Linked(source) => cell.rebind_to(&source)?,
            Input::Default => cell.rebind_constant(0.0),
        }
        Ok(())
    }

    /// Adds a residual cell.
    pub fn add_equation(&mut self, residual: Reactive) {
        self.equations.push(residual);
    }

    /// Builds and adds one residual per builder.
    pub fn add_equations(&mut self, builders: &[EquationBuilder]) -> Result<()> {
        for build in builders {
            let residual = build(self)?;
            self.equations.push(residual);
        }
        Ok(())
    }

    /// Residual cells in insertion order.
    pub fn equations(&self) -> &[Reactive] {
        &self.equations
    }

    /// Σ|residual|, evaluated now.
    pub fn objective(&self) -> f64 {
        self.equations.iter().map(|eq| eq.get().abs()).sum()
    }

    /// The objective as a live cell over the current equations.
    pub fn objective_cell(&self) -> Reactive {
        let equations = self.equations.clone();
        Reactive::formula(move || equations.iter().map(|eq| eq.get().abs()).sum())
    }
}

impl NamedEntity for EquationSet {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl fmt::Display for EquationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
