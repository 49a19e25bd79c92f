//! Lazily evaluated, shareable scalar cells.

use crate::types::ReactiveError;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Shared formula closure evaluated on every read.
pub type FormulaFn = Arc<dyn Fn() -> f64 + Send + Sync>;

/// What a cell currently reads from.
#[derive(Clone)]
enum Binding {
    /// Fixed value.
    Constant(f64),
    /// Read another cell at evaluation time.
    Link(Reactive),
    /// Derived value computed from captured upstream cells.
    Formula(FormulaFn),
}

struct Cell {
    binding: RwLock<Binding>,
}

/// A lazily evaluated scalar.
///
/// A `Reactive` is a handle onto a shared cell. Cloning the handle shares the
/// cell: every clone observes the same binding, and rebinding through any
/// clone is seen by all of them. A cell is either a constant, a link to
/// another cell, or a formula over other cells.
///
/// Reads are never cached. [`Reactive::get`] walks the current chain every
/// time, so a change anywhere upstream is visible on the very next read.
///
/// # Ownership
///
/// Rebinding replaces *which* source a cell reads; it never mutates the
/// upstream cell. A consumer built with [`Reactive::bind`] therefore keeps
/// following its source even after the source is itself rebound.
///
/// # Examples
///
/// ```
/// use quant_core::reactive::Reactive;
///
/// let spot = Reactive::constant(100.0);
/// let doubled = spot.map(|s| 2.0 * s);
/// assert_eq!(doubled.get(), 200.0);
///
/// spot.rebind_constant(120.0);
/// assert_eq!(doubled.get(), 240.0);
/// ```
#[derive(Clone)]
pub struct Reactive {
    cell: Arc<Cell>,
}

impl Reactive {
    fn with_binding(binding: Binding) -> Self {
        Self {
            cell: Arc::new(Cell {
                binding: RwLock::new(binding),
            }),
        }
    }

    /// Creates a cell that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::with_binding(Binding::Constant(value))
    }

    /// Creates a cell that reads `source` on every read.
    ///
    /// The new cell follows the source cell itself, so rebinding `source`
    /// later is observed through this cell as well.
    pub fn bind(source: &Reactive) -> Self {
        Self::with_binding(Binding::Link(source.clone()))
    }

    /// Creates a derived cell evaluating `f` on every read.
    pub fn formula<F>(f: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        Self::with_binding(Binding::Formula(Arc::new(f)))
    }

    /// Creates a derived cell applying `f` to the current value of `self`.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let source = self.clone();
        Self::formula(move || f(source.get()))
    }

    /// Evaluates the cell now.
    ///
    /// The binding is cloned out of the lock before evaluation, so no lock
    /// is held while upstream cells are read.
    pub fn get(&self) -> f64 {
        let binding = self.cell.binding.read().clone();
        match binding {
            Binding::Constant(value) => value,
            Binding::Link(source) => source.get(),
            Binding::Formula(f) => f(),
        }
    }

    /// Rebinds this cell to a fresh constant, discarding the previous chain.
    pub fn rebind_constant(&self, value: f64) {
        *self.cell.binding.write() = Binding::Constant(value);
    }

    /// Rebinds this cell to read `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ReactiveError::Cycle`] if `source` is this cell or already
    /// reads this cell through a chain of links. Cycles hidden inside
    /// formulas cannot be detected.
    pub fn rebind_to(&self, source: &Reactive) -> Result<(), ReactiveError> {
        if source.reads_from(self) {
            return Err(ReactiveError::Cycle);
        }
        *self.cell.binding.write() = Binding::Link(source.clone());
        Ok(())
    }

    /// Rebinds this cell to a formula.
    pub fn rebind_formula<F>(&self, f: F)
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        *self.cell.binding.write() = Binding::Formula(Arc::new(f));
    }

    /// Returns true if the cell currently holds a constant.
    pub fn is_constant(&self) -> bool {
        matches!(*self.cell.binding.read(), Binding::Constant(_))
    }

    /// Returns true if both handles refer to the same cell.
    #[inline]
    pub fn ptr_eq(&self, other: &Reactive) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    /// Follows the link chain starting at `self` looking for `target`.
    fn reads_from(&self, target: &Reactive) -> bool {
        let mut current = self.clone();
        loop {
            if current.ptr_eq(target) {
                return true;
            }
            let next = match &*current.cell.binding.read() {
                Binding::Link(source) => source.clone(),
                _ => return false,
            };
            current = next;
        }
    }
}

impl From<f64> for Reactive {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl fmt::Debug for Reactive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &*self.cell.binding.read() {
            Binding::Constant(v) => format!("Constant({})", v),
            Binding::Link(_) => "Link".to_string(),
            Binding::Formula(_) => "Formula".to_string(),
        };
        f.debug_struct("Reactive").field("binding", &kind).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant() {
        let c = Reactive::constant(3.5);
        assert_eq!(c.get(), 3.5);
        assert!(c.is_constant());
    }

    #[test]
    fn test_bind_follows_source_updates() {
        let source = Reactive::constant(1.0);
        let bound = Reactive::bind(&source);
        assert_eq!(bound.get(), 1.0);

        source.rebind_constant(7.0);
        assert_eq!(bound.get(), 7.0);
        assert!(!bound.is_constant());
    }

    #[test]
    fn test_bind_follows_source_rebinding() {
        let upstream = Reactive::constant(10.0);
        let source = Reactive::constant(1.0);
        let bound = Reactive::bind(&source);

        source.rebind_to(&upstream).unwrap();
        assert_eq!(bound.get(), 10.0);

        upstream.rebind_constant(11.0);
        assert_eq!(bound.get(), 11.0);
    }

    #[test]
    fn test_rebinding_consumer_leaves_source_untouched() {
        let source = Reactive::constant(2.0);
        let bound = Reactive::bind(&source);

        bound.rebind_constant(5.0);
        assert_eq!(bound.get(), 5.0);
        assert_eq!(source.get(), 2.0);
    }

    #[test]
    fn test_formula_recomputes_on_every_read() {
        let a = Reactive::constant(2.0);
        let b = Reactive::constant(3.0);
        let (fa, fb) = (a.clone(), b.clone());
        let product = Reactive::formula(move || fa.get() * fb.get());

        assert_relative_eq!(product.get(), 6.0);
        a.rebind_constant(4.0);
        assert_relative_eq!(product.get(), 12.0);
        b.rebind_formula(|| 0.5);
        assert_relative_eq!(product.get(), 2.0);
    }

    #[test]
    fn test_rebind_constant_twice_keeps_last_value() {
        let cell = Reactive::constant(0.0);
        let other = Reactive::constant(9.0);
        cell.rebind_to(&other).unwrap();

        cell.rebind_constant(1.0);
        cell.rebind_constant(2.0);
        other.rebind_constant(100.0);
        assert_eq!(cell.get(), 2.0);
    }

    #[test]
    fn test_self_link_is_rejected() {
        let cell = Reactive::constant(1.0);
        assert_eq!(cell.rebind_to(&cell), Err(ReactiveError::Cycle));
        assert_eq!(cell.get(), 1.0);
    }

    #[test]
    fn test_indirect_link_cycle_is_rejected() {
        let a = Reactive::constant(1.0);
        let b = Reactive::bind(&a);
        let c = Reactive::bind(&b);
        assert_eq!(a.rebind_to(&c), Err(ReactiveError::Cycle));
    }

    #[test]
    fn test_clone_shares_cell() {
        let a = Reactive::constant(1.0);
        let alias = a.clone();
        alias.rebind_constant(3.0);
        assert_eq!(a.get(), 3.0);
        assert!(a.ptr_eq(&alias));
        assert!(!a.ptr_eq(&Reactive::bind(&a)));
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", Reactive::constant(1.5));
        assert!(debug.contains("Constant(1.5)"));
    }

    #[test]
    fn test_reads_across_threads() {
        let source = Reactive::constant(4.0);
        let derived = source.map(|v| v + 1.0);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let d = derived.clone();
                std::thread::spawn(move || d.get())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 5.0);
        }
    }
}
