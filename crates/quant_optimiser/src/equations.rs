//! Annealing solver for [`EquationSet`] systems.

use quant_models::models::{EquationBuilder, EquationSet};

use crate::annealing::{validate_problem, AnnealingConfig, SimulatedAnnealing};
use crate::error::AnnealingError;

/// Default number of independent equation sets.
pub const DEFAULT_TRIALS: usize = 21;

/// Objective minimised by [`saa_solver`].
pub type EquationObjective = fn(&EquationSet) -> f64;

/// Schedule used for equation systems: temperature 20 000, 500 000
/// iterations, cooling every 200.
pub fn default_equation_config() -> AnnealingConfig {
    AnnealingConfig::default()
        .with_temperature(20_000.0)
        .with_iterations(500_000)
        .with_cool_interval(200)
}

/// Builds `n` independent equation sets over `vars`, each with every
/// equation, and an annealer minimising Σ|residual| over `bounds`.
///
/// # Errors
///
/// Setup errors of [`SimulatedAnnealing::new`], or
/// [`AnnealingError::Model`] if a builder fails. Dimension, bounds, trial
/// count and schedule are checked before any equation set is built.
///
/// # Examples
///
/// ```
/// use quant_core::reactive::Reactive;
/// use quant_models::models::{EquationBuilder, EquationSet};
/// use quant_models::ModelError;
/// use quant_optimiser::annealing::AnnealingConfig;
/// use quant_optimiser::equations::saa_solver;
///
/// let line: EquationBuilder = Box::new(|eqs: &EquationSet| -> Result<Reactive, ModelError> {
///     let x = eqs.var("x")?;
///     Ok(Reactive::formula(move || 3.0 * x.get() - 6.0))
/// });
/// let config = AnnealingConfig::default()
///     .with_temperature(1.0)
///     .with_iterations(20_000)
///     .with_cool_interval(20)
///     .with_seed(9);
/// let result = saa_solver(&["x"], &[line], &[(0.0, 10.0)], 4, config)
///     .unwrap()
///     .run()
///     .unwrap();
/// assert!((result.point[0] - 2.0).abs() < 1e-2);
/// ```
pub fn saa_solver(
    vars: &[&str],
    equations: &[EquationBuilder],
    bounds: &[(f64, f64)],
    n: usize,
    config: AnnealingConfig,
) -> Result<SimulatedAnnealing<EquationSet, EquationObjective>, AnnealingError> {
    validate_problem(vars, bounds, n, &config)?;
    let trials = (0..n)
        .map(|i| {
            let mut eqs = EquationSet::new(&format!("eqs{}", i), vars)?;
            eqs.add_equations(equations)?;
            Ok(eqs)
        })
        .collect::<Result<Vec<_>, AnnealingError>>()?;
    let objective: EquationObjective = EquationSet::objective;
    SimulatedAnnealing::new(trials, vars, bounds, objective, config)
}
