//! Equation system command implementation
//!
//! Solves
//!
//! ```text
//! a² + b² − c² = 0
//! a + b + c − 12 = 0
//! a + 2b − 11 = 0
//! ```
//!
//! over `[0, 100]³` by annealing independent equation sets. The unique
//! solution in range is the 3-4-5 triangle.

use quant_core::reactive::Reactive;
use quant_models::models::{EquationBuilder, EquationSet};
use quant_models::ModelError;
use quant_optimiser::annealing::AnnealingResult;
use quant_optimiser::equations::saa_solver;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Unknowns, in point order.
pub const VARS: [&str; 3] = ["a", "b", "c"];

/// Search box for every unknown.
pub const BOUNDS: [(f64, f64); 3] = [(0.0, 100.0); 3];

/// Residual builders for the 3-4-5 system
pub fn builders() -> Vec<EquationBuilder> {
    vec![
        Box::new(|eqs: &EquationSet| -> std::result::Result<Reactive, ModelError> {
            let (a, b, c) = (eqs.var("a")?, eqs.var("b")?, eqs.var("c")?);
            Ok(Reactive::formula(move || {
                a.get().powi(2) + b.get().powi(2) - c.get().powi(2)
            }))
        }),
        Box::new(|eqs: &EquationSet| -> std::result::Result<Reactive, ModelError> {
            let (a, b, c) = (eqs.var("a")?, eqs.var("b")?, eqs.var("c")?);
            Ok(Reactive::formula(move || a.get() + b.get() + c.get() - 12.0))
        }),
        Box::new(|eqs: &EquationSet| -> std::result::Result<Reactive, ModelError> {
            let (a, b) = (eqs.var("a")?, eqs.var("b")?);
            Ok(Reactive::formula(move || a.get() + 2.0 * b.get() - 11.0))
        }),
    ]
}

/// Anneals `config.equation_trials` equation sets
pub fn solve(config: &CliConfig) -> Result<AnnealingResult> {
    info!(trials = config.equation_trials, "Annealing equation system");
    let saa = saa_solver(
        &VARS,
        &builders(),
        &BOUNDS,
        config.equation_trials,
        config.equation_config(),
    )?;
    Ok(saa.run()?)
}

/// Run the equations command
pub fn run(config: &CliConfig) -> Result<()> {
    let result = solve(config)?;
    println!(
        "Solutions: {}, with error {:.6}",
        super::format_point(&result.point),
        result.score
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_core::entity::NamedEntity;

    #[test]
    fn test_triangle_zeroes_objective() {
        let mut eqs = EquationSet::new("check", &VARS).unwrap();
        eqs.add_equations(&builders()).unwrap();
        for (name, value) in VARS.iter().zip([3.0, 4.0, 5.0]) {
            eqs.remote_setter(name).unwrap()(value);
        }
        assert_eq!(eqs.objective(), 0.0);

        eqs.remote_setter("c").unwrap()(6.0);
        // |9 + 16 − 36| + |1|
        assert_eq!(eqs.objective(), 12.0);
    }
}
