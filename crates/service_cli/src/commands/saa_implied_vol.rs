//! Implied volatility by simulated annealing
//!
//! Dummy options share the target's inputs and start with zero volatility;
//! the annealer searches their `sigma` for the target's price.

use quant_models::instruments::{GenericOption, OptionInstrument};
use quant_optimiser::annealing::{AnnealingResult, SimulatedAnnealing};
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Anneals `config.trials` dummies towards the price of go1 (100, 120, 1, σ 0.2)
pub fn solve(config: &CliConfig) -> Result<AnnealingResult> {
    let target = GenericOption::pricing("go1", 100.0, 120.0, 1.0, 0.2)?;
    let dummies = (0..config.trials)
        .map(|i| {
            GenericOption::pricing(
                &format!("dummy{}", i),
                target.pv1(),
                target.pv2(),
                target.option_base().maturity(),
                0.0,
            )
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let target_price = target.price().clone();
    let objective = move |go: &GenericOption| (go.value() - target_price.get()).abs();

    info!(trials = config.trials, target = target.value(), "Annealing implied volatility");
    let saa = SimulatedAnnealing::new(
        dummies,
        &["sigma"],
        &[(0.0, 1.0)],
        objective,
        config.annealing_config(),
    )?;
    Ok(saa.run()?)
}

/// Run the saa-implied-vol command
pub fn run(config: &CliConfig) -> Result<()> {
    let result = solve(config)?;
    println!("x -> {}, y -> {:.6e}", super::format_point(&result.point), result.score);
    for (worker, reason) in result.failures() {
        println!("worker {} failed: {}", worker, reason);
    }
    Ok(())
}
