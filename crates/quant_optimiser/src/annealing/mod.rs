//! Multi-worker simulated annealing.
//!
//! Each trial instance is moved into its own worker, which runs an
//! independent Metropolis chain over the named inputs:
//!
//! 1. Draw a uniform starting point inside the bounds and apply it.
//! 2. Every `cool_interval` iterations multiply the temperature by
//!    `cooling_factor`.
//! 3. Propose `x + N(0, (step_fraction · width)²)` per dimension, resampling
//!    until strictly inside the bounds, apply it and evaluate.
//! 4. Accept if the score does not rise, otherwise with probability
//!    `exp(−Δ/T)`. Non-finite scores are never accepted.
//!
//! Workers run once on the rayon pool. The result is the completed worker
//! with the lowest score.
//!
//! # Examples
//!
//! ```
//! use quant_core::entity::NamedEntity;
//! use quant_models::models::EquationSet;
//! use quant_optimiser::annealing::{AnnealingConfig, SimulatedAnnealing};
//!
//! let trials: Vec<EquationSet> = (0..4)
//!     .map(|_| EquationSet::new("q", &["x"]).unwrap())
//!     .collect();
//! let config = AnnealingConfig::default()
//!     .with_temperature(0.01)
//!     .with_iterations(5_000)
//!     .with_cool_interval(20)
//!     .with_seed(1);
//! let saa = SimulatedAnnealing::new(
//!     trials,
//!     &["x"],
//!     &[(-5.0, 5.0)],
//!     |q: &EquationSet| (q.output("x").unwrap() - 2.0).powi(2),
//!     config,
//! )
//! .unwrap();
//! let result = saa.run().unwrap();
//! assert!((result.point[0] - 2.0).abs() < 0.1);
//! ```

mod config;
mod result;
mod worker;

pub use config::AnnealingConfig;
pub use result::{AnnealingResult, WorkerFailure, WorkerOutcome, WorkerReport};

use std::sync::Arc;
use std::time::Instant;

use quant_core::entity::NamedEntity;
use quant_core::rng::GaussianRng;
use rayon::prelude::*;

use crate::error::AnnealingError;
use worker::Worker;

/// Checks names against bounds, the bounds themselves, the trial count and
/// the schedule, in that order.
pub(crate) fn validate_problem(
    var_names: &[&str],
    bounds: &[(f64, f64)],
    trials: usize,
    config: &AnnealingConfig,
) -> Result<(), AnnealingError> {
    if var_names.len() != bounds.len() {
        return Err(AnnealingError::DimensionMismatch {
            names: var_names.len(),
            bounds: bounds.len(),
        });
    }
    for (name, &(lower, upper)) in var_names.iter().zip(bounds) {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(AnnealingError::InvalidBounds {
                name: name.to_string(),
                lower,
                upper,
            });
        }
    }
    if trials == 0 {
        return Err(AnnealingError::NoTrials);
    }
    config.validate()
}

/// A validated annealing problem, ready to run.
pub struct SimulatedAnnealing<T, F> {
    workers: Vec<Worker<T, F>>,
    var_names: Vec<String>,
    master_seed: u64,
}

impl<T, F> SimulatedAnnealing<T, F>
where
    T: NamedEntity + Send,
    F: Fn(&T) -> f64 + Send + Sync,
{
    /// Validates the problem and prepares one worker per trial.
    ///
    /// # Errors
    ///
    /// - [`AnnealingError::DimensionMismatch`] if names and bounds differ in
    ///   length
    /// - [`AnnealingError::InvalidBounds`] if a lower bound is not strictly
    ///   below its upper bound, or either is not finite
    /// - [`AnnealingError::NoTrials`] for an empty trial list
    /// - [`AnnealingError::InvalidConfig`] for an unusable schedule
    /// - [`AnnealingError::Accessor`] if a trial lacks a named variable
    ///
    /// Checks run in that order, before any trial is touched.
    pub fn new(
        trials: Vec<T>,
        var_names: &[&str],
        bounds: &[(f64, f64)],
        objective: F,
        config: AnnealingConfig,
    ) -> Result<Self, AnnealingError> {
        validate_problem(var_names, bounds, trials.len(), &config)?;

        let master_seed = config
            .seed
            .unwrap_or_else(|| GaussianRng::from_entropy().seed());
        let bounds: Arc<[(f64, f64)]> = Arc::from(bounds.to_vec());
        let objective = Arc::new(objective);

        let workers = trials
            .into_iter()
            .enumerate()
            .map(|(id, trial)| {
                let setters = var_names
                    .iter()
                    .map(|name| trial.remote_setter(name))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Worker {
                    id,
                    trial,
                    setters,
                    bounds: Arc::clone(&bounds),
                    objective: Arc::clone(&objective),
                    config: config.clone(),
                    rng: GaussianRng::from_seed(GaussianRng::child_seed(master_seed, id as u64)),
                })
            })
            .collect::<Result<Vec<_>, AnnealingError>>()?;

        Ok(Self {
            workers,
            var_names: var_names.iter().map(|s| s.to_string()).collect(),
            master_seed,
        })
    }

    /// Number of workers.
    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Variable names, in point order.
    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// Seed the worker seeds derive from.
    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Runs every worker once in parallel and reduces to the best point.
    ///
    /// # Errors
    ///
    /// [`AnnealingError::AllWorkersFailed`] if no worker completed.
    pub fn run(self) -> Result<AnnealingResult, AnnealingError> {
        let started = Instant::now();
        let total = self.workers.len();
        let outcomes: Vec<WorkerOutcome> = self.workers.into_par_iter().map(Worker::run).collect();

        let Some(result) = AnnealingResult::reduce(outcomes.clone()) else {
            let first = outcomes
                .iter()
                .find_map(|o| match o {
                    WorkerOutcome::Failed { worker, reason } => {
                        Some(format!("worker {}: {}", worker, reason))
                    }
                    WorkerOutcome::Completed(_) => None,
                })
                .unwrap_or_default();
            return Err(AnnealingError::AllWorkersFailed {
                workers: total,
                first,
            });
        };

        tracing::info!(
            point = ?result.point,
            score = result.score,
            worker = result.worker,
            completed = result.completed(),
            workers = total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Simulated annealing finished"
        );
        Ok(result)
    }
}
