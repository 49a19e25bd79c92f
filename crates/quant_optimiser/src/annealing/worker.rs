//! Single-chain annealing worker.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use quant_core::entity::Setter;
use quant_core::rng::GaussianRng;

use super::config::AnnealingConfig;
use super::result::{WorkerFailure, WorkerOutcome, WorkerReport};

/// One Markov chain over a trial it owns exclusively.
pub(crate) struct Worker<T, F> {
    pub(crate) id: usize,
    pub(crate) trial: T,
    pub(crate) setters: Vec<Setter>,
    pub(crate) bounds: Arc<[(f64, f64)]>,
    pub(crate) objective: Arc<F>,
    pub(crate) config: AnnealingConfig,
    pub(crate) rng: GaussianRng,
}

impl<T, F> Worker<T, F>
where
    F: Fn(&T) -> f64,
{
    /// Runs the chain, turning a panic into a failed outcome.
    pub(crate) fn run(self) -> WorkerOutcome {
        let worker = self.id;
        match catch_unwind(AssertUnwindSafe(move || self.anneal())) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::warn!(worker, %message, "Annealing worker panicked");
                WorkerOutcome::Failed {
                    worker,
                    reason: WorkerFailure::Panicked(message),
                }
            }
        }
    }

    fn score(&self) -> f64 {
        (self.objective)(&self.trial)
    }

    fn apply(&self, point: &[f64]) {
        for (set, &x) in self.setters.iter().zip(point) {
            set(x);
        }
    }

    fn anneal(mut self) -> WorkerOutcome {
        let started = Instant::now();
        let dim = self.bounds.len();
        let bounds = Arc::clone(&self.bounds);
        let steps: Vec<f64> = bounds
            .iter()
            .map(|(lo, hi)| (hi - lo) * self.config.step_fraction)
            .collect();

        let mut current: Vec<f64> = bounds
            .iter()
            .map(|&(lo, hi)| self.rng.gen_between(lo, hi))
            .collect();
        self.apply(&current);
        let mut score = self.score();
        if !score.is_finite() {
            return self.fail(WorkerFailure::NonFiniteInitialScore(score));
        }

        let mut temperature = self.config.temperature;
        let mut accepted = 0u64;
        let mut candidate = vec![0.0; dim];

        for itr in 0..self.config.iterations {
            if itr % self.config.cool_interval == 0 {
                temperature *= self.config.cooling_factor;
            }

            for (i, &(lo, hi)) in bounds.iter().enumerate() {
                // resample until strictly inside the bounds
                let mut next = current[i] + self.rng.sample_normal(0.0, steps[i]);
                while next <= lo || next >= hi {
                    next = current[i] + self.rng.sample_normal(0.0, steps[i]);
                }
                candidate[i] = next;
            }
            self.apply(&candidate);
            let candidate_score = self.score();
            let delta = candidate_score - score;

            if self.config.debug && itr % self.config.progress_interval == 0 {
                tracing::debug!(
                    worker = self.id,
                    itr,
                    delta,
                    temperature,
                    probability = (-delta / temperature).exp(),
                    score,
                    "Annealing progress"
                );
            }

            let accept = candidate_score.is_finite()
                && (delta <= 0.0 || self.rng.gen_uniform() <= (-delta / temperature).exp());
            if accept {
                current.copy_from_slice(&candidate);
                score = candidate_score;
                accepted += 1;
            }
        }

        self.apply(&current);
        let score = self.score();
        if !score.is_finite() {
            return self.fail(WorkerFailure::NonFiniteFinalScore(score));
        }

        tracing::info!(
            worker = self.id,
            score,
            accepted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Annealing worker finished"
        );
        WorkerOutcome::Completed(WorkerReport {
            worker: self.id,
            point: current,
            score,
            accepted,
            final_temperature: temperature,
        })
    }

    fn fail(&self, reason: WorkerFailure) -> WorkerOutcome {
        tracing::warn!(worker = self.id, %reason, "Annealing worker failed");
        WorkerOutcome::Failed {
            worker: self.id,
            reason,
        }
    }
}
