//! Worker outcomes and the reduced result.

use std::fmt;

/// Why a worker produced no answer.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerFailure {
    /// The objective at the starting point was NaN or infinite.
    NonFiniteInitialScore(f64),
    /// The objective at the final point was NaN or infinite.
    NonFiniteFinalScore(f64),
    /// The objective or a setter panicked.
    Panicked(String),
}

impl fmt::Display for WorkerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerFailure::NonFiniteInitialScore(y) => write!(f, "non-finite initial score {}", y),
            WorkerFailure::NonFiniteFinalScore(y) => write!(f, "non-finite final score {}", y),
            WorkerFailure::Panicked(msg) => write!(f, "panicked: {}", msg),
        }
    }
}

/// Summary of a completed worker.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerReport {
    /// Worker index (trial position).
    pub worker: usize,
    /// Final point, one value per variable.
    pub point: Vec<f64>,
    /// Objective at `point`.
    pub score: f64,
    /// Accepted proposals.
    pub accepted: u64,
    /// Temperature after the last cooling step.
    pub final_temperature: f64,
}

/// Result of one worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerOutcome {
    /// The worker ran to its iteration budget.
    Completed(WorkerReport),
    /// The worker failed and takes no part in the reduction.
    Failed {
        /// Worker index
        worker: usize,
        /// Failure reason
        reason: WorkerFailure,
    },
}

impl WorkerOutcome {
    /// Worker index.
    pub fn worker(&self) -> usize {
        match self {
            WorkerOutcome::Completed(report) => report.worker,
            WorkerOutcome::Failed { worker, .. } => *worker,
        }
    }

    /// The report if the worker completed.
    pub fn report(&self) -> Option<&WorkerReport> {
        match self {
            WorkerOutcome::Completed(report) => Some(report),
            WorkerOutcome::Failed { .. } => None,
        }
    }
}

/// Best point over all completed workers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingResult {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective at `point`.
    pub score: f64,
    /// Worker that found it.
    pub worker: usize,
    /// Every worker's outcome, ordered by worker index.
    pub outcomes: Vec<WorkerOutcome>,
}

impl AnnealingResult {
    /// Picks the minimal score; ties go to the lowest worker index.
    ///
    /// Returns `None` when no worker completed.
    pub fn reduce(mut outcomes: Vec<WorkerOutcome>) -> Option<Self> {
        outcomes.sort_by_key(WorkerOutcome::worker);
        let best = outcomes
            .iter()
            .filter_map(WorkerOutcome::report)
            .fold(None::<&WorkerReport>, |best, r| match best {
                Some(b) if b.score <= r.score => Some(b),
                _ => Some(r),
            })?
            .clone();
        Some(Self {
            point: best.point,
            score: best.score,
            worker: best.worker,
            outcomes,
        })
    }

    /// Number of workers that completed.
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.report().is_some()).count()
    }

    /// Failed workers and their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &WorkerFailure)> {
        self.outcomes.iter().filter_map(|o| match o {
            WorkerOutcome::Failed { worker, reason } => Some((*worker, reason)),
            WorkerOutcome::Completed(_) => None,
        })
    }
}
