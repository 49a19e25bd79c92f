//! Annealing configuration.

use crate::error::AnnealingError;

/// Parameters of the annealing schedule.
///
/// # Examples
///
/// ```
/// use quant_optimiser::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default();
/// assert_eq!(config.iterations, 200_000);
///
/// let config = AnnealingConfig::default()
///     .with_temperature(100.0)
///     .with_iterations(5_000)
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealingConfig {
    /// Starting temperature.
    ///
    /// Default: 10 000
    pub temperature: f64,

    /// Proposals per worker.
    ///
    /// Default: 200 000
    pub iterations: u64,

    /// The temperature is multiplied by `cooling_factor` whenever the
    /// iteration index is a multiple of this, including iteration 0.
    ///
    /// Default: 100
    pub cool_interval: u64,

    /// Geometric cooling factor in (0, 1).
    ///
    /// Default: 0.99
    pub cooling_factor: f64,

    /// Proposal standard deviation as a fraction of each bound width.
    ///
    /// Default: 0.05
    pub step_fraction: f64,

    /// Emit per-worker progress at debug level.
    pub debug: bool,

    /// Iterations between progress events when `debug` is set.
    ///
    /// Default: 1 000
    pub progress_interval: u64,

    /// Master seed; worker seeds derive from it. `None` draws from entropy.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            temperature: 10_000.0,
            iterations: 200_000,
            cool_interval: 100,
            cooling_factor: 0.99,
            step_fraction: 0.05,
            debug: false,
            progress_interval: 1_000,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Sets the starting temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the number of proposals per worker.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the cooling interval.
    pub fn with_cool_interval(mut self, cool_interval: u64) -> Self {
        self.cool_interval = cool_interval;
        self
    }

    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables progress events.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Checks the schedule parameters.
    ///
    /// # Errors
    ///
    /// [`AnnealingError::InvalidConfig`] for a non-positive temperature, a
    /// cooling factor outside (0, 1], a non-positive step fraction, or a zero
    /// cooling or progress interval.
    pub fn validate(&self) -> Result<(), AnnealingError> {
        let invalid = |message: &str| {
            Err(AnnealingError::InvalidConfig {
                message: message.to_string(),
            })
        };
        if !(self.temperature > 0.0 && self.temperature.is_finite()) {
            return invalid("temperature must be positive and finite");
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor <= 1.0) {
            return invalid("cooling factor must lie in (0, 1]");
        }
        if !(self.step_fraction > 0.0 && self.step_fraction.is_finite()) {
            return invalid("step fraction must be positive and finite");
        }
        if self.cool_interval == 0 {
            return invalid("cool interval must be at least 1");
        }
        if self.progress_interval == 0 {
            return invalid("progress interval must be at least 1");
        }
        Ok(())
    }
}
