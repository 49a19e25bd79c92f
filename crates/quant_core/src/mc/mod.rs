//! Monte Carlo sample driver.
//!
//! [`generate_samples`] validates a configuration and returns a
//! [`SampleGenerator`]. Each [`SampleGenerator::draw`] re-reads the reactive
//! inputs, so rebinding the starting point or the distribution between draws
//! changes the next batch.
//!
//! Only single-stage draws are available: `y_i = f(t0, x0 + N(mu0, sigma0²))`.
//!
//! ```
//! use quant_core::mc::{generate_samples, McConfig};
//! use quant_core::reactive::Reactive;
//!
//! let x0 = Reactive::constant(100.0);
//! let mu = Reactive::constant(0.0);
//! let sigma = Reactive::constant(1.0);
//! let config = McConfig::new(1_000).with_seed(7);
//!
//! let mut generator = generate_samples(config, &x0, |_t, x| x.max(100.0), &mu, &sigma).unwrap();
//! let ys = generator.draw();
//! assert_eq!(ys.len(), 1_000);
//! assert!(ys.iter().all(|&y| y >= 100.0));
//! ```

use crate::reactive::Reactive;
use crate::rng::GaussianRng;
use crate::types::SamplingError;

/// Sample driver settings.
#[derive(Debug, Clone)]
pub struct McConfig {
    /// Samples per draw.
    pub n: usize,
    /// Stages per path; only 1 is supported.
    pub stages: usize,
    /// Time passed to the mapping; zero when absent.
    pub t0: Option<Reactive>,
    /// Seed for reproducible draws; OS entropy when absent.
    pub seed: Option<u64>,
}

impl McConfig {
    /// Single-stage configuration drawing `n` samples.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            stages: 1,
            t0: None,
            seed: None,
        }
    }

    /// Fix the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read the mapping time from `t0`.
    pub fn with_time(mut self, t0: &Reactive) -> Self {
        self.t0 = Some(t0.clone());
        self
    }

    /// Set the number of stages per path.
    pub fn with_stages(mut self, stages: usize) -> Self {
        self.stages = stages;
        self
    }
}

impl Default for McConfig {
    fn default() -> Self {
        Self::new(1_000)
    }
}

/// Repeatable sample source produced by [`generate_samples`].
pub struct SampleGenerator<F> {
    n: usize,
    x0: Reactive,
    mu0: Reactive,
    sigma0: Reactive,
    t0: Option<Reactive>,
    y_map: F,
    rng: GaussianRng,
}

impl<F> SampleGenerator<F>
where
    F: Fn(f64, f64) -> f64,
{
    /// Draw a fresh batch of `n` mapped samples.
    pub fn draw(&mut self) -> Vec<f64> {
        let t = self.t0.as_ref().map_or(0.0, Reactive::get);
        let (x0, mu, sigma) = (self.x0.get(), self.mu0.get(), self.sigma0.get());
        (0..self.n)
            .map(|_| {
                let x = x0 + self.rng.sample_normal(mu, sigma);
                (self.y_map)(t, x)
            })
            .collect()
    }

    /// Seed of the underlying generator.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Samples per draw.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true if draws are empty.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

/// Build a sample generator for `y = y_map(t, x0 + N(mu0, sigma0²))`.
///
/// # Errors
///
/// - [`SamplingError::InvalidStages`] when `config.stages == 0`
/// - [`SamplingError::MultiStageUnsupported`] when `config.stages > 1`
pub fn generate_samples<F>(
    config: McConfig,
    x0: &Reactive,
    y_map: F,
    mu0: &Reactive,
    sigma0: &Reactive,
) -> Result<SampleGenerator<F>, SamplingError>
where
    F: Fn(f64, f64) -> f64,
{
    match config.stages {
        0 => return Err(SamplingError::InvalidStages(0)),
        1 => {}
        stages => return Err(SamplingError::MultiStageUnsupported { stages }),
    }

    let rng = config
        .seed
        .map_or_else(GaussianRng::from_entropy, GaussianRng::from_seed);

    Ok(SampleGenerator {
        n: config.n,
        x0: x0.clone(),
        mu0: mu0.clone(),
        sigma0: sigma0.clone(),
        t0: config.t0,
        y_map,
        rng,
    })
}
