//! Sampling command implementation
//!
//! Draws call payoffs `max(x − 100, 0)` with `x = 100 + N(0, σ²)`, then
//! raises σ through the reactive input and draws again.

use quant_core::mc::{generate_samples, McConfig};
use quant_core::reactive::Reactive;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

const SPOT: f64 = 100.0;

/// First four sample moments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl Moments {
    /// Population moments of `samples`
    pub fn of(samples: &[f64]) -> Self {
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let central = |p: i32| samples.iter().map(|x| (x - mean).powi(p)).sum::<f64>() / n;
        let variance = central(2);
        Self {
            mean,
            variance,
            skewness: central(3) / variance.powf(1.5),
            kurtosis: central(4) / (variance * variance),
        }
    }
}

impl std::fmt::Display for Moments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mean = {:.6}, variance = {:.6}, skewness = {:.6}, kurtosis = {:.6}",
            self.mean, self.variance, self.skewness, self.kurtosis
        )
    }
}

/// Payoff moments at σ = 20 and σ = 30
pub fn simulate(config: &CliConfig) -> Result<(Moments, Moments)> {
    let x0 = Reactive::constant(SPOT);
    let mu = Reactive::constant(0.0);
    let sigma = Reactive::constant(20.0);
    let mut mc = McConfig::new(config.samples);
    mc.seed = config.seed;

    let mut generator = generate_samples(mc, &x0, |_t, x| (x - SPOT).max(0.0), &mu, &sigma)?;
    info!(samples = config.samples, seed = generator.seed(), "Drawing payoffs");
    let low = Moments::of(&generator.draw());
    sigma.rebind_constant(30.0);
    let high = Moments::of(&generator.draw());
    Ok((low, high))
}

/// Run the sampling command
pub fn run(config: &CliConfig) -> Result<()> {
    let (low, high) = simulate(config)?;
    println!("sigma = 20: {}", low);
    println!("sigma = 30: {}", high);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_payoff_mean_tracks_sigma() {
        let config = CliConfig {
            samples: 200_000,
            seed: Some(1),
            ..Default::default()
        };
        let (low, high) = simulate(&config).unwrap();
        // E[max(σZ, 0)] = σ / √(2π)
        assert_abs_diff_eq!(low.mean, 20.0 / (2.0 * PI).sqrt(), epsilon = 0.1);
        assert_abs_diff_eq!(high.mean, 30.0 / (2.0 * PI).sqrt(), epsilon = 0.15);
    }

    #[test]
    fn test_moments_of_symmetric_sample() {
        let m = Moments::of(&[-1.0, 1.0]);
        assert_eq!(m.mean, 0.0);
        assert_eq!(m.variance, 1.0);
        assert_eq!(m.skewness, 0.0);
        assert_eq!(m.kurtosis, 1.0);
    }
}
