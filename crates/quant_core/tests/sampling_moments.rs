//! Statistical checks of the Box–Muller sampler and the Monte Carlo driver.

use quant_core::mc::{generate_samples, McConfig};
use quant_core::reactive::Reactive;
use quant_core::rng::GaussianRng;

const N: usize = 2_000_000;

struct Moments {
    mean: f64,
    variance: f64,
    skewness: f64,
    kurtosis: f64,
}

fn moments(samples: &[f64]) -> Moments {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let central = |p: i32| samples.iter().map(|x| (x - mean).powi(p)).sum::<f64>() / n;
    let variance = central(2);
    Moments {
        mean,
        variance,
        skewness: central(3) / variance.powf(1.5),
        kurtosis: central(4) / (variance * variance),
    }
}

// ============================================================================
// Standard normal moments
// ============================================================================

#[test]
fn test_sample_normals_moments() {
    let mut rng = GaussianRng::from_seed(20_240_101);
    let samples = rng.sample_normals(0.0, 1.0, N);
    let m = moments(&samples);

    assert!(m.mean.abs() < 1e-2, "mean = {}", m.mean);
    assert!((m.variance - 1.0).abs() < 1e-2, "variance = {}", m.variance);
    assert!(m.skewness.abs() < 1e-2, "skewness = {}", m.skewness);
    assert!((m.kurtosis - 3.0).abs() < 2e-2, "kurtosis = {}", m.kurtosis);
}

#[test]
fn test_sample_normal_moments() {
    let mut rng = GaussianRng::from_seed(7);
    let samples: Vec<f64> = (0..N).map(|_| rng.sample_normal(0.0, 1.0)).collect();
    let m = moments(&samples);

    assert!(m.mean.abs() < 1e-2, "mean = {}", m.mean);
    assert!((m.variance - 1.0).abs() < 1e-2, "variance = {}", m.variance);
    assert!(m.skewness.abs() < 1e-2, "skewness = {}", m.skewness);
    assert!((m.kurtosis - 3.0).abs() < 2e-2, "kurtosis = {}", m.kurtosis);
}

#[test]
fn test_scaled_samples_moments() {
    let mut rng = GaussianRng::from_seed(99);
    let samples = rng.sample_normals(5.0, 2.0, N);
    let m = moments(&samples);

    assert!((m.mean - 5.0).abs() < 2e-2, "mean = {}", m.mean);
    assert!((m.variance - 4.0).abs() < 4e-2, "variance = {}", m.variance);
}

// ============================================================================
// Monte Carlo driver
// ============================================================================

#[test]
fn test_driver_lognormal_mean() {
    // y = exp(x) with x ~ N(0, 0.2²) has mean exp(0.02)
    let x0 = Reactive::constant(0.0);
    let mu = Reactive::constant(0.0);
    let sigma = Reactive::constant(0.2);
    let config = McConfig::new(500_000).with_seed(3);

    let mut generator = generate_samples(config, &x0, |_t, x| x.exp(), &mu, &sigma).unwrap();
    let ys = generator.draw();
    let mean = ys.iter().sum::<f64>() / ys.len() as f64;
    assert!((mean - 0.02f64.exp()).abs() < 2e-3, "mean = {}", mean);

    // shifting the reactive mean moves the next draw
    mu.rebind_constant(1.0);
    let ys = generator.draw();
    let mean = ys.iter().sum::<f64>() / ys.len() as f64;
    assert!((mean - 1.02f64.exp()).abs() < 6e-3, "mean = {}", mean);
}
