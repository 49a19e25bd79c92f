//! Curve command implementation
//!
//! Resamples a curve onto an even grid by linear interpolation, a natural
//! cubic spline or a least-squares polynomial. Points come from a JSON file
//! of `[x, y]` pairs, or a built-in sample.

use std::path::Path;

use clap::ValueEnum;
use quant_models::market_data::Curve;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Resampling method
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExpandMethod {
    Linear,
    Cubic,
    LeastSquares,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

const SAMPLE_POINTS: [(f64, f64); 6] = [
    (0.0, 0.0),
    (1.0, 0.8),
    (2.0, 0.9),
    (3.0, 0.1),
    (4.0, -0.8),
    (5.0, -1.0),
];

/// Reads `[[x, y], ...]` from `path`, or the built-in sample when absent
pub fn load_points(path: Option<&Path>) -> Result<Vec<(f64, f64)>> {
    let Some(path) = path else {
        return Ok(SAMPLE_POINTS.to_vec());
    };
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Resamples `curve` onto `k` points
pub fn expand(curve: &Curve, method: ExpandMethod, degree: usize, k: usize) -> Result<Curve> {
    let expanded = match method {
        ExpandMethod::Linear => curve.linear_expand(k)?,
        ExpandMethod::Cubic => curve.cubic_spline_expand(k)?,
        ExpandMethod::LeastSquares => curve.least_squares_expand(degree, k)?,
    };
    Ok(expanded)
}

/// Run the curve command
pub fn run(
    config: &CliConfig,
    input: Option<&Path>,
    method: ExpandMethod,
    degree: usize,
    format: OutputFormat,
) -> Result<()> {
    let curve = Curve::from_points(&load_points(input)?)?;
    info!(points = curve.xs().len(), grid = config.grid_points, ?method, "Expanding curve");
    let expanded = expand(&curve, method, degree, config.grid_points)?;

    match format {
        OutputFormat::Csv => println!("{}", expanded),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&expanded.points())?),
    }
    Ok(())
}
