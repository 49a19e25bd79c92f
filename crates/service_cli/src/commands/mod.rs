//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod curve;
pub mod equations;
pub mod hull_white;
pub mod implied_vol;
pub mod pricing;
pub mod saa_implied_vol;
pub mod sampling;

/// Renders a point as `[x0, x1, …]` with six decimals.
pub fn format_point(point: &[f64]) -> String {
    let parts: Vec<String> = point.iter().map(|x| format!("{:.6}", x)).collect();
    format!("[{}]", parts.join(", "))
}
