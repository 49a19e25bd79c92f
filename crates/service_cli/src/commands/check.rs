//! Check command implementation
//!
//! Prints the effective configuration and runs a few numerical self-checks.

use quant_core::math::distributions::normal_cdf;
use quant_core::math::solvers::BisectionSolver;
use quant_models::instruments::{GenericOption, OptionInstrument};
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Outcome of one diagnostic
pub struct Diagnostic {
    pub name: &'static str,
    pub passed: bool,
}

/// Runs the numerical self-checks
pub fn diagnostics() -> Result<Vec<Diagnostic>> {
    let solver = BisectionSolver::with_defaults();
    let cube_root = solver.find_root(|x| x * x * x, 27.0, 0.0, 5.0)?;

    let go1 = GenericOption::pricing("go1", 100.0, 120.0, 1.0, 0.2)?;
    let go2 = GenericOption::implied("go2", 100.0, 120.0, 1.0, go1.price())?;

    Ok(vec![
        Diagnostic {
            name: "normal cdf symmetry",
            passed: (normal_cdf(0.0) - 0.5).abs() < 1e-7
                && (normal_cdf(1.5) + normal_cdf(-1.5) - 1.0).abs() < 1e-7,
        },
        Diagnostic {
            name: "bisection cube root",
            passed: (cube_root - 3.0).abs() < 1e-4,
        },
        Diagnostic {
            name: "generalised Black-Scholes reference",
            passed: (go1.value() - 2.147_297_4).abs() < 1e-6,
        },
        Diagnostic {
            name: "implied volatility round trip",
            passed: (go2.sigma().get() - 0.2).abs() < 1e-5,
        },
    ])
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration and numerics");
    println!("quantfn {}", env!("CARGO_PKG_VERSION"));
    println!("worker threads: {}", rayon::current_num_threads());
    println!();
    println!("{}", config.to_toml()?);

    let checks = diagnostics()?;
    for check in &checks {
        println!("[{}] {}", if check.passed { "ok" } else { "FAILED" }, check.name);
    }
    if let Some(failed) = checks.iter().find(|c| !c.passed) {
        return Err(CliError::SelfCheck(failed.name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_diagnostics_pass() {
        let checks = diagnostics().unwrap();
        assert_eq!(checks.len(), 4);
        for check in checks {
            assert!(check.passed, "{} failed", check.name);
        }
    }
}
