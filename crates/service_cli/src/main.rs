//! quantfn - Command Line Demonstrations of the Reactive Quant Toolkit
//!
//! # Commands
//!
//! - `quantfn pricing` - Exchange options following their underlying stocks
//! - `quantfn implied-vol` - Implied volatility linked to a live price
//! - `quantfn saa-implied-vol` - Implied volatility by simulated annealing
//! - `quantfn equations` - Non-linear equation system by simulated annealing
//! - `quantfn hull-white` - Hull-White bond, option and cap prices
//! - `quantfn curve` - Curve resampling
//! - `quantfn sampling` - Monte Carlo payoff moments
//! - `quantfn check` - Configuration and numerical self-checks
//!
//! # Configuration
//!
//! Defaults, then the TOML file given by `--config`, then `QUANTFN_*`
//! environment variables, then command-line flags. `RUST_LOG` overrides the
//! configured log level.
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate drives `quant_core`, `quant_models`
//! and `quant_optimiser` and owns the tracing subscriber.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::curve::{ExpandMethod, OutputFormat};
use config::{build_config, CliArgs, CommandOverrides};
pub use error::{CliError, Result};

/// Reactive quant toolkit CLI
#[derive(Parser)]
#[command(name = "quantfn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "quantfn.toml")]
    config: PathBuf,

    /// Seed for every stochastic command
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price exchange options, then move the stocks under them
    Pricing,

    /// Back out a volatility from a linked option price
    ImpliedVol,

    /// Find an implied volatility by simulated annealing
    SaaImpliedVol {
        /// Number of dummy options
        #[arg(short = 'n', long)]
        trials: Option<usize>,
    },

    /// Solve a non-linear equation system by simulated annealing
    Equations {
        /// Number of equation sets
        #[arg(short = 'n', long)]
        trials: Option<usize>,
    },

    /// Price bonds, a bond put and a cap under Hull-White
    HullWhite,

    /// Resample a curve onto an even grid
    Curve {
        /// JSON file of [x, y] pairs
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Resampling method
        #[arg(short, long, value_enum, default_value_t = ExpandMethod::Cubic)]
        method: ExpandMethod,

        /// Polynomial degree for least squares
        #[arg(short, long, default_value_t = 3)]
        degree: usize,

        /// Grid size
        #[arg(short = 'k', long)]
        points: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// Draw Monte Carlo payoffs and report their moments
    Sampling {
        /// Samples per draw
        #[arg(short = 'n', long)]
        samples: Option<usize>,
    },

    /// Check configuration and numerics
    Check,
}

impl Commands {
    fn overrides(&self) -> CommandOverrides {
        let mut overrides = CommandOverrides::default();
        match self {
            Commands::SaaImpliedVol { trials } => overrides.trials = *trials,
            Commands::Equations { trials } => overrides.equation_trials = *trials,
            Commands::Curve { points, .. } => overrides.grid_points = *points,
            Commands::Sampling { samples } => overrides.samples = *samples,
            _ => {}
        }
        overrides
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        seed: cli.seed,
        verbose: cli.verbose,
        overrides: cli.command.overrides(),
    })?;

    // Initialise tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Pricing => commands::pricing::run(),
        Commands::ImpliedVol => commands::implied_vol::run(),
        Commands::SaaImpliedVol { .. } => commands::saa_implied_vol::run(&config),
        Commands::Equations { .. } => commands::equations::run(&config),
        Commands::HullWhite => commands::hull_white::run(),
        Commands::Curve {
            input,
            method,
            degree,
            format,
            ..
        } => commands::curve::run(&config, input.as_deref(), method, degree, format),
        Commands::Sampling { .. } => commands::sampling::run(&config),
        Commands::Check => commands::check::run(&config),
    }
}
