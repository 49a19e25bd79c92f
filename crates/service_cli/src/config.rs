//! CLI configuration management
//!
//! Handles loading configuration from TOML files, `QUANTFN_*` environment
//! variables and CLI arguments.

use quant_optimiser::annealing::AnnealingConfig;
use quant_optimiser::equations::{default_equation_config, DEFAULT_TRIALS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Log levels understood by the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `quantfn` configuration
///
/// A partially specified `[annealing]` or `[equations]` table starts from
/// [`AnnealingConfig::default`] for the keys it omits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Subscriber level when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Global seed applied to every stochastic command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Dummy options annealed by `saa-implied-vol`
    pub trials: usize,
    /// Equation sets annealed by `equations`
    pub equation_trials: usize,
    /// Samples per Monte Carlo draw
    pub samples: usize,
    /// Grid size for curve expansion
    pub grid_points: usize,
    /// Schedule for `saa-implied-vol`
    pub annealing: AnnealingConfig,
    /// Schedule for `equations`
    pub equations: AnnealingConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            seed: None,
            trials: 100,
            equation_trials: DEFAULT_TRIALS,
            samples: 100_000,
            grid_points: 10,
            annealing: AnnealingConfig::default(),
            equations: default_equation_config(),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `QUANTFN_*` overrides read through `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QUANTFN_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(seed) = lookup("QUANTFN_SEED") {
            self.seed = Some(parse_env("QUANTFN_SEED", &seed)?);
        }
        if let Some(trials) = lookup("QUANTFN_TRIALS") {
            self.trials = parse_env("QUANTFN_TRIALS", &trials)?;
        }
        if let Some(trials) = lookup("QUANTFN_EQUATION_TRIALS") {
            self.equation_trials = parse_env("QUANTFN_EQUATION_TRIALS", &trials)?;
        }
        if let Some(iterations) = lookup("QUANTFN_ITERATIONS") {
            self.annealing.iterations = parse_env("QUANTFN_ITERATIONS", &iterations)?;
        }
        if let Some(temperature) = lookup("QUANTFN_TEMPERATURE") {
            self.annealing.temperature = parse_env("QUANTFN_TEMPERATURE", &temperature)?;
        }
        if let Some(samples) = lookup("QUANTFN_SAMPLES") {
            self.samples = parse_env("QUANTFN_SAMPLES", &samples)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 || self.equation_trials == 0 {
            return Err(ConfigError::Invalid("trial counts must be positive".to_string()));
        }
        if self.samples == 0 {
            return Err(ConfigError::Invalid("samples must be positive".to_string()));
        }
        if self.grid_points < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid_points must be at least 2, got {}",
                self.grid_points
            )));
        }
        for (table, schedule) in [("annealing", &self.annealing), ("equations", &self.equations)] {
            schedule
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("[{}] {}", table, e)))?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if cli.verbose {
            self.log_level = self.log_level.min(LogLevel::Debug);
        }
        let overrides = &cli.overrides;
        if let Some(trials) = overrides.trials {
            self.trials = trials;
        }
        if let Some(trials) = overrides.equation_trials {
            self.equation_trials = trials;
        }
        if let Some(samples) = overrides.samples {
            self.samples = samples;
        }
        if let Some(points) = overrides.grid_points {
            self.grid_points = points;
        }
    }

    /// Schedule for `saa-implied-vol`, with the global seed applied
    pub fn annealing_config(&self) -> AnnealingConfig {
        with_seed(self.annealing.clone(), self.seed)
    }

    /// Schedule for `equations`, with the global seed applied
    pub fn equation_config(&self) -> AnnealingConfig {
        with_seed(self.equations.clone(), self.seed)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

fn with_seed(config: AnnealingConfig, seed: Option<u64>) -> AnnealingConfig {
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

/// Per-subcommand size flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandOverrides {
    /// `saa-implied-vol -n`
    pub trials: Option<usize>,
    /// `equations -n`
    pub equation_trials: Option<usize>,
    /// `sampling -n`
    pub samples: Option<usize>,
    /// `curve -k`
    pub grid_points: Option<usize>,
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path; a missing file falls back to defaults
    pub config_file: PathBuf,
    /// Seed override
    pub seed: Option<u64>,
    /// Lower the log level to debug
    pub verbose: bool,
    /// Subcommand flags
    pub overrides: CommandOverrides,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
///
/// Validation runs once every source has been merged.
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_from(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with environment variables read through `lookup`
pub fn build_config_from<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if cli.config_file.is_file() {
        CliConfig::from_file(&cli.config_file)?
    } else {
        CliConfig::default()
    };

    config.apply_env_from(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.seed, None);
        assert_eq!(config.trials, 100);
        assert_eq!(config.equation_trials, DEFAULT_TRIALS);
        assert_eq!(config.equations, default_equation_config());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Trace), "trace");
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            seed = 42
            trials = 8

            [annealing]
            iterations = 5000
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.trials, 8);
        assert_eq!(config.annealing.iterations, 5_000);
        assert_eq!(config.annealing.temperature, 10_000.0);
        // untouched tables keep their defaults
        assert_eq!(config.equations, default_equation_config());
        assert_eq!(config.samples, 100_000);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env_from(lookup(&[
                ("QUANTFN_LOG_LEVEL", "warn"),
                ("QUANTFN_SEED", "7"),
                ("QUANTFN_ITERATIONS", "1000"),
                ("QUANTFN_SAMPLES", "50"),
            ]))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.annealing.iterations, 1_000);
        assert_eq!(config.samples, 50);
        assert_eq!(config.trials, 100);
    }

    #[test]
    fn test_env_parse_failure() {
        let mut config = CliConfig::default();
        let err = config
            .apply_env_from(lookup(&[("QUANTFN_TRIALS", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "QUANTFN_TRIALS"));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = CliConfig {
            seed: Some(1),
            log_level: LogLevel::Warn,
            ..Default::default()
        };
        let cli = CliArgs {
            seed: Some(99),
            verbose: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli);

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_verbose_keeps_trace() {
        let mut config = CliConfig {
            log_level: LogLevel::Trace,
            ..Default::default()
        };
        config.merge_with_cli(&CliArgs {
            verbose: true,
            ..Default::default()
        });
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_seed_reaches_schedules() {
        let config = CliConfig {
            seed: Some(5),
            ..Default::default()
        };
        assert_eq!(config.annealing_config().seed, Some(5));
        assert_eq!(config.equation_config().seed, Some(5));
        assert_eq!(CliConfig::default().annealing_config().seed, None);
    }

    #[test]
    fn test_validate() {
        let config = CliConfig {
            grid_points: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.annealing.cooling_factor = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[annealing]"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cli = CliArgs {
            config_file: PathBuf::from("definitely/not/here/quantfn.toml"),
            ..Default::default()
        };
        let config = build_config_from(&cli, lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_command_overrides_win_over_env() {
        let cli = CliArgs {
            config_file: PathBuf::from("definitely/not/here/quantfn.toml"),
            overrides: CommandOverrides {
                samples: Some(25),
                grid_points: Some(4),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = build_config_from(&cli, lookup(&[("QUANTFN_SAMPLES", "50")])).unwrap();
        assert_eq!(config.samples, 25);
        assert_eq!(config.grid_points, 4);
        assert_eq!(config.trials, 100);
    }

    #[test]
    fn test_invalid_command_override_is_rejected() {
        for overrides in [
            CommandOverrides {
                trials: Some(0),
                ..Default::default()
            },
            CommandOverrides {
                samples: Some(0),
                ..Default::default()
            },
            CommandOverrides {
                grid_points: Some(1),
                ..Default::default()
            },
        ] {
            let cli = CliArgs {
                config_file: PathBuf::from("definitely/not/here/quantfn.toml"),
                overrides,
                ..Default::default()
            };
            let result = build_config_from(&cli, lookup(&[]));
            assert!(
                matches!(result, Err(ConfigError::Invalid(_))),
                "{:?}",
                overrides
            );
        }
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = CliConfig {
            seed: Some(11),
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
