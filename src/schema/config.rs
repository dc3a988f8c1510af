//! Configuration types for the genetic optimizer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ProblemConfig;

/// Top-level optimizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Problem instance to optimize (physical constants + search bounds).
    pub problem: ProblemConfig,
    /// Genetic-algorithm settings.
    #[serde(default)]
    pub ga: GaConfig,
    /// Random seed for reproducibility. A fixed seed makes the full
    /// generation trace bit-identical across runs.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl OptimizerConfig {
    /// Validate engine parameters and the problem instance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ga.validate()?;
        self.problem.validate()?;
        Ok(())
    }
}

/// Genetic-algorithm settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Maximum number of generations.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Individuals sampled (with replacement) per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Crossover probability (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Mutation probability per gene (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Gaussian mutation standard deviation, as a fraction of each gene's
    /// search range.
    #[serde(default = "default_mutation_scale")]
    pub mutation_scale: f64,
    /// Number of best individuals carried unchanged into the next
    /// generation.
    #[serde(default = "default_elite_count")]
    pub elite_count: usize,
    /// Stop early when best-fitness improvement over this many trailing
    /// generations stays below `epsilon`. `None` disables early stopping.
    #[serde(default)]
    pub stagnation_window: Option<usize>,
    /// Improvement threshold for stagnation-based termination.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            max_generations: default_max_generations(),
            tournament_size: default_tournament_size(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            mutation_scale: default_mutation_scale(),
            elite_count: default_elite_count(),
            stagnation_window: None,
            epsilon: default_epsilon(),
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_max_generations() -> usize {
    100
}
fn default_tournament_size() -> usize {
    3
}
fn default_crossover_rate() -> f64 {
    0.9
}
fn default_mutation_rate() -> f64 {
    0.1
}
fn default_mutation_scale() -> f64 {
    0.1
}
fn default_elite_count() -> usize {
    1
}
fn default_epsilon() -> f64 {
    1e-12
}

impl GaConfig {
    /// Validate engine parameters. Invalid configurations are rejected
    /// here, at construction; the generational loop has no recoverable
    /// failure modes of its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::InvalidMaxGenerations);
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::EliteCountTooLarge {
                elite: self.elite_count,
                population: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if !self.mutation_scale.is_finite() || self.mutation_scale <= 0.0 {
            return Err(ConfigError::InvalidMutationScale(self.mutation_scale));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.stagnation_window == Some(0) {
            return Err(ConfigError::InvalidStagnationWindow);
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::RateOutOfRange { name, value });
    }
    Ok(())
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
    #[error("Max generations must be at least 1")]
    InvalidMaxGenerations,
    #[error("Elite count {elite} must be smaller than population size {population}")]
    EliteCountTooLarge { elite: usize, population: usize },
    #[error("Tournament size must be at least 1")]
    InvalidTournamentSize,
    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("Mutation scale must be positive and finite, got {0}")]
    InvalidMutationScale(f64),
    #[error("Epsilon must be non-negative and finite, got {0}")]
    InvalidEpsilon(f64),
    #[error("Stagnation window must be at least 1 generation")]
    InvalidStagnationWindow,
    #[error("{name} bounds are invalid: min {min} must be finite and below max {max}")]
    InvalidBounds {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{name} must be positive, got {value}")]
    NonPositiveConstant { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NonFiniteConstant { name: &'static str, value: f64 },
}

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Load and validate an optimizer configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<OptimizerConfig, LoadError> {
    let text = fs::read_to_string(path)?;
    let config: OptimizerConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::super::CylinderConfig;
    use super::*;

    fn cylinder_config() -> OptimizerConfig {
        OptimizerConfig {
            problem: ProblemConfig::Cylinder(CylinderConfig::default()),
            ga: GaConfig::default(),
            random_seed: Some(42),
        }
    }

    #[test]
    fn test_default_config_valid() {
        assert!(cylinder_config().validate().is_ok());
    }

    #[test]
    fn test_elite_count_rejected() {
        let mut config = cylinder_config();
        config.ga.elite_count = config.ga.population_size;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EliteCountTooLarge { .. })
        ));
    }

    #[test]
    fn test_rates_rejected() {
        let mut config = cylinder_config();
        config.ga.crossover_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RateOutOfRange {
                name: "crossover_rate",
                ..
            })
        ));

        let mut config = cylinder_config();
        config.ga.mutation_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_roundtrip() {
        let config = cylinder_config();
        let json = serde_json::to_string_pretty(&config).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_config(file.path()).unwrap();
        assert_eq!(loaded.ga.population_size, config.ga.population_size);
        assert_eq!(loaded.random_seed, Some(42));
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let mut config = cylinder_config();
        config.ga.population_size = 1;
        let json = serde_json::to_string(&config).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(LoadError::Invalid(ConfigError::PopulationTooSmall))
        ));
    }
}
