use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dinorun_core::DEFAULT_MAX_GENERATIONS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Trainer settings, read from a JSON file. Absent fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub population_size: usize,
    pub max_generations: u32,
    pub hidden_units: usize,
    /// Per-weight mutation probability.
    pub mutation_rate: f64,
    /// Largest perturbation added to a mutated weight.
    pub mutation_power: f64,
    pub seed: u32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            population_size: 50,
            max_generations: DEFAULT_MAX_GENERATIONS,
            hidden_units: 6,
            mutation_rate: 0.2,
            mutation_power: 0.5,
            seed: 42,
        }
    }
}

impl TrainerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::Missing(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let config: TrainerConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be at least 1"));
        }
        if self.hidden_units == 0 {
            return Err(ConfigError::Invalid("hidden_units must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::Invalid("mutation_rate must be within 0..=1"));
        }
        if !self.mutation_power.is_finite() || self.mutation_power < 0.0 {
            return Err(ConfigError::Invalid("mutation_power must be a non-negative number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("dinorun-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = std::env::temp_dir().join("dinorun-definitely-not-here.json");
        let err = TrainerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
        assert_eq!(
            err.to_string(),
            format!("Missing configuration: {}", path.display())
        );
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = scratch("partial.json", r#"{ "population_size": 8, "seed": 7 }"#);
        let config = TrainerConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.population_size, 8);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_generations, DEFAULT_MAX_GENERATIONS);
        assert_eq!(config.hidden_units, TrainerConfig::default().hidden_units);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = scratch("broken.json", "{ population_size: ");
        let err = TrainerConfig::load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_empty_population() {
        let path = scratch("empty.json", r#"{ "population_size": 0 }"#);
        let err = TrainerConfig::load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn default_is_valid() {
        assert!(TrainerConfig::default().validate().is_ok());
    }
}
