//! Application configuration, read from a TOML file.
//!
//! Every field has a serde default, so an empty file (or no file at all)
//! yields a runnable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tsas_core::commands::TunableParams;
use tsas_core::constants::TICK_RATE;
use tsas_core::enums::ScenarioId;
use tsas_sim::SimConfig;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub simulation: SimulationSection,
    pub model: ModelSection,
    pub tunables: TunableParams,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    pub tick_rate: u32,
    pub seed: u64,
    pub scenario: ScenarioId,
    /// Stop after this many ticks. Unbounded when absent.
    pub max_ticks: Option<u64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            seed: 42,
            scenario: ScenarioId::default(),
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSection {
    /// Trained weight artifact. Without one the network runs on seeded
    /// random weights.
    pub weights: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// env_logger filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.tick_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.tick_rate",
                reason: "must be at least 1".into(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "logging.level",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// One-line description for the startup log.
    pub fn summary(&self) -> String {
        let limit = self
            .simulation
            .max_ticks
            .map_or("unbounded".to_string(), |n| format!("{} ticks", n));
        format!(
            "scenario {:?} at {} Hz, seed {}, {}",
            self.simulation.scenario, self.simulation.tick_rate, self.simulation.seed, limit
        )
    }

    /// Engine configuration derived from this file.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.simulation.seed,
            scenario: self.simulation.scenario,
            tick_rate: self.simulation.tick_rate,
            tunables: self.tunables.sanitized(),
            ..SimConfig::default()
        }
    }
}

/// Load and parse the configuration from `path`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    AppConfig::from_toml_str(&text)
}
