//! Command-line interface for the `tsas` binary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use tsas_classifier::{MlpClassifier, MlpWeights, ModelError};
use tsas_core::enums::ScenarioId;
use tsas_sim::engine::SharedClassifier;

use crate::config::AppConfig;

/// Threat severity assessment simulation. Writes one JSON snapshot per
/// tick to stdout and reads JSON control commands from stdin.
#[derive(Debug, Parser)]
#[command(name = "tsas")]
#[command(about = "Real-time threat severity assessment simulation")]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Trained weight artifact (JSON). Overrides `[model].weights`.
    #[arg(long)]
    pub weights: Option<PathBuf>,
    /// Threat set to spawn.
    #[arg(long, value_enum)]
    pub scenario: Option<ScenarioArg>,
    /// Ticks per second.
    #[arg(long)]
    pub tick_rate: Option<u32>,
    /// RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Stop after this many ticks.
    #[arg(long)]
    pub max_ticks: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioArg {
    Standoff,
    Intruders,
}

impl From<ScenarioArg> for ScenarioId {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Standoff => ScenarioId::Standoff,
            ScenarioArg::Intruders => ScenarioId::Intruders,
        }
    }
}

impl Cli {
    /// Overlay command-line values onto the file configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.weights {
            config.model.weights = Some(path.clone());
        }
        if let Some(scenario) = self.scenario {
            config.simulation.scenario = scenario.into();
        }
        if let Some(rate) = self.tick_rate {
            config.simulation.tick_rate = rate;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(limit) = self.max_ticks {
            config.simulation.max_ticks = Some(limit);
        }
    }
}

/// Load the classifier from an artifact, or fall back to seeded weights.
pub fn load_classifier(weights: Option<&Path>, seed: u64) -> Result<SharedClassifier, ModelError> {
    let classifier = match weights {
        Some(path) => MlpClassifier::load(path)?,
        None => {
            log::warn!("No weight artifact configured; using untrained weights (seed {})", seed);
            MlpClassifier::new(MlpWeights::seeded(seed))?
        }
    };
    Ok(Arc::new(classifier))
}
