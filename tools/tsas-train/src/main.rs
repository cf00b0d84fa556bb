//! tsas-train: synthetic dataset generator and severity network trainer.
//!
//! Usage:
//!   tsas-train generate --samples 2000 --seed 42 --output data.jsonl
//!   tsas-train train --data data.jsonl --output weights.json

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use tsas_core::enums::Severity;
use tsas_train::dataset::{self, class_counts};
use tsas_train::train::{train, TrainConfig};
use tsas_train::TrainError;

/// Training tooling for the TSAS severity network.
#[derive(Debug, Parser)]
#[command(name = "tsas-train")]
#[command(about = "Generate labelled threat data and train the severity network")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a rule-labelled synthetic dataset as JSON lines.
    Generate {
        #[arg(long, default_value_t = 2000)]
        samples: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value = "data.jsonl")]
        output: PathBuf,
    },
    /// Train the network on a dataset and write the weight artifact.
    Train {
        #[arg(long, default_value = "data.jsonl")]
        data: PathBuf,
        #[arg(long, default_value = "weights.json")]
        output: PathBuf,
        /// Also write the fitted min-max bounds here.
        #[arg(long)]
        scaler: Option<PathBuf>,
        #[arg(long, default_value_t = 30)]
        epochs: usize,
        #[arg(long, default_value_t = 32)]
        batch_size: usize,
        #[arg(long, default_value_t = 0.01)]
        learning_rate: f32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate {
            samples,
            seed,
            output,
        } => cmd_generate(samples, seed, &output),
        Command::Train {
            data,
            output,
            scaler,
            epochs,
            batch_size,
            learning_rate,
            seed,
        } => {
            let config = TrainConfig {
                epochs,
                batch_size,
                learning_rate,
                seed,
                ..TrainConfig::default()
            };
            cmd_train(&data, &output, scaler.as_deref(), &config)
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn cmd_generate(count: usize, seed: u64, output: &Path) -> Result<(), TrainError> {
    let samples = dataset::generate(count, seed);
    dataset::write_jsonl(output, &samples)?;

    let counts = class_counts(&samples);
    log::info!("Wrote {} samples to {:?}", samples.len(), output);
    for severity in Severity::ALL {
        log::info!("  {:<8} {}", severity.label(), counts[severity.index()]);
    }
    Ok(())
}

fn cmd_train(
    data: &Path,
    output: &Path,
    scaler_path: Option<&Path>,
    config: &TrainConfig,
) -> Result<(), TrainError> {
    let samples = dataset::read_jsonl(data)?;
    let outcome = train(&samples, config)?;

    outcome.weights.save(output)?;
    log::info!("Wrote weight artifact to {:?}", output);

    if let Some(path) = scaler_path {
        let json = serde_json::to_string_pretty(&outcome.scaler)?;
        fs::write(path, json).map_err(|source| TrainError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Wrote scaler bounds to {:?}", path);
    }
    Ok(())
}
