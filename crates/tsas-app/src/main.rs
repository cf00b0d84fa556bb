use std::io;

use clap::Parser;

use tsas_app::cli::{load_classifier, Cli};
use tsas_app::config::{load_config, AppConfig};
use tsas_app::control;
use tsas_app::error::AppError;
use tsas_app::game_loop::{self, LoopSettings};
use tsas_app::state::LoopExit;

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tsas: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    // Config is read before the logger exists, so report it now.
    match &cli.config {
        Some(path) => log::info!("Loaded config from {:?}: {}", path, config.summary()),
        None => log::info!("Using default config: {}", config.summary()),
    }

    match run(config) {
        Ok(exit) => log::info!("Simulation stopped: {:?}", exit),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn build_config(cli: &Cli) -> Result<AppConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(config: AppConfig) -> Result<LoopExit, AppError> {
    log::info!("Starting TSAS simulation");

    let classifier = load_classifier(config.model.weights.as_deref(), config.simulation.seed)?;

    let settings = LoopSettings {
        sim: config.sim_config(),
        max_ticks: config.simulation.max_ticks,
    };
    let (cmd_tx, handle) = game_loop::spawn_game_loop(settings, classifier, io::stdout())?;

    // Detached: a blocked stdin read must not hold up exit.
    control::spawn_stdin_reader(cmd_tx.clone())?;

    handle.join().map_err(|_| AppError::LoopPanicked)?
}
