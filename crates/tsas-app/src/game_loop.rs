//! Game loop thread: runs the simulation engine at a fixed rate and
//! writes one JSON snapshot per line.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via `mpsc` channel and are drained before every tick.

use std::io::Write;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tsas_sim::engine::SharedClassifier;
use tsas_sim::{SimConfig, SimulationEngine};

use crate::error::AppError;
use crate::state::{LoopCommand, LoopExit};

/// Duration of one tick at `tick_rate` ticks per second.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Everything the loop thread needs to build and drive its engine.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub sim: SimConfig,
    /// Stop after this many ticks. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
}

pub type LoopHandle = JoinHandle<Result<LoopExit, AppError>>;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the control surface, and the join handle.
pub fn spawn_game_loop<W>(
    settings: LoopSettings,
    classifier: SharedClassifier,
    out: W,
) -> Result<(mpsc::Sender<LoopCommand>, LoopHandle), AppError>
where
    W: Write + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("tsas-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(settings.sim, classifier);
            run_game_loop(engine, cmd_rx, out, settings.max_ticks)
        })
        .map_err(|source| AppError::Spawn {
            name: "game loop",
            source,
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until `max_ticks`, Shutdown, or channel disconnect.
pub fn run_game_loop<W: Write>(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    mut out: W,
    max_ticks: Option<u64>,
) -> Result<LoopExit, AppError> {
    let tick_duration = tick_duration(engine.tick_rate());
    let mut next_tick_time = Instant::now();
    let mut ticks: u64 = 0;

    log::info!(
        "Game loop started at {} Hz{}",
        engine.tick_rate(),
        max_ticks.map_or(String::new(), |n| format!(", stopping after {} ticks", n))
    );

    loop {
        if max_ticks.is_some_and(|limit| ticks >= limit) {
            return Ok(LoopExit::TickLimit);
        }

        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Control(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => return Ok(LoopExit::Shutdown),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return Ok(LoopExit::Disconnected),
            }
        }

        // 2. Advance one tick (engine handles pause internally)
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Emit snapshot as one JSON line
        serde_json::to_writer(&mut out, &snapshot)?;
        out.write_all(b"\n")?;
        out.flush()?;

        // 4. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            log::debug!("Game loop fell behind by {:?}", now - next_tick_time);
            next_tick_time = now;
        }
    }
}
