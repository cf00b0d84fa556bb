//! Stdin control surface: one JSON `ControlCommand` per line.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread::JoinHandle;

use tsas_core::commands::ControlCommand;

use crate::error::AppError;
use crate::state::LoopCommand;

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ControlCommand>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Forward every valid command from `reader` until EOF or the loop goes away.
///
/// Malformed lines are logged and skipped. Returns the number forwarded.
pub fn forward_commands<R: BufRead>(reader: R, tx: &mpsc::Sender<LoopCommand>) -> usize {
    let mut forwarded = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Stopped reading control input: {}", e);
                break;
            }
        };
        match parse_command(&line) {
            Ok(Some(cmd)) => {
                log::debug!("Control line {}: {:?}", index + 1, cmd);
                if tx.send(LoopCommand::Control(cmd)).is_err() {
                    break;
                }
                forwarded += 1;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Skipping control line {}: {}", index + 1, e),
        }
    }
    forwarded
}

/// Read commands from stdin on a background thread.
///
/// EOF ends the reader only; the game loop keeps running.
pub fn spawn_stdin_reader(tx: mpsc::Sender<LoopCommand>) -> Result<JoinHandle<()>, AppError> {
    std::thread::Builder::new()
        .name("tsas-stdin".into())
        .spawn(move || {
            let count = forward_commands(io::stdin().lock(), &tx);
            log::debug!("Control input closed after {} commands", count);
        })
        .map_err(|source| AppError::Spawn {
            name: "stdin reader",
            source,
        })
}
