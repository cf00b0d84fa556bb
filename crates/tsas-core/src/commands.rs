//! Control commands sent from a control surface to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INTENT, DEFAULT_SIGNAL, SPEED_SCALE_MAX, SPEED_SCALE_MIN};

/// All live control actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlCommand {
    /// Hostile-intent prior for threats spawned from now on.
    SetIntent { value: f64 },
    /// Signal-strength prior for threats spawned from now on.
    SetSignal { value: f64 },
    /// Multiplier on every threat's per-tick displacement.
    SetSpeedScale { value: f64 },
    /// Stop advancing threats.
    Pause,
    /// Resume advancing threats.
    Resume,
    /// Replace every threat with a fresh copy of the scenario's threat set.
    Reset,
}

/// Live-tunable parameters. One copy is taken per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunableParams {
    pub intent: f64,
    pub signal: f64,
    pub speed_scale: f64,
    pub running: bool,
}

impl Default for TunableParams {
    fn default() -> Self {
        Self {
            intent: DEFAULT_INTENT,
            signal: DEFAULT_SIGNAL,
            speed_scale: 1.0,
            running: true,
        }
    }
}

impl TunableParams {
    /// Clamp every field into its legal range. Non-finite values fall back to defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            intent: clamp_or(self.intent, 0.0, 1.0, defaults.intent),
            signal: clamp_or(self.signal, 0.0, 1.0, defaults.signal),
            speed_scale: clamp_or(
                self.speed_scale,
                SPEED_SCALE_MIN,
                SPEED_SCALE_MAX,
                defaults.speed_scale,
            ),
            running: self.running,
        }
    }

    /// Apply a command that touches tunables. Returns false for commands it does not own.
    pub fn apply(&mut self, command: &ControlCommand) -> bool {
        match *command {
            ControlCommand::SetIntent { value } => self.intent = value,
            ControlCommand::SetSignal { value } => self.signal = value,
            ControlCommand::SetSpeedScale { value } => self.speed_scale = value,
            ControlCommand::Pause => self.running = false,
            ControlCommand::Resume => self.running = true,
            ControlCommand::Reset => return false,
        }
        *self = self.sanitized();
        true
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
