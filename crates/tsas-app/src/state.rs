//! Messages shared between the control surface and the game loop thread.

use tsas_core::commands::ControlCommand;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// A control command to forward to the simulation engine.
    Control(ControlCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Why the game loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// `max_ticks` reached.
    TickLimit,
    /// `Shutdown` received.
    Shutdown,
    /// Every command sender was dropped.
    Disconnected,
}
