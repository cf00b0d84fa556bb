//! Simulation snapshot: the complete visible state handed to a display surface each tick.

use serde::{Deserialize, Serialize};

use crate::commands::TunableParams;
use crate::constants::SEVERITY_CLASSES;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime, ThreatId, Velocity};

/// Complete simulation state broadcast after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub time: SimTime,
    pub running: bool,
    pub scenario: ScenarioId,
    pub tunables: TunableParams,
    /// Threats ordered by id (spawn order).
    pub threats: Vec<ThreatView>,
    pub global: GlobalAlertView,
    pub events: Vec<SimEvent>,
}

/// One threat as seen by the display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatView {
    pub id: ThreatId,
    pub position: Position,
    pub velocity: Velocity,
    /// Effective speed this tick (after speed scaling).
    pub speed: f64,
    /// Distance to the protected zone center.
    pub distance: f64,
    pub phase: ThreatPhase,
    pub active: bool,
    /// `None` when the last prediction failed.
    pub severity: Option<Severity>,
    pub severity_label: String,
    pub probabilities: Option<[f32; SEVERITY_CLASSES]>,
    pub alert: ZoneAlert,
    pub threat_score: f64,
}

impl ThreatView {
    /// Three-line caption shown next to the threat marker.
    pub fn caption(&self) -> String {
        format!(
            "{} | {}\nDist: {:.1}\n{}",
            self.id, self.severity_label, self.distance, self.alert
        )
    }
}

/// Label for a possibly-unknown severity.
pub fn severity_label(severity: Option<Severity>) -> &'static str {
    severity.map(Severity::label).unwrap_or("UNKNOWN")
}

/// Aggregate alert over every threat in the world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalAlertView {
    /// Highest known severity, `Low` when nothing reported higher.
    pub severity: Severity,
    /// Mean weighted threat score over scored threats.
    pub threat_score: f64,
    pub tint: ZoneTint,
    pub active_threats: u32,
    pub breached_threats: u32,
    /// Threats whose severity is currently unknown.
    pub faulted_threats: u32,
}

impl GlobalAlertView {
    pub fn headline(&self) -> String {
        format!("TSAS GLOBAL ALERT: {}", self.severity)
    }
}
