//! Events emitted by the simulation for display and operator feedback.

use serde::{Deserialize, Serialize};

use crate::enums::Severity;
use crate::types::ThreatId;

/// Per-tick notable occurrences, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A threat entered the world.
    ThreatSpawned { threat_id: ThreatId },
    /// A threat reached the protected zone and froze.
    ZoneBreach {
        threat_id: ThreatId,
        distance: f64,
        severity: Option<Severity>,
    },
    /// Scoring failed for one threat this tick; its severity is unknown.
    ClassifierFault { threat_id: ThreatId, reason: String },
    /// An intruder left the outer ring and was replaced.
    ThreatRecycled {
        threat_id: ThreatId,
        replacement: ThreatId,
    },
}
