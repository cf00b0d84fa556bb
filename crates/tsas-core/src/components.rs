//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behaviour.
//! Threat logic lives in tsas-threat, not here.

use serde::{Deserialize, Serialize};

use crate::constants::SEVERITY_CLASSES;
use crate::enums::{Severity, ThreatPhase, ZoneAlert};

/// Behavioural priors fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatPriors {
    /// Hostile-intent prior in [0, 1].
    pub intent: f64,
    /// Signal-strength prior in [0, 1].
    pub signal: f64,
}

/// Lifecycle and last classifier verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatStatus {
    pub phase: ThreatPhase,
    /// Last computed severity. `None` means the last prediction failed.
    pub last_severity: Option<Severity>,
}

impl Default for ThreatStatus {
    fn default() -> Self {
        Self {
            phase: ThreatPhase::Active,
            last_severity: Some(Severity::Low),
        }
    }
}

impl ThreatStatus {
    pub fn is_active(&self) -> bool {
        self.phase == ThreatPhase::Active
    }
}

/// Display-facing outputs of the most recent scoring pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatAssessment {
    /// Distance to the protected zone center.
    pub distance: f64,
    pub alert: ZoneAlert,
    /// Class probabilities, absent after a failed prediction.
    pub probabilities: Option<[f32; SEVERITY_CLASSES]>,
    /// Weighted threat score in [0, 100].
    pub threat_score: f64,
}

/// Marks threats that are recycled when they leave the outer ring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Recyclable;
