//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SEVERITY_CLASSES;

/// Severity class produced by the classifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; SEVERITY_CLASSES] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Map a class index (0..=3) to a severity.
    pub fn from_index(index: usize) -> Option<Severity> {
        Self::ALL.get(index).copied()
    }

    /// Class index (0..=3).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-case display label.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distance-based proximity alert, independent of the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoneAlert {
    #[default]
    Safe,
    Warning,
    Danger,
    ZoneBreach,
}

impl ZoneAlert {
    pub fn label(self) -> &'static str {
        match self {
            ZoneAlert::Safe => "SAFE",
            ZoneAlert::Warning => "WARNING",
            ZoneAlert::Danger => "DANGER",
            ZoneAlert::ZoneBreach => "ZONE BREACH",
        }
    }
}

impl fmt::Display for ZoneAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threat lifecycle. `Breached` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatPhase {
    /// Moving and scored every tick.
    #[default]
    Active,
    /// Reached the protected zone. Frozen.
    Breached,
}

/// Threat set spawned at start and on reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    /// Three fixed inbound threats.
    #[default]
    Standoff,
    /// Three random intruders on the outer ring, recycled when out of range.
    Intruders,
}

/// Colour band of the protected zone, driven by the global threat score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneTint {
    #[default]
    Calm,
    Yellow,
    Red,
}
