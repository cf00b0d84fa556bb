//! Feature vector builder.
//!
//! Derives the fixed five-scalar classifier input from a threat's
//! kinematic state and priors. Total and side-effect free.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DIRECTION_FLAG, DISTANCE_NORMALIZER, FEATURE_COUNT};
use crate::types::{Position, Velocity};

/// Slot names of the feature vector, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureField {
    NormDistance,
    SpeedMagnitude,
    DirectionFlag,
    Intent,
    Signal,
}

impl FeatureField {
    pub const ALL: [FeatureField; FEATURE_COUNT] = [
        FeatureField::NormDistance,
        FeatureField::SpeedMagnitude,
        FeatureField::DirectionFlag,
        FeatureField::Intent,
        FeatureField::Signal,
    ];

    pub fn from_index(index: usize) -> Option<FeatureField> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            FeatureField::NormDistance => "norm_distance",
            FeatureField::SpeedMagnitude => "speed_magnitude",
            FeatureField::DirectionFlag => "direction_flag",
            FeatureField::Intent => "intent",
            FeatureField::Signal => "signal",
        }
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifier input for one threat on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// `min(distance / 100, 1)`.
    pub norm_distance: f32,
    pub speed_magnitude: f32,
    /// Always `DIRECTION_FLAG` in the simulation.
    pub direction_flag: f32,
    pub intent: f32,
    pub signal: f32,
}

impl FeatureVector {
    /// Build the vector for a threat at `position` moving at `velocity`
    /// (already speed-scaled) relative to `zone_center`.
    pub fn build(
        position: &Position,
        velocity: &Velocity,
        intent: f64,
        signal: f64,
        zone_center: &Position,
    ) -> Self {
        let distance = position.range_to(zone_center);
        Self {
            norm_distance: normalized_distance(distance) as f32,
            speed_magnitude: velocity.speed() as f32,
            direction_flag: DIRECTION_FLAG,
            intent: intent as f32,
            signal: signal as f32,
        }
    }

    pub fn to_array(&self) -> [f32; FEATURE_COUNT] {
        [
            self.norm_distance,
            self.speed_magnitude,
            self.direction_flag,
            self.intent,
            self.signal,
        ]
    }
}

/// Clamped proximity ratio: `min(distance / 100, 1)`, floored at 0.
pub fn normalized_distance(distance: f64) -> f64 {
    (distance / DISTANCE_NORMALIZER).clamp(0.0, 1.0)
}
