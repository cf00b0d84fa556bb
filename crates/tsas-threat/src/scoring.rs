//! Weighted threat score and zone tint.
//!
//! A display signal alongside the severity class; it never feeds the
//! global alert.

use tsas_core::constants::{
    SEVERITY_CLASSES, THREAT_SCORE_CLASS_WEIGHTS, THREAT_SCORE_RANGE, ZONE_TINT_RED_SCORE,
    ZONE_TINT_YELLOW_SCORE,
};
use tsas_core::enums::ZoneTint;

/// Score in [0, 100] from class probabilities and distance to the zone.
pub fn threat_score(probabilities: &[f32; SEVERITY_CLASSES], distance: f64) -> f64 {
    let base: f64 = probabilities
        .iter()
        .zip(THREAT_SCORE_CLASS_WEIGHTS)
        .map(|(p, w)| *p as f64 * w)
        .sum();
    let distance_weight = (1.0 - distance / THREAT_SCORE_RANGE).max(0.0);
    (base * distance_weight * 100.0).min(100.0)
}

/// Mean of the given scores, 0 when empty.
pub fn global_threat_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

pub fn zone_tint(global_score: f64) -> ZoneTint {
    if global_score > ZONE_TINT_RED_SCORE {
        ZoneTint::Red
    } else if global_score > ZONE_TINT_YELLOW_SCORE {
        ZoneTint::Yellow
    } else {
        ZoneTint::Calm
    }
}
