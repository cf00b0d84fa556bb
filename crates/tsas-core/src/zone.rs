//! Distance-based zone alert evaluator.

use crate::constants::{PROTECTED_RADIUS, SAFE_DISTANCE, WARNING_DISTANCE};
use crate::enums::ZoneAlert;

/// Proximity alert for a distance to the protected zone center.
///
/// Negative distances are clamped to zero.
pub fn distance_alert(distance: f64) -> ZoneAlert {
    debug_assert!(!distance.is_nan(), "distance must not be NaN");
    let distance = distance.max(0.0);
    if distance > SAFE_DISTANCE {
        ZoneAlert::Safe
    } else if distance > WARNING_DISTANCE {
        ZoneAlert::Warning
    } else if distance > PROTECTED_RADIUS {
        ZoneAlert::Danger
    } else {
        ZoneAlert::ZoneBreach
    }
}

/// Like `distance_alert`, but an undefined (NaN) distance reads as the default alert.
pub fn checked_alert(distance: f64) -> ZoneAlert {
    if distance.is_nan() {
        ZoneAlert::default()
    } else {
        distance_alert(distance)
    }
}

/// Whether a distance lies inside (or on the surface of) the protected zone.
pub fn is_breach(distance: f64) -> bool {
    distance <= PROTECTED_RADIUS
}
