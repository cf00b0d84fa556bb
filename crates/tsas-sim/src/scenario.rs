//! Scenario definitions: the threat sets spawned at start and on reset.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tsas_core::commands::TunableParams;
use tsas_core::components::ThreatPriors;
use tsas_core::constants::{INTRUDER_MAX_AXIS_SPEED, MAX_RANGE, SCENARIO_THREAT_COUNT};
use tsas_core::enums::ScenarioId;
use tsas_core::types::{Position, Velocity};

/// Initial state of one threat, relative to the zone center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatSpec {
    pub offset: Position,
    pub velocity: Velocity,
    pub priors: ThreatPriors,
    /// Replaced by a fresh random intruder when it leaves the outer ring.
    pub recyclable: bool,
}

impl ThreatSpec {
    pub fn new(offset: Position, velocity: Velocity, intent: f64, signal: f64) -> Self {
        Self {
            offset,
            velocity,
            priors: ThreatPriors { intent, signal },
            recyclable: false,
        }
    }
}

/// Threat set for a scenario.
pub fn build_threats(
    scenario: ScenarioId,
    rng: &mut ChaCha8Rng,
    tunables: &TunableParams,
) -> Vec<ThreatSpec> {
    match scenario {
        ScenarioId::Standoff => standoff(),
        ScenarioId::Intruders => (0..SCENARIO_THREAT_COUNT)
            .map(|_| random_intruder(rng, tunables))
            .collect(),
    }
}

/// Standoff: three inbound threats on distinct axes with fixed priors.
fn standoff() -> Vec<ThreatSpec> {
    vec![
        ThreatSpec::new(
            Position::new(80.0, 0.0, 0.0),
            Velocity::new(-0.6, 0.0, 0.0),
            0.8,
            0.9,
        ),
        ThreatSpec::new(
            Position::new(-90.0, 20.0, 10.0),
            Velocity::new(0.5, -0.1, -0.05),
            0.4,
            0.8,
        ),
        ThreatSpec::new(
            Position::new(0.0, -85.0, -20.0),
            Velocity::new(0.0, 0.6, 0.1),
            0.6,
            0.85,
        ),
    ]
}

/// An intruder on the outer ring (XZ plane) drifting with a random velocity.
/// Priors come from the current tunables.
pub fn random_intruder(rng: &mut ChaCha8Rng, tunables: &TunableParams) -> ThreatSpec {
    let angle = rng.gen_range(0.0..TAU);
    let offset = DVec3::new(angle.cos() * MAX_RANGE, 0.0, angle.sin() * MAX_RANGE);
    let velocity = DVec3::new(
        rng.gen_range(-INTRUDER_MAX_AXIS_SPEED..INTRUDER_MAX_AXIS_SPEED),
        0.0,
        rng.gen_range(-INTRUDER_MAX_AXIS_SPEED..INTRUDER_MAX_AXIS_SPEED),
    );

    ThreatSpec {
        offset: offset.into(),
        velocity: velocity.into(),
        priors: ThreatPriors {
            intent: tunables.intent,
            signal: tunables.signal,
        },
        recyclable: true,
    }
}
