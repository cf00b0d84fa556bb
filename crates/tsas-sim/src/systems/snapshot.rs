//! Snapshot system: queries the ECS world and builds a complete SimulationSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use tsas_core::commands::TunableParams;
use tsas_core::components::{ThreatAssessment, ThreatStatus};
use tsas_core::enums::ScenarioId;
use tsas_core::events::SimEvent;
use tsas_core::state::{severity_label, SimulationSnapshot, ThreatView};
use tsas_core::types::{Position, SimTime, ThreatId, Velocity};

use crate::systems::alert;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    scenario: ScenarioId,
    tunables: &TunableParams,
    events: Vec<SimEvent>,
) -> SimulationSnapshot {
    SimulationSnapshot {
        time: *time,
        running: tunables.running,
        scenario,
        tunables: *tunables,
        threats: build_threats(world, tunables.speed_scale),
        global: alert::fold(world),
        events,
    }
}

/// Build ThreatView list ordered by id.
fn build_threats(world: &World, speed_scale: f64) -> Vec<ThreatView> {
    let mut threats: Vec<ThreatView> = world
        .query::<(
            &ThreatId,
            &Position,
            &Velocity,
            &ThreatStatus,
            &ThreatAssessment,
        )>()
        .iter()
        .map(|(_, (id, pos, vel, status, assessment))| ThreatView {
            id: *id,
            position: *pos,
            velocity: *vel,
            speed: vel.speed() * speed_scale,
            distance: assessment.distance,
            phase: status.phase,
            active: status.is_active(),
            severity: status.last_severity,
            severity_label: severity_label(status.last_severity).to_string(),
            probabilities: assessment.probabilities,
            alert: assessment.alert,
            threat_score: assessment.threat_score,
        })
        .collect();

    threats.sort_by_key(|t| t.id);
    threats
}
