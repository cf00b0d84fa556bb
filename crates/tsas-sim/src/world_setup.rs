//! Entity spawn factories for populating the simulation world.

use hecs::{Entity, EntityBuilder, World};

use tsas_core::components::{Recyclable, ThreatAssessment, ThreatStatus};
use tsas_core::events::SimEvent;
use tsas_core::types::{Position, ThreatId};
use tsas_core::zone::checked_alert;

use crate::scenario::ThreatSpec;

/// Spawn one threat with its full component bundle.
///
/// The assessment is seeded with the spawn distance so an unticked
/// snapshot already shows where the threat is.
pub fn spawn_threat(
    world: &mut World,
    next_threat_id: &mut u32,
    spec: &ThreatSpec,
    zone_center: &Position,
    events: &mut Vec<SimEvent>,
) -> (Entity, ThreatId) {
    *next_threat_id += 1;
    let id = ThreatId(*next_threat_id);

    let position: Position = (zone_center.as_dvec3() + spec.offset.as_dvec3()).into();
    let distance = position.range_to(zone_center);
    let assessment = ThreatAssessment {
        distance,
        alert: checked_alert(distance),
        probabilities: None,
        threat_score: 0.0,
    };

    let mut builder = EntityBuilder::new();
    builder
        .add(id)
        .add(position)
        .add(spec.velocity)
        .add(spec.priors)
        .add(ThreatStatus::default())
        .add(assessment);
    if spec.recyclable {
        builder.add(Recyclable);
    }
    let entity = world.spawn(builder.build());

    log::debug!("Spawned {} at distance {:.1}", id, distance);
    events.push(SimEvent::ThreatSpawned { threat_id: id });
    (entity, id)
}

/// Spawn every threat in `specs`, in order.
pub fn spawn_threats(
    world: &mut World,
    next_threat_id: &mut u32,
    specs: &[ThreatSpec],
    zone_center: &Position,
    events: &mut Vec<SimEvent>,
) -> Vec<ThreatId> {
    specs
        .iter()
        .map(|spec| spawn_threat(world, next_threat_id, spec, zone_center, events).1)
        .collect()
}

/// Despawn every threat entity.
pub fn clear_threats(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&ThreatId>().into_iter().map(|(e, _)| e));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
