//! Recycling system: replaces intruders that drifted past the outer ring.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use tsas_core::commands::TunableParams;
use tsas_core::components::{Recyclable, ThreatAssessment, ThreatStatus};
use tsas_core::constants::MAX_RANGE;
use tsas_core::events::SimEvent;
use tsas_core::types::{Position, ThreatId};

use crate::scenario::random_intruder;
use crate::world_setup::spawn_threat;

/// Despawn active recyclable threats beyond `MAX_RANGE` and spawn a
/// fresh random intruder for each.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tunables: &TunableParams,
    zone_center: &Position,
    next_threat_id: &mut u32,
    events: &mut Vec<SimEvent>,
) {
    let mut expired: Vec<(Entity, ThreatId)> = world
        .query_mut::<(&ThreatId, &ThreatStatus, &ThreatAssessment, &Recyclable)>()
        .into_iter()
        .filter(|(_, (_, status, assessment, _))| {
            status.is_active() && assessment.distance > MAX_RANGE
        })
        .map(|(entity, (id, ..))| (entity, *id))
        .collect();
    expired.sort_unstable_by_key(|(_, id)| *id);

    for (entity, id) in expired {
        let _ = world.despawn(entity);
        let spec = random_intruder(rng, tunables);
        let (_, replacement) = spawn_threat(world, next_threat_id, &spec, zone_center, events);
        log::debug!("{} left the outer ring, replaced by {}", id, replacement);
        events.push(SimEvent::ThreatRecycled {
            threat_id: id,
            replacement,
        });
    }
}
