//! Scoring system: advances and classifies every threat once per tick.
//!
//! Threats are updated sequentially in id order. Each update reads only its
//! own components, so no threat observes another's mid-tick state.

use hecs::{Entity, World};

use tsas_classifier::SeverityClassifier;
use tsas_core::components::{ThreatAssessment, ThreatPriors, ThreatStatus};
use tsas_core::events::SimEvent;
use tsas_core::types::{Position, ThreatId, Velocity};
use tsas_threat::fsm::{ThreatState, TickContext};

/// Run one scoring pass over all threats.
///
/// `order_buffer` is scratch space reused across ticks.
pub fn run<C>(
    world: &mut World,
    ctx: &TickContext,
    classifier: &C,
    order_buffer: &mut Vec<(ThreatId, Entity)>,
    events: &mut Vec<SimEvent>,
) where
    C: SeverityClassifier + ?Sized,
{
    order_buffer.clear();
    order_buffer.extend(
        world
            .query_mut::<&ThreatId>()
            .into_iter()
            .map(|(entity, id)| (*id, entity)),
    );
    order_buffer.sort_unstable_by_key(|(id, _)| *id);

    for &(id, entity) in order_buffer.iter() {
        let Ok((position, velocity, priors, status, assessment)) = world.query_one_mut::<(
            &mut Position,
            &mut Velocity,
            &ThreatPriors,
            &mut ThreatStatus,
            &mut ThreatAssessment,
        )>(entity) else {
            continue;
        };

        let mut state = ThreatState {
            id,
            position: *position,
            velocity: *velocity,
            priors: *priors,
            status: *status,
        };
        let Some(report) = state.update(ctx, classifier) else {
            continue;
        };

        *position = state.position;
        *velocity = state.velocity;
        *status = state.status;
        *assessment = report.assessment;

        log::trace!(
            "{} dist={:.2} severity={:?} alert={}",
            id,
            report.assessment.distance,
            state.status.last_severity,
            report.assessment.alert
        );

        if let Some(fault) = report.fault {
            events.push(SimEvent::ClassifierFault {
                threat_id: id,
                reason: fault.to_string(),
            });
        }
        if report.breached {
            events.push(SimEvent::ZoneBreach {
                threat_id: id,
                distance: report.assessment.distance,
                severity: state.status.last_severity,
            });
        }
    }
}
