//! Threat state machine.
//!
//! One `update` per tick: integrate position, score the new state with the
//! classifier, evaluate the zone alert, and freeze on breach. BREACHED is
//! terminal; updating a breached threat changes nothing.

use tsas_classifier::{PredictError, SeverityClassifier};
use tsas_core::components::{ThreatAssessment, ThreatPriors, ThreatStatus};
use tsas_core::enums::{Severity, ThreatPhase};
use tsas_core::features::FeatureVector;
use tsas_core::types::{Position, ThreatId, Velocity};
use tsas_core::zone::{checked_alert, is_breach};

use crate::scoring::threat_score;

/// Read-once view of the world shared by every threat in a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub zone_center: Position,
    /// Multiplier applied to every threat's displacement this tick.
    pub speed_scale: f64,
}

impl Default for TickContext {
    fn default() -> Self {
        Self {
            zone_center: Position::default(),
            speed_scale: 1.0,
        }
    }
}

/// Everything one threat owns.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatState {
    pub id: ThreatId,
    pub position: Position,
    pub velocity: Velocity,
    pub priors: ThreatPriors,
    pub status: ThreatStatus,
}

/// Outcome of one update on an active threat.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatReport {
    pub assessment: ThreatAssessment,
    /// Effective speed used for the feature vector.
    pub speed: f64,
    /// Set when the classifier rejected this tick's features.
    pub fault: Option<PredictError>,
    /// True only on the tick the threat entered the zone.
    pub breached: bool,
}

impl ThreatState {
    pub fn new(id: ThreatId, position: Position, velocity: Velocity, priors: ThreatPriors) -> Self {
        Self {
            id,
            position,
            velocity,
            priors,
            status: ThreatStatus::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn last_severity(&self) -> Option<Severity> {
        self.status.last_severity
    }

    /// Advance one tick. Returns `None` for a breached threat.
    pub fn update<C>(&mut self, ctx: &TickContext, classifier: &C) -> Option<ThreatReport>
    where
        C: SeverityClassifier + ?Sized,
    {
        if !self.is_active() {
            return None;
        }

        self.position = self.position.advanced(&self.velocity, ctx.speed_scale);
        let effective_velocity = self.velocity.scaled(ctx.speed_scale);
        let distance = self.position.range_to(&ctx.zone_center);

        let features = FeatureVector::build(
            &self.position,
            &effective_velocity,
            self.priors.intent,
            self.priors.signal,
            &ctx.zone_center,
        );

        let (probabilities, fault) = match classifier.classify(&features) {
            Ok(result) => {
                self.status.last_severity = Some(result.class);
                (Some(result.probabilities), None)
            }
            Err(err) => {
                log::warn!("{}: severity unknown this tick: {}", self.id, err);
                self.status.last_severity = None;
                (None, Some(err))
            }
        };

        let alert = checked_alert(distance);
        let breached = is_breach(distance);
        if breached {
            self.velocity = Velocity::zero();
            self.status.phase = ThreatPhase::Breached;
            log::info!(
                "{} breached the protected zone at distance {:.1} (severity {})",
                self.id,
                distance,
                tsas_core::state::severity_label(self.status.last_severity)
            );
        }

        Some(ThreatReport {
            assessment: ThreatAssessment {
                distance,
                alert,
                probabilities,
                threat_score: probabilities.map_or(0.0, |p| threat_score(&p, distance)),
            },
            speed: effective_velocity.speed(),
            fault,
            breached,
        })
    }
}
