//! Global alert: an explicit fold over current threat states.
//!
//! Nothing carries over between ticks: the result is recomputed from the
//! components every time.

use hecs::World;

use tsas_core::components::{ThreatAssessment, ThreatStatus};
use tsas_core::enums::{Severity, ThreatPhase};
use tsas_core::state::GlobalAlertView;
use tsas_threat::scoring::{global_threat_score, zone_tint};

/// Highest known severity, `Low` if none is known.
pub fn max_severity(severities: impl IntoIterator<Item = Option<Severity>>) -> Severity {
    severities
        .into_iter()
        .flatten()
        .fold(Severity::Low, Severity::max)
}

/// Fold every threat (active and breached) into the global alert view.
pub fn fold(world: &World) -> GlobalAlertView {
    let mut view = GlobalAlertView::default();
    let mut severities = Vec::new();
    let mut scores = Vec::new();

    for (_entity, (status, assessment)) in world
        .query::<(&ThreatStatus, &ThreatAssessment)>()
        .iter()
    {
        match status.phase {
            ThreatPhase::Active => view.active_threats += 1,
            ThreatPhase::Breached => view.breached_threats += 1,
        }
        if status.last_severity.is_none() {
            view.faulted_threats += 1;
        }
        severities.push(status.last_severity);
        // Unscored threats count as 0; faulted ones are left out.
        if status.last_severity.is_some() {
            scores.push(assessment.threat_score);
        }
    }

    view.severity = max_severity(severities);
    view.threat_score = global_threat_score(&scores);
    view.tint = zone_tint(view.threat_score);
    view
}
