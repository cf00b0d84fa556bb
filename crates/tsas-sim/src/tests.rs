#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsas_classifier::{MlpClassifier, MlpWeights, PredictError, SeverityClassifier, SeverityResult};
    use tsas_core::commands::{ControlCommand, TunableParams};
    use tsas_core::constants::MAX_RANGE;
    use tsas_core::enums::{ScenarioId, Severity, ThreatPhase, ZoneAlert, ZoneTint};
    use tsas_core::events::SimEvent;
    use tsas_core::features::FeatureField;
    use tsas_core::types::{Position, ThreatId, Velocity};

    use crate::engine::{SharedClassifier, SimConfig, SimulationEngine};
    use crate::scenario::ThreatSpec;
    use crate::systems::alert::max_severity;

    /// Severity straight from the intent prior.
    struct IntentClassifier;

    impl SeverityClassifier for IntentClassifier {
        fn predict(&self, features: &[f32]) -> Result<SeverityResult, PredictError> {
            let intent = features[FeatureField::Intent as usize];
            let class = if intent > 0.7 {
                Severity::Critical
            } else if intent > 0.3 {
                Severity::Medium
            } else {
                Severity::Low
            };
            let mut probabilities = [0.0; 4];
            probabilities[class.index()] = 1.0;
            Ok(SeverityResult {
                class,
                probabilities,
            })
        }
    }

    /// Fails for high-intent threats only.
    struct HighIntentFaults;

    impl SeverityClassifier for HighIntentFaults {
        fn predict(&self, features: &[f32]) -> Result<SeverityResult, PredictError> {
            let intent = features[FeatureField::Intent as usize];
            if intent > 0.7 {
                return Err(PredictError::NonFinite {
                    field: FeatureField::Intent,
                    value: f32::NAN,
                });
            }
            IntentClassifier.predict(features)
        }
    }

    /// Equal probability for every class.
    struct UniformClassifier;

    impl SeverityClassifier for UniformClassifier {
        fn predict(&self, _features: &[f32]) -> Result<SeverityResult, PredictError> {
            Ok(SeverityResult {
                class: Severity::Low,
                probabilities: [0.25; 4],
            })
        }
    }

    fn engine_with(config: SimConfig, classifier: SharedClassifier) -> SimulationEngine {
        SimulationEngine::new(config, classifier)
    }

    fn standoff_engine() -> SimulationEngine {
        engine_with(SimConfig::default(), Arc::new(IntentClassifier))
    }

    /// Engine with the scenario cleared and stationary threats at the given
    /// (distance along x, intent) pairs.
    fn engine_with_threats(classifier: SharedClassifier, threats: &[(f64, f64)]) -> SimulationEngine {
        let mut engine = engine_with(SimConfig::default(), classifier);
        engine.clear_threats();
        for &(distance, intent) in threats {
            engine.spawn_threat(ThreatSpec::new(
                Position::new(distance, 0.0, 0.0),
                Velocity::zero(),
                intent,
                0.9,
            ));
        }
        engine
    }

    // ---- Construction ----

    #[test]
    fn test_standoff_spawns_three_threats() {
        let engine = standoff_engine();
        let states = engine.threat_states();
        assert_eq!(states.len(), 3);
        let ids: Vec<ThreatId> = states.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![ThreatId(1), ThreatId(2), ThreatId(3)]);
        assert!(states.iter().all(|s| s.is_active()));
        assert_eq!(states[0].position, Position::new(80.0, 0.0, 0.0));
        assert_eq!(states[0].priors.intent, 0.8);
    }

    #[test]
    fn test_first_snapshot_reports_spawn_events() {
        let mut engine = standoff_engine();
        let snapshot = engine.tick();
        let spawned = snapshot
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::ThreatSpawned { .. }))
            .count();
        assert_eq!(spawned, 3);

        let snapshot = engine.tick();
        assert!(snapshot.events.is_empty());
    }

    #[test]
    fn test_zone_center_offsets_spawn_positions() {
        let config = SimConfig {
            zone_center: Position::new(10.0, 0.0, 0.0),
            ..SimConfig::default()
        };
        let engine = engine_with(config, Arc::new(IntentClassifier));
        assert_eq!(engine.threat_states()[0].position, Position::new(90.0, 0.0, 0.0));
    }

    // ---- Tick ----

    #[test]
    fn test_three_threats_one_tick() {
        let mut engine =
            engine_with_threats(Arc::new(IntentClassifier), &[(15.0, 0.8), (50.0, 0.4), (90.0, 0.1)]);
        let snapshot = engine.tick();

        let t1 = &snapshot.threats[0];
        assert_eq!(t1.alert, ZoneAlert::ZoneBreach);
        assert!(!t1.active);
        assert_eq!(t1.phase, ThreatPhase::Breached);
        assert_eq!(t1.severity, Some(Severity::Critical));
        assert_eq!(t1.velocity, Velocity::zero());

        let t2 = &snapshot.threats[1];
        assert_eq!(t2.alert, ZoneAlert::Warning);
        assert_eq!(t2.severity, Some(Severity::Medium));

        let t3 = &snapshot.threats[2];
        assert_eq!(t3.alert, ZoneAlert::Safe);
        assert_eq!(t3.severity, Some(Severity::Low));

        assert_eq!(snapshot.global.severity, Severity::Critical);
        assert_eq!(snapshot.global.active_threats, 2);
        assert_eq!(snapshot.global.breached_threats, 1);
        assert!(snapshot
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::ZoneBreach { threat_id, .. } if *threat_id == t1.id)));
    }

    #[test]
    fn test_breached_threat_still_drives_global_alert() {
        let mut engine =
            engine_with_threats(Arc::new(IntentClassifier), &[(15.0, 0.8), (90.0, 0.1)]);
        engine.tick();
        for _ in 0..10 {
            let snapshot = engine.tick();
            assert_eq!(snapshot.global.severity, Severity::Critical);
            assert_eq!(snapshot.threats[0].distance, 15.0);
        }
    }

    #[test]
    fn test_breach_event_fires_once() {
        let mut engine = engine_with_threats(Arc::new(IntentClassifier), &[(10.0, 0.5)]);
        let breaches: usize = (0..5)
            .map(|_| {
                engine
                    .tick()
                    .events
                    .iter()
                    .filter(|e| matches!(e, SimEvent::ZoneBreach { .. }))
                    .count()
            })
            .sum();
        assert_eq!(breaches, 1);
    }

    #[test]
    fn test_standoff_lead_threat_breaches_at_tick_92() {
        let mut engine = standoff_engine();
        for _ in 0..91 {
            let snapshot = engine.tick();
            assert!(snapshot.threats[0].active);
        }
        let snapshot = engine.tick();
        assert!(!snapshot.threats[0].active);
        assert_eq!(snapshot.threats[0].alert, ZoneAlert::ZoneBreach);
    }

    #[test]
    fn test_classifier_fault_is_isolated() {
        let mut engine =
            engine_with_threats(Arc::new(HighIntentFaults), &[(50.0, 0.9), (90.0, 0.4)]);
        let snapshot = engine.tick();

        assert_eq!(snapshot.threats[0].severity, None);
        assert_eq!(snapshot.threats[0].severity_label, "UNKNOWN");
        assert_eq!(snapshot.threats[0].probabilities, None);
        assert_eq!(snapshot.threats[0].alert, ZoneAlert::Warning);

        assert_eq!(snapshot.threats[1].severity, Some(Severity::Medium));
        assert_eq!(snapshot.global.severity, Severity::Medium);
        assert_eq!(snapshot.global.faulted_threats, 1);
        assert!(snapshot
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::ClassifierFault { threat_id, .. } if *threat_id == ThreatId(4))));
    }

    #[test]
    fn test_global_alert_defaults_to_low_when_all_unknown() {
        let mut engine = engine_with_threats(Arc::new(HighIntentFaults), &[(50.0, 0.9)]);
        let snapshot = engine.tick();
        assert_eq!(snapshot.global.severity, Severity::Low);
        assert_eq!(engine.global_alert(), snapshot.global);
    }

    #[test]
    fn test_empty_world_is_low() {
        let mut engine = engine_with_threats(Arc::new(IntentClassifier), &[]);
        let snapshot = engine.tick();
        assert!(snapshot.threats.is_empty());
        assert_eq!(snapshot.global.severity, Severity::Low);
        assert_eq!(snapshot.global.threat_score, 0.0);
    }

    #[test]
    fn test_global_score_counts_recycled_replacement() {
        let mut engine = engine_with_threats(Arc::new(UniformClassifier), &[(20.0, 0.5)]);
        let mut spec = ThreatSpec::new(
            Position::new(MAX_RANGE - 0.1, 0.0, 0.0),
            Velocity::new(0.3, 0.0, 0.0),
            0.5,
            0.8,
        );
        spec.recyclable = true;
        engine.spawn_threat(spec);

        let snapshot = engine.tick();
        assert_eq!(snapshot.threats.len(), 2);
        // 0.625 base weight at distance 20: 0.625 * (1 - 20/120) * 100
        let scored = 0.625 * (1.0 - 20.0 / 120.0) * 100.0;
        assert!((snapshot.threats[0].threat_score - scored).abs() < 1e-4);
        assert_eq!(snapshot.threats[1].threat_score, 0.0);
        assert!((snapshot.global.threat_score - scored / 2.0).abs() < 1e-4);
        assert_eq!(snapshot.global.tint, ZoneTint::Calm);
    }

    #[test]
    fn test_global_score_leaves_out_faulted_threats() {
        let mut engine =
            engine_with_threats(Arc::new(HighIntentFaults), &[(20.0, 0.9), (60.0, 0.4)]);
        let snapshot = engine.tick();
        assert_eq!(snapshot.global.faulted_threats, 1);
        assert!((snapshot.global.threat_score - snapshot.threats[1].threat_score).abs() < 1e-9);

        // Breached on the faulting tick: frozen as unknown.
        assert!(!snapshot.threats[0].active);
        for _ in 0..3 {
            let later = engine.tick();
            assert_eq!(later.threats[0].severity, None);
            assert_eq!(later.global.faulted_threats, 1);
        }

        let mut engine = engine_with_threats(Arc::new(HighIntentFaults), &[(20.0, 0.9)]);
        assert_eq!(engine.tick().global.threat_score, 0.0);
    }

    #[test]
    fn test_nan_spawn_offset_reads_safe() {
        let mut engine = engine_with_threats(Arc::new(IntentClassifier), &[]);
        engine.spawn_threat(ThreatSpec::new(
            Position::new(f64::NAN, 0.0, 0.0),
            Velocity::zero(),
            0.5,
            0.8,
        ));
        let snapshot = engine.tick();
        assert_eq!(snapshot.threats[0].alert, ZoneAlert::Safe);
        assert!(snapshot.threats[0].active);
        assert!(snapshot.threats[0].distance.is_nan());
    }

    #[test]
    fn test_max_severity_ignores_unknown() {
        assert_eq!(
            max_severity([None, Some(Severity::High), Some(Severity::Medium)]),
            Severity::High
        );
        assert_eq!(max_severity([None, None]), Severity::Low);
    }

    #[test]
    fn test_tick_advances_time() {
        let mut engine = standoff_engine();
        let mut snapshot = engine.tick();
        for _ in 1..30 {
            snapshot = engine.tick();
        }
        assert_eq!(snapshot.time.tick, 30);
        assert!((snapshot.time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    // ---- Control ----

    #[test]
    fn test_pause_freezes_threats_and_time() {
        let mut engine = standoff_engine();
        let before = engine.tick();

        engine.queue_command(ControlCommand::Pause);
        let paused = engine.tick();
        assert!(!paused.running);
        assert_eq!(paused.time, before.time);
        assert_eq!(paused.threats[0].position, before.threats[0].position);

        engine.queue_command(ControlCommand::Resume);
        let resumed = engine.tick();
        assert!(resumed.running);
        assert_eq!(resumed.time.tick, before.time.tick + 1);
        assert!(resumed.threats[0].position.x < before.threats[0].position.x);
    }

    #[test]
    fn test_speed_scale_scales_displacement() {
        let mut engine = standoff_engine();
        engine.queue_command(ControlCommand::SetSpeedScale { value: 2.0 });
        let snapshot = engine.tick();
        let t1 = &snapshot.threats[0];
        assert!((t1.position.x - 78.8).abs() < 1e-9);
        assert!((t1.speed - 1.2).abs() < 1e-9);
        assert_eq!(t1.velocity, Velocity::new(-0.6, 0.0, 0.0));
    }

    #[test]
    fn test_speed_scale_is_clamped() {
        let mut engine = standoff_engine();
        engine.queue_command(ControlCommand::SetSpeedScale { value: 50.0 });
        assert_eq!(engine.tick().tunables.speed_scale, 2.0);
    }

    #[test]
    fn test_reset_respawns_with_new_ids() {
        let mut engine = standoff_engine();
        for _ in 0..10 {
            engine.tick();
        }
        engine.queue_command(ControlCommand::Reset);
        let snapshot = engine.tick();

        let ids: Vec<ThreatId> = snapshot.threats.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![ThreatId(4), ThreatId(5), ThreatId(6)]);
        // Reset lands before the tick's movement.
        assert!((snapshot.threats[0].position.x - 79.4).abs() < 1e-9);
        assert_eq!(
            snapshot
                .events
                .iter()
                .filter(|e| matches!(e, SimEvent::ThreatSpawned { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_intent_applies_to_new_spawns_only() {
        let config = SimConfig {
            scenario: ScenarioId::Intruders,
            ..SimConfig::default()
        };
        let mut engine = engine_with(config, Arc::new(IntentClassifier));
        engine.queue_commands([ControlCommand::Pause, ControlCommand::SetIntent { value: 0.9 }]);
        engine.tick();
        assert!(engine
            .threat_states()
            .iter()
            .all(|s| s.priors.intent == TunableParams::default().intent));

        engine.queue_command(ControlCommand::Reset);
        engine.tick();
        assert!(engine.threat_states().iter().all(|s| s.priors.intent == 0.9));
    }

    // ---- Intruders ----

    #[test]
    fn test_intruders_spawn_on_outer_ring() {
        let config = SimConfig {
            scenario: ScenarioId::Intruders,
            ..SimConfig::default()
        };
        let engine = engine_with(config, Arc::new(IntentClassifier));
        for state in engine.threat_states() {
            let range = state.position.range_to(&Position::default());
            assert!((range - MAX_RANGE).abs() < 1e-9);
            assert_eq!(state.position.y, 0.0);
        }
    }

    #[test]
    fn test_intruder_recycled_past_outer_ring() {
        let config = SimConfig {
            scenario: ScenarioId::Intruders,
            ..SimConfig::default()
        };
        let mut engine = engine_with(config, Arc::new(IntentClassifier));
        engine.clear_threats();
        let mut spec = ThreatSpec::new(
            Position::new(MAX_RANGE - 0.1, 0.0, 0.0),
            Velocity::new(0.3, 0.0, 0.0),
            0.5,
            0.8,
        );
        spec.recyclable = true;
        let id = engine.spawn_threat(spec);

        let snapshot = engine.tick();
        assert_eq!(snapshot.threats.len(), 1);
        assert_ne!(snapshot.threats[0].id, id);
        assert!(snapshot.events.iter().any(|e| matches!(
            e,
            SimEvent::ThreatRecycled { threat_id, .. } if *threat_id == id
        )));
    }

    #[test]
    fn test_non_recyclable_threat_stays_past_outer_ring() {
        let mut engine = engine_with_threats(Arc::new(IntentClassifier), &[]);
        let id = engine.spawn_threat(ThreatSpec::new(
            Position::new(MAX_RANGE + 10.0, 0.0, 0.0),
            Velocity::new(0.3, 0.0, 0.0),
            0.5,
            0.8,
        ));
        let snapshot = engine.tick();
        assert_eq!(snapshot.threats[0].id, id);
    }

    // ---- Determinism ----

    #[test]
    fn test_same_seed_same_run() {
        let classifier: SharedClassifier = match MlpClassifier::new(MlpWeights::seeded(7)) {
            Ok(c) => Arc::new(c),
            Err(e) => panic!("seeded weights must validate: {e}"),
        };
        let config = SimConfig {
            scenario: ScenarioId::Intruders,
            seed: 99,
            ..SimConfig::default()
        };
        let mut a = engine_with(config.clone(), classifier.clone());
        let mut b = engine_with(config, classifier);
        for _ in 0..200 {
            assert_eq!(a.tick(), b.tick());
        }
    }

    #[test]
    fn test_different_seed_different_intruders() {
        let make = |seed| {
            let config = SimConfig {
                scenario: ScenarioId::Intruders,
                seed,
                ..SimConfig::default()
            };
            engine_with(config, Arc::new(IntentClassifier)).threat_states()
        };
        assert_ne!(make(1)[0].position, make(2)[0].position);
    }

    // ---- Snapshot ----

    #[test]
    fn test_snapshot_serializes() {
        let mut engine = standoff_engine();
        let snapshot = engine.tick();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["scenario"], "standoff");
        assert_eq!(json["threats"].as_array().unwrap().len(), 3);
        assert_eq!(json["threats"][0]["severity_label"], "CRITICAL");
        assert_eq!(json["global"]["severity"], "Critical");
        assert_eq!(snapshot.global.headline(), "TSAS GLOBAL ALERT: CRITICAL");
    }
}
