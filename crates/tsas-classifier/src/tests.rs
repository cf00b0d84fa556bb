#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use tsas_core::constants::{FEATURE_COUNT, NETWORK_LAYOUT, SEVERITY_CLASSES};
    use tsas_core::enums::Severity;
    use tsas_core::features::{FeatureField, FeatureVector};

    use crate::classifier::{MlpClassifier, SeverityClassifier};
    use crate::error::{ModelError, PredictError};
    use crate::model::{argmax, softmax, DenseLayer, MlpWeights};

    fn zero_weights_with_output_bias(bias: [f32; SEVERITY_CLASSES]) -> MlpWeights {
        let mut weights = MlpWeights::seeded(0);
        for layer in &mut weights.layers {
            for row in &mut layer.weights {
                row.iter_mut().for_each(|w| *w = 0.0);
            }
            layer.bias.iter_mut().for_each(|b| *b = 0.0);
        }
        weights.layers[2].bias = bias.to_vec();
        weights
    }

    fn sample_inputs() -> Vec<[f32; FEATURE_COUNT]> {
        let mut inputs = Vec::new();
        for d in [0.0, 0.15, 0.5, 0.9, 1.0] {
            for speed in [0.0, 0.6, 2.5] {
                for intent in [0.1, 0.4, 0.8] {
                    inputs.push([d, speed, 1.0, intent, 0.85]);
                }
            }
        }
        inputs
    }

    // ---- Weights ----

    #[test]
    fn test_seeded_weights_match_layout() {
        let weights = MlpWeights::seeded(42);
        assert_eq!(weights.layers.len(), NETWORK_LAYOUT.len() - 1);
        for (layer, dims) in weights.layers.iter().zip(NETWORK_LAYOUT.windows(2)) {
            assert_eq!(layer.inputs(), dims[0]);
            assert_eq!(layer.outputs(), dims[1]);
            assert_eq!(layer.bias.len(), dims[1]);
        }
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_seeded_weights_deterministic() {
        assert_eq!(MlpWeights::seeded(7), MlpWeights::seeded(7));
        assert_ne!(MlpWeights::seeded(7), MlpWeights::seeded(8));
    }

    #[test]
    fn test_layer_count_mismatch_rejected() {
        let mut weights = MlpWeights::seeded(1);
        weights.layers.pop();
        assert!(matches!(
            MlpClassifier::new(weights),
            Err(ModelError::LayerCount {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_weight_shape_mismatch_rejected() {
        let mut weights = MlpWeights::seeded(1);
        weights.layers[1].weights[3].push(0.5);
        let err = weights.validate().unwrap_err();
        assert!(
            matches!(err, ModelError::WeightShape { layer: 1, got_in: 17, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_bias_shape_mismatch_rejected() {
        let mut weights = MlpWeights::seeded(1);
        weights.layers[2].bias.push(0.0);
        assert!(matches!(
            weights.validate(),
            Err(ModelError::BiasShape {
                layer: 2,
                expected: 4,
                got: 5
            })
        ));
    }

    #[test]
    fn test_non_finite_parameter_rejected() {
        let mut weights = MlpWeights::seeded(1);
        weights.layers[0].weights[0][0] = f32::NAN;
        assert!(matches!(
            MlpClassifier::new(weights),
            Err(ModelError::NonFinite { layer: 0 })
        ));
    }

    // ---- Artifact loading ----

    #[test]
    fn test_artifact_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");
        let weights = MlpWeights::seeded(3);
        weights.save(&path).unwrap();

        let classifier = MlpClassifier::load(&path).unwrap();
        assert_eq!(classifier.weights(), &weights);
    }

    #[test]
    fn test_missing_artifact_is_io_error() {
        let err = MlpClassifier::load(Path::new("/nonexistent/tsas/weights.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn test_corrupt_artifact_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"layers\": [ {\"weights\": ").unwrap();
        let err = MlpClassifier::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_artifact_with_wrong_input_width_rejected() {
        let layer = |outputs: usize, inputs: usize| DenseLayer {
            weights: vec![vec![0.1; inputs]; outputs],
            bias: vec![0.0; outputs],
        };
        let weights = MlpWeights {
            layers: vec![layer(16, 6), layer(8, 16), layer(4, 8)],
        };
        let json = serde_json::to_string(&weights).unwrap();
        assert!(matches!(
            MlpWeights::from_json_str(&json),
            Err(ModelError::WeightShape {
                layer: 0,
                expected_in: 5,
                got_in: 6,
                ..
            })
        ));
    }

    // ---- Prediction ----

    #[test]
    fn test_probabilities_form_distribution() {
        let classifier = MlpClassifier::new(MlpWeights::seeded(42)).unwrap();
        for input in sample_inputs() {
            let result = classifier.predict(&input).unwrap();
            let sum: f32 = result.probabilities.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "probabilities sum to {sum}");
            assert!(result.probabilities.iter().all(|p| *p >= 0.0));
            assert_eq!(argmax(&result.probabilities), result.class.index());
        }
    }

    #[test]
    fn test_prediction_deterministic() {
        let classifier = MlpClassifier::new(MlpWeights::seeded(9)).unwrap();
        let input = [0.5, 0.6, 1.0, 0.4, 0.8];
        let first = classifier.predict(&input).unwrap();
        let second = classifier.predict(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_bias_drives_class() {
        let classifier =
            MlpClassifier::new(zero_weights_with_output_bias([0.0, 0.0, 0.0, 10.0])).unwrap();
        let result = classifier.predict(&[0.2, 0.6, 1.0, 0.9, 0.9]).unwrap();
        assert_eq!(result.class, Severity::Critical);
        assert!(result.probabilities[3] > 0.99);
    }

    #[test]
    fn test_uniform_logits_pick_first_class() {
        let classifier = MlpClassifier::new(zero_weights_with_output_bias([0.0; 4])).unwrap();
        let result = classifier.predict(&[0.5, 0.5, 1.0, 0.5, 0.5]).unwrap();
        assert_eq!(result.class, Severity::Low);
        for p in result.probabilities {
            assert!((p - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn test_classify_uses_feature_order() {
        let classifier = MlpClassifier::new(MlpWeights::seeded(5)).unwrap();
        let features = FeatureVector {
            norm_distance: 0.8,
            speed_magnitude: 0.6,
            direction_flag: 1.0,
            intent: 0.8,
            signal: 0.9,
        };
        assert_eq!(
            classifier.classify(&features).unwrap(),
            classifier.predict(&features.to_array()).unwrap()
        );
    }

    #[test]
    fn test_wrong_length_rejected() {
        let classifier = MlpClassifier::new(MlpWeights::seeded(1)).unwrap();
        assert_eq!(
            classifier.predict(&[0.1, 0.2, 1.0]),
            Err(PredictError::WrongLength {
                expected: 5,
                got: 3
            })
        );
    }

    #[test]
    fn test_non_finite_feature_names_field() {
        let classifier = MlpClassifier::new(MlpWeights::seeded(1)).unwrap();
        let err = classifier
            .predict(&[0.1, f32::INFINITY, 1.0, 0.5, 0.5])
            .unwrap_err();
        match err {
            PredictError::NonFinite { field, .. } => {
                assert_eq!(field, FeatureField::SpeedMagnitude)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("speed_magnitude"));
    }

    #[test]
    fn test_shared_reference_is_a_classifier() {
        let classifier = std::sync::Arc::new(MlpClassifier::new(MlpWeights::seeded(2)).unwrap());
        let input = [0.3, 0.6, 1.0, 0.6, 0.85];
        let direct = classifier.predict(&input).unwrap();
        let via_arc = SeverityClassifier::predict(&classifier, &input).unwrap();
        assert_eq!(direct, via_arc);
    }

    // ---- Math helpers ----

    #[test]
    fn test_softmax_stable_for_large_logits() {
        let probs = softmax(&[1000.0, 1000.0, 0.0, -1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-6);
        assert!((probs[1] - 0.5).abs() < 1e-6);
        assert!(probs[3] >= 0.0);
    }

    #[test]
    fn test_relu_applied_to_hidden_layers_only() {
        let mut weights = zero_weights_with_output_bias([-3.0, 0.0, 0.0, 0.0]);
        weights.layers[0].bias = vec![-1.0; 16];
        let trace = weights.forward_trace(&[0.0; FEATURE_COUNT]);
        assert!(trace[0].iter().all(|v| *v == 0.0));
        assert_eq!(trace[2][0], -3.0);
    }
}
