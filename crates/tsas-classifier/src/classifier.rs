//! The severity classifier capability and its network-backed implementation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tsas_core::constants::{FEATURE_COUNT, SEVERITY_CLASSES};
use tsas_core::enums::Severity;
use tsas_core::features::{FeatureField, FeatureVector};

use crate::error::{ModelError, PredictError};
use crate::model::{argmax, softmax, MlpWeights};

/// Predicted class plus the full distribution it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityResult {
    pub class: Severity,
    /// Non-negative, sums to 1.0; `class` is its arg-max.
    pub probabilities: [f32; SEVERITY_CLASSES],
}

/// Anything that maps a feature vector to a severity.
///
/// Implementations must be free of per-call mutable state: identical
/// inputs yield identical results.
pub trait SeverityClassifier {
    fn predict(&self, features: &[f32]) -> Result<SeverityResult, PredictError>;

    fn classify(&self, features: &FeatureVector) -> Result<SeverityResult, PredictError> {
        self.predict(&features.to_array())
    }
}

/// Reject inputs the network must never see.
pub fn check_features(features: &[f32]) -> Result<(), PredictError> {
    if features.len() != FEATURE_COUNT {
        return Err(PredictError::WrongLength {
            expected: FEATURE_COUNT,
            got: features.len(),
        });
    }
    for (field, &value) in FeatureField::ALL.iter().zip(features) {
        if !value.is_finite() {
            return Err(PredictError::NonFinite {
                field: *field,
                value,
            });
        }
    }
    Ok(())
}

/// Feed-forward classifier over validated, immutable weights.
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    weights: MlpWeights,
}

impl MlpClassifier {
    pub fn new(weights: MlpWeights) -> Result<Self, ModelError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Load the weight artifact. Failure leaves no usable classifier.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Self::new(MlpWeights::load(path)?)
    }

    pub fn weights(&self) -> &MlpWeights {
        &self.weights
    }
}

impl SeverityClassifier for MlpClassifier {
    fn predict(&self, features: &[f32]) -> Result<SeverityResult, PredictError> {
        check_features(features)?;

        let logits = self.weights.logits(features);
        let probs = softmax(&logits);
        if probs.len() != SEVERITY_CLASSES || probs.iter().any(|p| !p.is_finite()) {
            return Err(PredictError::NonFiniteOutput);
        }

        let mut probabilities = [0.0; SEVERITY_CLASSES];
        probabilities.copy_from_slice(&probs);
        let class = Severity::from_index(argmax(&probabilities)).unwrap_or_default();

        Ok(SeverityResult {
            class,
            probabilities,
        })
    }
}

impl<T: SeverityClassifier + ?Sized> SeverityClassifier for &T {
    fn predict(&self, features: &[f32]) -> Result<SeverityResult, PredictError> {
        (**self).predict(features)
    }
}

impl<T: SeverityClassifier + ?Sized> SeverityClassifier for std::sync::Arc<T> {
    fn predict(&self, features: &[f32]) -> Result<SeverityResult, PredictError> {
        (**self).predict(features)
    }
}
