//! Classifier error types.

use std::path::PathBuf;

use thiserror::Error;

use tsas_core::features::FeatureField;

/// The weight artifact could not be turned into a usable model.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read weight artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed weight artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected {expected} layers, artifact has {got}")]
    LayerCount { expected: usize, got: usize },

    #[error("layer {layer}: expected {expected_out}x{expected_in} weights, found {got_out}x{got_in}")]
    WeightShape {
        layer: usize,
        expected_out: usize,
        expected_in: usize,
        got_out: usize,
        got_in: usize,
    },

    #[error("layer {layer}: expected {expected} biases, found {got}")]
    BiasShape {
        layer: usize,
        expected: usize,
        got: usize,
    },

    #[error("layer {layer}: non-finite parameter")]
    NonFinite { layer: usize },
}

/// A single prediction was rejected. Never fatal to the caller's loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("expected {expected} features, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("feature {field} is not finite ({value})")]
    NonFinite { field: FeatureField, value: f32 },

    #[error("network produced non-finite output")]
    NonFiniteOutput,
}
