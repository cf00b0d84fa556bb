//! Severity classifier for TSAS.
//!
//! Loads the weight artifact for the fixed 5→16→8→4 feed-forward network
//! once, then maps feature vectors to a severity class and a probability
//! distribution. Inference only; weights are never mutated after load.

pub mod classifier;
pub mod error;
pub mod model;

pub use classifier::{MlpClassifier, SeverityClassifier, SeverityResult};
pub use error::{ModelError, PredictError};
pub use model::{DenseLayer, MlpWeights};
pub use tsas_core as core;

#[cfg(test)]
mod tests;
