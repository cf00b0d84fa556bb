//! Weight artifact model for the fixed severity network.
//!
//! The artifact is JSON: a list of dense layers, each with a row-major
//! `out x in` weight matrix and an `out`-length bias vector. Layer widths
//! must match `NETWORK_LAYOUT` exactly.

use std::fs;
use std::path::Path;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use tsas_core::constants::NETWORK_LAYOUT;

use crate::error::ModelError;

/// One fully connected layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    /// `weights[o][i]` connects input `i` to output `o`.
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

impl DenseLayer {
    /// Xavier-uniform weights, zero bias.
    fn initialized(inputs: usize, outputs: usize, rng: &mut ChaCha8Rng) -> Self {
        let limit = (6.0 / (inputs + outputs) as f32).sqrt();
        let weights = (0..outputs)
            .map(|_| (0..inputs).map(|_| rng.gen_range(-limit..limit)).collect())
            .collect();
        Self {
            weights,
            bias: vec![0.0; outputs],
        }
    }

    pub fn inputs(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    pub fn outputs(&self) -> usize {
        self.weights.len()
    }

    /// `out = W·input + b`.
    pub fn affine(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect()
    }
}

/// Trained parameters of the full network, input layer first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpWeights {
    pub layers: Vec<DenseLayer>,
}

impl MlpWeights {
    /// Freshly initialised weights for `NETWORK_LAYOUT`, deterministic per seed.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layers = NETWORK_LAYOUT
            .windows(2)
            .map(|w| DenseLayer::initialized(w[0], w[1], &mut rng))
            .collect();
        Self { layers }
    }

    /// Parse and validate an artifact from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let weights: MlpWeights = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Read, parse, and validate an artifact file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        log::debug!("Reading weight artifact from {:?}", path);
        let json = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let weights = Self::from_json_str(&json)?;
        log::info!("Loaded weight artifact from {:?}", path);
        Ok(weights)
    }

    /// Write the artifact as JSON.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check layer count, every shape, and that all parameters are finite.
    pub fn validate(&self) -> Result<(), ModelError> {
        let expected_layers = NETWORK_LAYOUT.len() - 1;
        if self.layers.len() != expected_layers {
            return Err(ModelError::LayerCount {
                expected: expected_layers,
                got: self.layers.len(),
            });
        }

        for (index, (layer, dims)) in self.layers.iter().zip(NETWORK_LAYOUT.windows(2)).enumerate()
        {
            let (expected_in, expected_out) = (dims[0], dims[1]);
            let ragged = layer.weights.iter().any(|row| row.len() != expected_in);
            if layer.outputs() != expected_out || ragged {
                let got_in = layer
                    .weights
                    .iter()
                    .map(Vec::len)
                    .find(|len| *len != expected_in)
                    .unwrap_or_else(|| layer.inputs());
                return Err(ModelError::WeightShape {
                    layer: index,
                    expected_out,
                    expected_in,
                    got_out: layer.outputs(),
                    got_in,
                });
            }
            if layer.bias.len() != expected_out {
                return Err(ModelError::BiasShape {
                    layer: index,
                    expected: expected_out,
                    got: layer.bias.len(),
                });
            }
            let finite = layer
                .weights
                .iter()
                .flatten()
                .chain(&layer.bias)
                .all(|v| v.is_finite());
            if !finite {
                return Err(ModelError::NonFinite { layer: index });
            }
        }
        Ok(())
    }

    /// Forward pass returning the output of every layer.
    ///
    /// Hidden layers are ReLU-activated; the final entry holds the raw logits.
    pub fn forward_trace(&self, input: &[f32]) -> Vec<Vec<f32>> {
        let last = self.layers.len().saturating_sub(1);
        let mut outputs: Vec<Vec<f32>> = Vec::with_capacity(self.layers.len());
        for (index, layer) in self.layers.iter().enumerate() {
            let layer_input = outputs.last().map_or(input, Vec::as_slice);
            let mut z = layer.affine(layer_input);
            if index < last {
                relu_in_place(&mut z);
            }
            outputs.push(z);
        }
        outputs
    }

    /// Forward pass returning the logits only.
    pub fn logits(&self, input: &[f32]) -> Vec<f32> {
        self.forward_trace(input).pop().unwrap_or_default()
    }
}

fn relu_in_place(values: &mut [f32]) {
    for v in values {
        *v = v.max(0.0);
    }
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Index of the largest value; the first one wins ties.
pub fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best_i, best_v), (i, &v)| {
            if v > best_v {
                (i, v)
            } else {
                (best_i, best_v)
            }
        })
        .0
}
