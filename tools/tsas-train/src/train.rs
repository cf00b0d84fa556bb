//! Mini-batch SGD training of the fixed severity network.
//!
//! Softmax cross-entropy on the logits, ReLU hidden layers, plain
//! gradient descent. Starts from `MlpWeights::seeded` so the initial
//! network matches what the simulation uses without an artifact.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tsas_classifier::model::{argmax, softmax};
use tsas_classifier::{DenseLayer, MlpWeights};
use tsas_core::constants::FEATURE_COUNT;

use crate::dataset::Sample;
use crate::error::TrainError;
use crate::preprocess::MinMaxScaler;

/// Floor on the predicted probability inside `ln`.
const MIN_PROBABILITY: f32 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f32,
    pub seed: u64,
    /// Fraction of samples held out for evaluation.
    pub holdout: f32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 30,
            batch_size: 32,
            learning_rate: 0.01,
            seed: 42,
            holdout: 0.2,
        }
    }
}

impl TrainConfig {
    fn validate(&self) -> Result<(), TrainError> {
        if self.batch_size == 0 {
            return Err(TrainError::InvalidSetting {
                name: "batch_size",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(TrainError::InvalidSetting {
                name: "learning_rate",
                reason: format!("must be positive, got {}", self.learning_rate),
            });
        }
        if !(0.0..1.0).contains(&self.holdout) {
            return Err(TrainError::InvalidSetting {
                name: "holdout",
                reason: format!("must be in [0, 1), got {}", self.holdout),
            });
        }
        Ok(())
    }
}

/// A scaled feature row and its class index.
#[derive(Debug, Clone, Copy)]
struct Example {
    features: [f32; FEATURE_COUNT],
    label: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Mean training loss per epoch.
    pub epoch_losses: Vec<f32>,
    /// Accuracy on the hold-out split; `None` when nothing was held out.
    pub holdout_accuracy: Option<f32>,
    pub train_samples: usize,
    pub holdout_samples: usize,
}

#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub weights: MlpWeights,
    pub scaler: MinMaxScaler,
    pub report: TrainReport,
}

/// Fit the scaler, split, train, and evaluate.
pub fn train(samples: &[Sample], config: &TrainConfig) -> Result<TrainOutcome, TrainError> {
    config.validate()?;

    let rows: Vec<[f32; FEATURE_COUNT]> = samples.iter().map(Sample::features).collect();
    let scaler = MinMaxScaler::fit(&rows).ok_or(TrainError::EmptyDataset)?;

    let mut examples: Vec<Example> = samples
        .iter()
        .zip(&rows)
        .map(|(sample, row)| Example {
            features: scaler.transform(row),
            label: sample.severity.index(),
        })
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    examples.shuffle(&mut rng);
    let holdout_len = (examples.len() as f32 * config.holdout).round() as usize;
    let holdout_len = holdout_len.min(examples.len().saturating_sub(1));
    let (holdout, training) = examples.split_at_mut(holdout_len);

    log::info!(
        "Training on {} samples, holding out {}",
        training.len(),
        holdout.len()
    );

    let mut weights = MlpWeights::seeded(config.seed);
    let mut grads = zeroed_like(&weights);
    let mut epoch_losses = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        training.shuffle(&mut rng);
        let mut total_loss = 0.0;
        for batch in training.chunks(config.batch_size) {
            clear(&mut grads);
            for example in batch {
                total_loss += backprop(&weights, &example.features, example.label, &mut grads);
            }
            apply_gradients(&mut weights, &grads, config.learning_rate / batch.len() as f32);
        }
        let mean_loss = total_loss / training.len() as f32;
        if !mean_loss.is_finite() {
            return Err(TrainError::Diverged {
                epoch,
                loss: mean_loss,
            });
        }
        log::info!("Epoch {:>3}/{}: loss {:.4}", epoch, config.epochs, mean_loss);
        epoch_losses.push(mean_loss);
    }

    weights.validate()?;

    let holdout_accuracy = accuracy(&weights, holdout);
    if let Some(acc) = holdout_accuracy {
        log::info!("Hold-out accuracy: {:.2}%", acc * 100.0);
    }

    Ok(TrainOutcome {
        weights,
        scaler,
        report: TrainReport {
            epoch_losses,
            holdout_accuracy,
            train_samples: training.len(),
            holdout_samples: holdout.len(),
        },
    })
}

/// Accumulate the cross-entropy gradient of one example into `grads`.
/// Returns that example's loss.
pub fn backprop(weights: &MlpWeights, input: &[f32], label: usize, grads: &mut MlpWeights) -> f32 {
    let trace = weights.forward_trace(input);
    let Some(logits) = trace.last() else {
        return 0.0;
    };
    let probabilities = softmax(logits);
    let loss = -probabilities[label].max(MIN_PROBABILITY).ln();

    // dL/dlogits for softmax + cross-entropy.
    let mut delta = probabilities;
    delta[label] -= 1.0;

    for index in (0..weights.layers.len()).rev() {
        let layer_input = if index == 0 {
            input
        } else {
            trace[index - 1].as_slice()
        };
        let grad = &mut grads.layers[index];
        for (o, d) in delta.iter().enumerate() {
            grad.bias[o] += d;
            for (g, x) in grad.weights[o].iter_mut().zip(layer_input) {
                *g += d * x;
            }
        }

        if index > 0 {
            let layer = &weights.layers[index];
            // Hidden activations are post-ReLU, so a zero output means a zero gradient.
            delta = layer_input
                .iter()
                .enumerate()
                .map(|(i, &activation)| {
                    if activation > 0.0 {
                        layer.weights.iter().zip(&delta).map(|(row, d)| row[i] * d).sum()
                    } else {
                        0.0
                    }
                })
                .collect();
        }
    }
    loss
}

fn accuracy(weights: &MlpWeights, examples: &[Example]) -> Option<f32> {
    if examples.is_empty() {
        return None;
    }
    let correct = examples
        .iter()
        .filter(|e| argmax(&weights.logits(&e.features)) == e.label)
        .count();
    Some(correct as f32 / examples.len() as f32)
}

/// Same shapes as `weights`, every parameter zero.
pub fn zeroed_like(weights: &MlpWeights) -> MlpWeights {
    MlpWeights {
        layers: weights
            .layers
            .iter()
            .map(|layer| DenseLayer {
                weights: vec![vec![0.0; layer.inputs()]; layer.outputs()],
                bias: vec![0.0; layer.outputs()],
            })
            .collect(),
    }
}

fn clear(grads: &mut MlpWeights) {
    for layer in &mut grads.layers {
        layer.weights.iter_mut().flatten().for_each(|g| *g = 0.0);
        layer.bias.iter_mut().for_each(|g| *g = 0.0);
    }
}

fn apply_gradients(weights: &mut MlpWeights, grads: &MlpWeights, step: f32) {
    for (layer, grad) in weights.layers.iter_mut().zip(&grads.layers) {
        for (row, grad_row) in layer.weights.iter_mut().zip(&grad.weights) {
            for (w, g) in row.iter_mut().zip(grad_row) {
                *w -= step * g;
            }
        }
        for (b, g) in layer.bias.iter_mut().zip(&grad.bias) {
            *b -= step * g;
        }
    }
}
