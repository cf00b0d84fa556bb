//! Rule-labelled synthetic dataset and its JSON-lines storage.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use tsas_core::constants::FEATURE_COUNT;
use tsas_core::enums::Severity;

use crate::error::TrainError;

/// One raw training record, in feature order plus its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub distance: f32,
    pub speed: f32,
    pub direction: f32,
    pub intent: f32,
    pub signal: f32,
    pub severity: Severity,
}

impl Sample {
    pub fn features(&self) -> [f32; FEATURE_COUNT] {
        [
            self.distance,
            self.speed,
            self.direction,
            self.intent,
            self.signal,
        ]
    }
}

/// Ground-truth rule used to label generated samples.
pub fn label_for(distance: f32, speed: f32, intent: f32) -> Severity {
    if distance < 200.0 && speed > 40.0 && intent > 0.7 {
        Severity::Critical
    } else if distance < 400.0 && speed > 30.0 && intent > 0.5 {
        Severity::High
    } else if distance < 700.0 || intent > 0.3 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Draw `count` labelled samples, deterministic per seed.
pub fn generate(count: usize, seed: u64) -> Vec<Sample> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let distance = rng.gen_range(50.0..1000.0);
            let speed = rng.gen_range(0.0..60.0);
            let direction = f32::from(rng.gen_range(0u8..2));
            let intent = rng.gen_range(0.0..1.0);
            let signal = rng.gen_range(0.4..1.0);
            Sample {
                distance,
                speed,
                direction,
                intent,
                signal,
                severity: label_for(distance, speed, intent),
            }
        })
        .collect()
}

/// Write one JSON object per line.
pub fn write_jsonl(path: &Path, samples: &[Sample]) -> Result<(), TrainError> {
    let io_err = |source| TrainError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for sample in samples {
        serde_json::to_writer(&mut out, sample)?;
        out.write_all(b"\n").map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Read a JSON-lines dataset. Blank lines are ignored; a bad record is an error.
pub fn read_jsonl(path: &Path) -> Result<Vec<Sample>, TrainError> {
    let io_err = |source| TrainError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        if line.trim().is_empty() {
            continue;
        }
        let sample = serde_json::from_str(&line).map_err(|source| TrainError::Record {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        samples.push(sample);
    }
    log::info!("Read {} samples from {:?}", samples.len(), path);
    Ok(samples)
}

/// Per-class sample counts, indexed by `Severity::index`.
pub fn class_counts(samples: &[Sample]) -> [usize; 4] {
    let mut counts = [0; 4];
    for sample in samples {
        counts[sample.severity.index()] += 1;
    }
    counts
}
