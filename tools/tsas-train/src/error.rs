use std::path::PathBuf;

use thiserror::Error;

use tsas_classifier::ModelError;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} line {line}: {source}")]
    Record {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("invalid training setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("training diverged at epoch {epoch} (loss {loss})")]
    Diverged { epoch: usize, loss: f32 },

    #[error(transparent)]
    Model(#[from] ModelError),
}
