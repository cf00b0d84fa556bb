//! Offline pipeline for the severity network: synthetic data generation,
//! min-max preprocessing and mini-batch SGD training.

pub mod dataset;
pub mod error;
pub mod preprocess;
pub mod train;

pub use error::TrainError;
