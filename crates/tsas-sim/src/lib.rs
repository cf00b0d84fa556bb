//! Simulation engine for TSAS.
//!
//! Owns the hecs ECS world of threats, runs the scoring systems once per
//! tick, and produces `SimulationSnapshot`s for any display surface.

pub mod engine;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use tsas_core as core;

#[cfg(test)]
mod tests;
