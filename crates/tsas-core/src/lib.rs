//! Core types and definitions for the TSAS threat-scoring simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshot views, events, and constants, plus the
//! two total functions every tick relies on: the feature vector builder
//! and the distance-based zone alert. It has no runtime dependencies.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod features;
pub mod state;
pub mod types;
pub mod zone;
