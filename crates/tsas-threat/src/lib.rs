//! Threat behaviour for TSAS.
//!
//! Implements the per-threat ACTIVE → BREACHED state machine and the
//! weighted threat score. No ECS dependency: operates on plain data.

pub mod fsm;
pub mod scoring;

pub use tsas_core as core;
