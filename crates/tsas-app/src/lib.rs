//! TSAS application.
//!
//! Wires the simulation crates to a headless surface: JSON control
//! commands on stdin, one JSON snapshot per tick on stdout.

pub mod cli;
pub mod config;
pub mod control;
pub mod error;
pub mod game_loop;
pub mod state;

pub use tsas_core as core;
