//! Simulation engine: the tick driver.
//!
//! `SimulationEngine` owns the hecs ECS world, applies control commands at
//! tick boundaries, runs all systems, and produces `SimulationSnapshot`s.
//! Completely headless and sleep-free; cadence belongs to the caller.

use std::collections::VecDeque;
use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tsas_classifier::SeverityClassifier;
use tsas_core::commands::{ControlCommand, TunableParams};
use tsas_core::components::{ThreatPriors, ThreatStatus};
use tsas_core::constants::TICK_RATE;
use tsas_core::enums::ScenarioId;
use tsas_core::events::SimEvent;
use tsas_core::state::{GlobalAlertView, SimulationSnapshot};
use tsas_core::types::{Position, SimTime, ThreatId, Velocity};
use tsas_threat::fsm::{ThreatState, TickContext};

use crate::scenario::{self, ThreatSpec};
use crate::systems;
use crate::world_setup;

/// Shared, read-only classifier handle.
pub type SharedClassifier = Arc<dyn SeverityClassifier + Send + Sync>;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub scenario: ScenarioId,
    /// Ticks per simulated second; only affects `SimTime::elapsed_secs`.
    pub tick_rate: u32,
    /// Initial tunables.
    pub tunables: TunableParams,
    pub zone_center: Position,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scenario: ScenarioId::default(),
            tick_rate: TICK_RATE,
            tunables: TunableParams::default(),
            zone_center: Position::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    scenario: ScenarioId,
    tick_rate: u32,
    tunables: TunableParams,
    zone_center: Position,
    rng: ChaCha8Rng,
    next_threat_id: u32,
    command_queue: VecDeque<ControlCommand>,
    order_buffer: Vec<(ThreatId, Entity)>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    classifier: SharedClassifier,
}

impl SimulationEngine {
    /// Create an engine and spawn the configured scenario.
    pub fn new(config: SimConfig, classifier: SharedClassifier) -> Self {
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            scenario: config.scenario,
            tick_rate: config.tick_rate.max(1),
            tunables: config.tunables.sanitized(),
            zone_center: config.zone_center,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_threat_id: 0,
            command_queue: VecDeque::new(),
            order_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            classifier,
        };
        engine.spawn_scenario();
        log::info!(
            "Simulation ready: scenario {:?}, {} threats, seed {}",
            engine.scenario,
            engine.threat_count(),
            config.seed
        );
        engine
    }

    /// Queue a control command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ControlCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ControlCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Queued commands apply first; the tunables are then read once for the
    /// whole tick. While paused, threats and time stay put.
    pub fn tick(&mut self) -> SimulationSnapshot {
        self.process_commands();

        let params = self.tunables;
        if params.running {
            let ctx = TickContext {
                zone_center: self.zone_center,
                speed_scale: params.speed_scale,
            };
            self.run_systems(&ctx, &params);
            self.time.advance(1.0 / self.tick_rate as f64);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.scenario, &params, events)
    }

    /// Spawn an extra threat outside the scenario's set.
    pub fn spawn_threat(&mut self, spec: ThreatSpec) -> ThreatId {
        world_setup::spawn_threat(
            &mut self.world,
            &mut self.next_threat_id,
            &spec,
            &self.zone_center,
            &mut self.events,
        )
        .1
    }

    /// Remove every threat. Ids are never reused.
    pub fn clear_threats(&mut self) {
        world_setup::clear_threats(&mut self.world, &mut self.despawn_buffer);
    }

    /// Current state of every threat, ordered by id.
    pub fn threat_states(&self) -> Vec<ThreatState> {
        let mut states: Vec<ThreatState> = self
            .world
            .query::<(&ThreatId, &Position, &Velocity, &ThreatPriors, &ThreatStatus)>()
            .iter()
            .map(|(_, (id, position, velocity, priors, status))| ThreatState {
                id: *id,
                position: *position,
                velocity: *velocity,
                priors: *priors,
                status: *status,
            })
            .collect();
        states.sort_by_key(|s| s.id);
        states
    }

    /// Global alert folded from the current world, without ticking.
    pub fn global_alert(&self) -> GlobalAlertView {
        systems::alert::fold(&self.world)
    }

    pub fn threat_count(&self) -> usize {
        self.world.len() as usize
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tunables(&self) -> TunableParams {
        self.tunables
    }

    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single control command.
    fn handle_command(&mut self, command: ControlCommand) {
        log::debug!("Applying {:?}", command);
        match command {
            ControlCommand::Reset => {
                self.clear_threats();
                self.spawn_scenario();
                log::info!("Reset: respawned {} threats", self.threat_count());
            }
            other => {
                self.tunables.apply(&other);
            }
        }
    }

    fn spawn_scenario(&mut self) {
        let specs = scenario::build_threats(self.scenario, &mut self.rng, &self.tunables);
        world_setup::spawn_threats(
            &mut self.world,
            &mut self.next_threat_id,
            &specs,
            &self.zone_center,
            &mut self.events,
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, ctx: &TickContext, params: &TunableParams) {
        // 1. Move, classify, alert, freeze on breach
        systems::scoring::run(
            &mut self.world,
            ctx,
            self.classifier.as_ref(),
            &mut self.order_buffer,
            &mut self.events,
        );
        // 2. Replace intruders that left the outer ring
        systems::recycle::run(
            &mut self.world,
            &mut self.rng,
            params,
            &self.zone_center,
            &mut self.next_threat_id,
            &mut self.events,
        );
    }
}
