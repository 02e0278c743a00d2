//! Simulation engine: the core of the encounter.
//!
//! `SimulationEngine` owns the hecs ECS world, the engagement pool, the
//! player state and the navigation collaborator. It processes queued input
//! at tick boundaries, runs all systems in a fixed order, and produces
//! `CombatSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use riposte_core::commands::{ExternalEvent, PlayerCommand};
use riposte_core::components::{Agent, Brain, Cast};
use riposte_core::config::CombatConfig;
use riposte_core::enums::{AgentKind, AgentState, EncounterPhase};
use riposte_core::events::CombatEvent;
use riposte_core::state::{AgentView, CombatSnapshot};
use riposte_core::types::{flatten, AgentId, CastTicket, SimTime};

use crate::engagement::EngagementPool;
use crate::error::SimError;
use crate::lifecycle;
use crate::navigation::{DirectNavigation, Navigation};
use crate::player::PlayerState;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub combat: CombatConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            combat: CombatConfig::with_director(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all encounter state.
pub struct SimulationEngine<N: Navigation = DirectNavigation> {
    world: World,
    time: SimTime,
    phase: EncounterPhase,
    config: CombatConfig,
    rng: ChaCha8Rng,
    navigation: N,
    pool: EngagementPool,
    player: PlayerState,
    /// Live and lingering agents, by id.
    agents: BTreeMap<AgentId, Entity>,
    next_agent_id: u32,
    spawned_total: u32,
    active_since: f64,
    command_queue: VecDeque<PlayerCommand>,
    event_queue: VecDeque<ExternalEvent>,
    despawn_buffer: Vec<(Entity, AgentId)>,
    events: Vec<CombatEvent>,
}

impl SimulationEngine<DirectNavigation> {
    /// Create an engine with the built-in straight-line navigation.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        Self::with_navigation(config, DirectNavigation::default())
    }
}

impl<N: Navigation> SimulationEngine<N> {
    /// Create an engine driving the given navigation collaborator.
    pub fn with_navigation(config: SimConfig, navigation: N) -> Result<Self, SimError> {
        config.combat.validate()?;
        let max_engaged = config
            .combat
            .director
            .as_ref()
            .map(|d| d.max_engaged)
            .unwrap_or(0);

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: EncounterPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            navigation,
            pool: EngagementPool::new(max_engaged),
            player: PlayerState::new(&config.combat),
            agents: BTreeMap::new(),
            next_agent_id: 0,
            spawned_total: 0,
            active_since: 0.0,
            command_queue: VecDeque::new(),
            event_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config: config.combat,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Queue a collaborator callback. Applied after player commands, and only
    /// while the encounter is active; otherwise it waits in the queue.
    pub fn queue_event(&mut self, event: ExternalEvent) {
        self.event_queue.push_back(event);
    }

    /// Spawn a grunt at `position`.
    pub fn spawn_agent(&mut self, position: Vec3) -> AgentId {
        let id = self.allocate_id();
        let now = self.time.elapsed_secs;
        let entity = world_setup::spawn_grunt(
            &mut self.world,
            id,
            &self.config.grunt,
            position,
            &mut self.rng,
            now,
        );
        self.navigation.place(id, position);
        self.pool.register(id);
        self.agents.insert(id, entity);
        log::debug!("spawned {id} at {position}");
        id
    }

    /// Spawn the boss at `position`. Only one boss may exist at a time.
    pub fn spawn_boss(&mut self, position: Vec3) -> Result<AgentId, SimError> {
        if let Some(existing) = self.boss_id() {
            return Err(SimError::BossAlreadyPresent(existing));
        }
        let id = self.allocate_id();
        let now = self.time.elapsed_secs;
        let entity = world_setup::spawn_boss(
            &mut self.world,
            id,
            &self.config.boss,
            position,
            &mut self.rng,
            now,
        );
        self.navigation.place(id, position);
        self.agents.insert(id, entity);
        log::info!("spawned boss {id} at {position}");
        Ok(id)
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> CombatSnapshot {
        self.process_commands();

        if self.phase == EncounterPhase::Active {
            self.process_external_events();
            self.run_systems();
            self.time.advance(self.config.sim.tick_rate);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.agents,
            &self.navigation,
            &self.pool,
            &self.player,
            &self.config,
            &self.time,
            self.phase,
            events,
        )
    }

    /// Get the current encounter phase.
    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Current view of one agent.
    pub fn agent(&self, id: AgentId) -> Option<AgentView> {
        let entity = *self.agents.get(&id)?;
        systems::snapshot::agent_view(&self.world, &self.navigation, id, entity)
    }

    /// Ticket of the strike `id` is currently casting, for hosts wiring
    /// animation callbacks back as `ConfirmDamageWindow`.
    pub fn current_ticket(&self, id: AgentId) -> Result<Option<CastTicket>, SimError> {
        let entity = *self.agents.get(&id).ok_or(SimError::UnknownAgent(id))?;
        Ok(self.world.get::<&Cast>(entity).ok().map(|cast| cast.ticket))
    }

    pub fn pool(&self) -> &EngagementPool {
        &self.pool
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut N {
        &mut self.navigation
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        self.spawned_total += 1;
        id
    }

    fn boss_id(&self) -> Option<AgentId> {
        self.agents.iter().find_map(|(&id, &entity)| {
            let agent = self.world.get::<&Agent>(entity).ok()?;
            (agent.kind == AgentKind::Boss).then_some(id)
        })
    }

    fn set_phase(&mut self, phase: EncounterPhase) {
        if self.phase != phase {
            log::info!("encounter {:?} -> {:?} at t={:.3}", self.phase, phase, self.time.elapsed_secs);
            self.phase = phase;
            self.events.push(CombatEvent::EncounterPhaseChanged { phase });
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let now = self.time.elapsed_secs;
        match command {
            PlayerCommand::StartEncounter => {
                if self.phase == EncounterPhase::Setup {
                    self.active_since = now;
                    self.set_phase(EncounterPhase::Active);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == EncounterPhase::Active {
                    self.set_phase(EncounterPhase::Paused);
                }
            }
            PlayerCommand::Resume => {
                if self.phase == EncounterPhase::Paused {
                    self.set_phase(EncounterPhase::Active);
                }
            }
            PlayerCommand::SetPlayerPose { position, facing } => {
                self.player.position = position;
                let facing = flatten(facing).normalize_or_zero();
                if facing != Vec3::ZERO {
                    self.player.facing = facing;
                }
            }
            PlayerCommand::Parry { at } => {
                let pressed_at = at.map_or(now, |t| t.min(now));
                if self.phase == EncounterPhase::Active
                    && self.player.alive
                    && self.player.parry.press(pressed_at)
                {
                    self.events.push(CombatEvent::ParryArmed { at: pressed_at });
                }
            }
            PlayerCommand::Attack => {
                if self.phase == EncounterPhase::Active {
                    systems::player_attack::run(
                        &mut self.world,
                        &self.agents,
                        &mut self.pool,
                        &mut self.navigation,
                        &mut self.player,
                        &self.config,
                        &mut self.events,
                        now,
                    );
                }
            }
        }
    }

    /// Process all queued collaborator events.
    fn process_external_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            self.handle_external_event(event);
        }
    }

    fn handle_external_event(&mut self, event: ExternalEvent) {
        let now = self.time.elapsed_secs;
        match event {
            ExternalEvent::ConfirmDamageWindow { ticket } => {
                systems::cast::confirm(
                    &mut self.world,
                    &self.agents,
                    ticket,
                    &mut self.pool,
                    &mut self.navigation,
                    &mut self.player,
                    &self.config,
                    &mut self.events,
                    now,
                );
            }
            ExternalEvent::ApplyStun { agent, secs } => {
                let Some(&entity) = self.agents.get(&agent) else {
                    log::debug!("stun for unknown {agent} ignored");
                    return;
                };
                lifecycle::apply_stun(
                    &mut self.world,
                    entity,
                    secs,
                    &mut self.pool,
                    &mut self.navigation,
                    &mut self.events,
                    now,
                );
            }
            ExternalEvent::Despawn { agent } => {
                let Some(entity) = self.agents.remove(&agent) else {
                    log::debug!("despawn for unknown {agent} ignored");
                    return;
                };
                lifecycle::despawn(
                    &mut self.world,
                    entity,
                    &mut self.pool,
                    &mut self.navigation,
                    &mut self.events,
                );
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        let dt = 1.0 / self.config.sim.tick_rate.max(1) as f64;
        let frozen = now < self.active_since + self.config.sim.start_freeze_secs;

        if !frozen {
            // 1. Boss phase announcement
            systems::boss::announce_phase(&mut self.world, &mut self.events, now);
            // 2. Engagement director
            if let Some(director) = &self.config.director {
                systems::director::run(
                    &mut self.world,
                    &mut self.pool,
                    &mut self.navigation,
                    &self.agents,
                    self.player.position,
                    director,
                    &mut self.events,
                    now,
                );
            }
            // 3. Agent FSM (movement, slot requests, cast start)
            systems::agent_ai::run(
                &mut self.world,
                &mut self.pool,
                &mut self.navigation,
                &self.player,
                &mut self.rng,
                self.config.director.is_some(),
                &mut self.events,
                now,
                dt,
            );
            // 4. Cast routines (windup, confirmation, failsafe, combo gaps)
            systems::cast::run(
                &mut self.world,
                &mut self.pool,
                &mut self.navigation,
                &mut self.player,
                &self.config,
                &mut self.events,
                now,
            );
        }
        // 5. Navigation
        self.navigation.advance(dt);
        // 6. Encounter outcome
        self.check_outcome();
        // 7. Cleanup (expired corpses)
        systems::cleanup::run(
            &mut self.world,
            &mut self.agents,
            &mut self.navigation,
            &mut self.despawn_buffer,
            now,
        );
    }

    fn check_outcome(&mut self) {
        if !self.player.alive {
            self.set_phase(EncounterPhase::Defeat);
            return;
        }
        if self.spawned_total == 0 {
            return;
        }
        let any_alive = self
            .world
            .query::<&Brain>()
            .iter()
            .any(|(_, brain)| brain.state != AgentState::Dead);
        if !any_alive {
            self.events.push(CombatEvent::EncounterCleared);
            self.set_phase(EncounterPhase::Victory);
        }
    }
}
