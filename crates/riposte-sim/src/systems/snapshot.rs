//! Snapshot system: queries the ECS world and builds a complete CombatSnapshot.
//!
//! This system is read-only; it never modifies the world.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use riposte_core::components::*;
use riposte_core::config::CombatConfig;
use riposte_core::enums::EncounterPhase;
use riposte_core::events::CombatEvent;
use riposte_core::state::*;
use riposte_core::types::{AgentId, SimTime};

use riposte_ai::phase;

use crate::engagement::EngagementPool;
use crate::navigation::Navigation;
use crate::player::PlayerState;

/// Build a complete CombatSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    index: &BTreeMap<AgentId, Entity>,
    nav: &dyn Navigation,
    pool: &EngagementPool,
    player: &PlayerState,
    config: &CombatConfig,
    time: &SimTime,
    phase: EncounterPhase,
    events: Vec<CombatEvent>,
) -> CombatSnapshot {
    let now = time.elapsed_secs;
    CombatSnapshot {
        time: *time,
        phase,
        player: player.view(now),
        agents: index
            .iter()
            .filter_map(|(&id, &entity)| agent_view(world, nav, id, entity))
            .collect(),
        director: config.director.as_ref().map(|_| build_director(pool)),
        boss: build_boss(world, now),
        events,
    }
}

/// View of one agent, or `None` if the entity is gone.
pub fn agent_view(
    world: &World,
    nav: &dyn Navigation,
    id: AgentId,
    entity: Entity,
) -> Option<AgentView> {
    let mut query = world
        .query_one::<(&Agent, &Brain, &Health, Option<&Cast>)>(entity)
        .ok()?;
    let (agent, brain, health, cast) = query.get()?;
    Some(AgentView {
        id,
        kind: agent.kind,
        state: brain.state,
        engaged: brain.engaged,
        position: nav
            .current_position(id)
            .unwrap_or(brain.last_known_position),
        facing: cast.map(|c| c.locked_forward).unwrap_or(brain.facing),
        hp: health.current.max(0),
        combo_progress: brain.combo_progress,
        casting: cast.is_some(),
    })
}

fn build_director(pool: &EngagementPool) -> DirectorView {
    DirectorView {
        registered: pool.registered().len(),
        engaged: pool.engaged().to_vec(),
        max_engaged: pool.max_engaged(),
        next_select_at: pool.next_select_at(),
    }
}

fn build_boss(world: &World, now: f64) -> Option<BossView> {
    world
        .query::<(&Agent, &BossPhaseClock)>()
        .iter()
        .next()
        .map(|(_, (agent, clock))| BossView {
            agent: agent.id,
            phase: phase::phase_at(clock, now),
            invulnerable_remaining: phase::invulnerable_remaining(clock, now),
        })
}
