//! Player melee swing: damages the nearest live agent inside reach and cone.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use riposte_core::components::Brain;
use riposte_core::config::CombatConfig;
use riposte_core::enums::AgentState;
use riposte_core::events::CombatEvent;
use riposte_core::types::{horizontal_distance, AgentId};

use riposte_ai::facing::within_cone_angle;

use crate::engagement::EngagementPool;
use crate::lifecycle;
use crate::navigation::Navigation;
use crate::player::PlayerState;

/// Swing once. Ignored while dead or on cooldown; returns the struck agent.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    index: &BTreeMap<AgentId, Entity>,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    player: &mut PlayerState,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
    now: f64,
) -> Option<AgentId> {
    if !player.alive || now < player.next_attack_at {
        return None;
    }
    player.next_attack_at = now + config.player.attack_cooldown_secs;

    let reach = config.player.attack_range;
    let cone = config.player.attack_cone_deg;

    // Index order keeps ties deterministic.
    let mut best: Option<(AgentId, Entity, f32)> = None;
    for (&id, &entity) in index {
        let Ok(brain) = world.get::<&Brain>(entity) else {
            continue;
        };
        if brain.state == AgentState::Dead {
            continue;
        }
        let position = nav
            .current_position(id)
            .unwrap_or(brain.last_known_position);
        let distance = horizontal_distance(player.position, position);
        if distance > reach || !within_cone_angle(player.facing, player.position, position, cone) {
            continue;
        }
        if best.map_or(true, |(_, _, d)| distance < d) {
            best = Some((id, entity, distance));
        }
    }

    let target = best.map(|(id, _, _)| id);
    events.push(CombatEvent::PlayerStrike { target });

    if let Some((_, entity, _)) = best {
        lifecycle::damage_agent(
            world,
            entity,
            config.player.attack_damage,
            pool,
            nav,
            events,
            now,
            config.sim.corpse_linger_secs,
        );
    }
    target
}
