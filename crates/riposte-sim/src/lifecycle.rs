//! Agent state transitions driven from outside the agent's own FSM.
//!
//! Every transition that leaves a fighting state goes through here so slot
//! release, cast cancellation and navigation stop happen together. Removing
//! the `Cast` component is the cancellation: a cast routine that is gone can
//! never fire, and any later confirmation for its ticket finds nothing to
//! match.

use hecs::{Entity, World};

use riposte_core::components::*;
use riposte_core::config::AgentProfile;
use riposte_core::enums::{AgentKind, AgentState, DeathCause};
use riposte_core::events::CombatEvent;

use riposte_ai::phase;

use crate::engagement::EngagementPool;
use crate::navigation::Navigation;

/// Waiting/Staging → Approaching. `engaged` records whether a director slot backs it.
pub(crate) fn enter_combat(world: &mut World, entity: Entity, engaged: bool) -> bool {
    let Ok(mut brain) = world.get::<&mut Brain>(entity) else {
        return false;
    };
    if !brain.state.is_idle() {
        return false;
    }
    brain.state = AgentState::Approaching;
    brain.engaged = engaged;
    brain.staging = None;
    true
}

/// End an attack sequence (or a director rotation): back to the ring with cooldown.
pub(crate) fn leave_combat_to_staging(
    world: &mut World,
    entity: Entity,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    events: &mut Vec<CombatEvent>,
    now: f64,
) {
    let _ = world.remove_one::<Cast>(entity);
    let Ok((agent, profile, brain)) =
        world.query_one_mut::<(&Agent, &AgentProfile, &mut Brain)>(entity)
    else {
        return;
    };
    if brain.state == AgentState::Dead {
        return;
    }

    brain.state = AgentState::Staging;
    brain.attack_ready_at = now + profile.reengage_delay_secs;
    brain.combo_progress = 0;
    brain.staging = None;
    let held = std::mem::take(&mut brain.engaged);
    let id = agent.id;

    if pool.release(id) || held {
        events.push(CombatEvent::EngagementReleased { agent: id });
    }
    nav.stop(id);
}

/// Knock an agent out of the fight. Cancels any cast and releases its slot.
pub(crate) fn apply_stun(
    world: &mut World,
    entity: Entity,
    secs: f64,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    events: &mut Vec<CombatEvent>,
    now: f64,
) -> bool {
    let alive = matches!(world.get::<&Brain>(entity), Ok(b) if b.state != AgentState::Dead);
    if !alive {
        return false;
    }
    let _ = world.remove_one::<Cast>(entity);
    let Ok((agent, brain)) = world.query_one_mut::<(&Agent, &mut Brain)>(entity) else {
        return false;
    };

    let until = now + secs.max(0.0);
    brain.state = AgentState::Stunned;
    brain.stunned_until = until;
    brain.combo_progress = 0;
    brain.staging = None;
    let held = std::mem::take(&mut brain.engaged);
    let id = agent.id;

    if pool.release(id) || held {
        events.push(CombatEvent::EngagementReleased { agent: id });
    }
    nav.stop(id);
    events.push(CombatEvent::AgentStunned { agent: id, until });
    true
}

/// Terminal transition. Idempotent: returns false and emits nothing for an
/// agent that is already dead.
#[allow(clippy::too_many_arguments)]
pub(crate) fn kill(
    world: &mut World,
    entity: Entity,
    cause: DeathCause,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    events: &mut Vec<CombatEvent>,
    now: f64,
    corpse_linger_secs: f64,
) -> bool {
    let alive = matches!(world.get::<&Brain>(entity), Ok(b) if b.state != AgentState::Dead);
    if !alive {
        return false;
    }

    // Interrupt first so nobody ever observes an attacking corpse.
    let _ = world.remove_one::<Cast>(entity);
    let Ok((agent, brain)) = world.query_one_mut::<(&Agent, &mut Brain)>(entity) else {
        return false;
    };
    brain.state = AgentState::Dead;
    brain.engaged = false;
    brain.combo_progress = 0;
    brain.staging = None;
    let id = agent.id;

    if pool.release(id) {
        events.push(CombatEvent::EngagementReleased { agent: id });
    }
    pool.unregister(id);
    nav.stop(id);
    let _ = world.insert_one(entity, DespawnAt(now + corpse_linger_secs));

    log::info!("{id} died ({cause:?}) at t={now:.3}");
    events.push(CombatEvent::AgentDied { agent: id, cause });
    true
}

/// Apply damage to an agent. A no-op on corpses and on an invulnerable boss.
#[allow(clippy::too_many_arguments)]
pub(crate) fn damage_agent(
    world: &mut World,
    entity: Entity,
    amount: i32,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    events: &mut Vec<CombatEvent>,
    now: f64,
    corpse_linger_secs: f64,
) -> bool {
    if amount <= 0 {
        return false;
    }
    let died = {
        let Ok((agent, brain, health, clock)) = world
            .query_one_mut::<(&Agent, &Brain, &mut Health, Option<&BossPhaseClock>)>(entity)
        else {
            return false;
        };
        if brain.state == AgentState::Dead {
            return false;
        }
        if agent.kind == AgentKind::Boss {
            if let Some(clock) = clock {
                if phase::is_invulnerable(clock, now) {
                    log::debug!("{} ignored {amount} damage while invulnerable", agent.id);
                    return false;
                }
            }
        }
        health.current -= amount;
        health.current <= 0
    };

    if died {
        kill(
            world,
            entity,
            DeathCause::Damage,
            pool,
            nav,
            events,
            now,
            corpse_linger_secs,
        );
    }
    true
}

/// Remove an agent from the simulation immediately (external despawn).
pub(crate) fn despawn(
    world: &mut World,
    entity: Entity,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let Ok(agent) = world.get::<&Agent>(entity).map(|a| *a) else {
        return false;
    };
    if pool.release(agent.id) {
        events.push(CombatEvent::EngagementReleased { agent: agent.id });
    }
    pool.unregister(agent.id);
    nav.release(agent.id);
    world.despawn(entity).is_ok()
}
