//! Engagement director: periodically hands the bounded combat slots to the
//! agents nearest the player.
//!
//! Each scheduling tick applies deferred pool changes, rotates every slot
//! holder back to the ring (mid-cast agents keep their slot until the cast
//! resolves) and then fills free slots with eligible agents by ascending
//! squared distance. Ties keep registration order.

use std::collections::BTreeMap;

use glam::Vec3;
use hecs::{Entity, World};

use riposte_core::components::{Brain, Cast};
use riposte_core::config::DirectorConfig;
use riposte_core::events::CombatEvent;
use riposte_core::types::{horizontal_distance_sq, AgentId};

use crate::engagement::EngagementPool;
use crate::lifecycle;
use crate::navigation::Navigation;

/// Run the director if its interval has elapsed. Returns whether it ran.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    index: &BTreeMap<AgentId, Entity>,
    target: Vec3,
    config: &DirectorConfig,
    events: &mut Vec<CombatEvent>,
    now: f64,
) -> bool {
    if now < pool.next_select_at() {
        return false;
    }
    pool.schedule_next_select(now + config.select_interval_secs);

    pool.apply_pending();

    // Rotate current slot holders.
    for id in pool.engaged().to_vec() {
        let Some(&entity) = index.get(&id) else {
            pool.release(id);
            continue;
        };
        if world.get::<&Cast>(entity).is_ok() {
            continue;
        }
        lifecycle::leave_combat_to_staging(world, entity, pool, nav, events, now);
    }

    // Rank eligible agents by distance to the target.
    let mut candidates: Vec<(AgentId, Entity, f32)> = pool
        .registered()
        .iter()
        .filter_map(|id| {
            let entity = *index.get(id)?;
            let brain = world.get::<&Brain>(entity).ok()?;
            if !is_eligible(&brain) {
                return None;
            }
            let position = nav
                .current_position(*id)
                .unwrap_or(brain.last_known_position);
            Some((*id, entity, horizontal_distance_sq(position, target)))
        })
        .collect();
    candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

    for (id, entity, _) in candidates {
        if !pool.has_free_slot() {
            break;
        }
        if pool.try_grant(id) {
            lifecycle::enter_combat(world, entity, true);
            events.push(CombatEvent::EngagementGranted { agent: id });
        }
    }

    pool.check_invariant();
    log::debug!(
        "director at t={now:.3}: engaged {:?} of {} registered",
        pool.engaged(),
        pool.registered().len()
    );
    true
}

/// Grant a self-requested slot if one is free.
pub fn grant_request(
    world: &mut World,
    pool: &mut EngagementPool,
    entity: Entity,
    id: AgentId,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let eligible = matches!(world.get::<&Brain>(entity), Ok(b) if is_eligible(&b));
    if !eligible || !pool.try_grant(id) {
        return false;
    }
    lifecycle::enter_combat(world, entity, true);
    events.push(CombatEvent::EngagementGranted { agent: id });
    true
}

/// Waiting or Staging. Stunned and dead agents never qualify.
fn is_eligible(brain: &Brain) -> bool {
    brain.state.is_idle()
}
