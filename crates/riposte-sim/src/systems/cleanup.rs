//! Cleanup system: despawns corpses whose linger time has run out.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use riposte_core::components::{Agent, DespawnAt};
use riposte_core::types::AgentId;

use crate::navigation::Navigation;

/// Remove expired corpses from the world, the index and navigation.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    index: &mut BTreeMap<AgentId, Entity>,
    nav: &mut dyn Navigation,
    despawn_buffer: &mut Vec<(Entity, AgentId)>,
    now: f64,
) {
    despawn_buffer.clear();

    for (entity, (agent, despawn_at)) in world.query_mut::<(&Agent, &DespawnAt)>() {
        if now >= despawn_at.0 {
            despawn_buffer.push((entity, agent.id));
        }
    }

    for (entity, id) in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
        index.remove(&id);
        nav.release(id);
        log::debug!("{id} despawned at t={now:.3}");
    }
}
