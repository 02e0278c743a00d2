//! Boss phase controller: announces the breakable phase and owns the
//! one-shot parry kill.

use hecs::{Entity, World};

use riposte_core::components::{Agent, BossMarker, BossPhaseClock, Brain};
use riposte_core::enums::{AgentState, BossPhase, DeathCause};
use riposte_core::events::CombatEvent;

use riposte_ai::phase;

use crate::engagement::EngagementPool;
use crate::lifecycle;
use crate::navigation::Navigation;

/// Emit `BossPhaseChanged` once, on the first tick the boss is breakable.
pub fn announce_phase(world: &mut World, events: &mut Vec<CombatEvent>, now: f64) {
    for (_entity, (agent, clock, marker, brain)) in
        world.query_mut::<(&Agent, &BossPhaseClock, &mut BossMarker, &Brain)>()
    {
        if marker.breakable_announced || brain.state == AgentState::Dead {
            continue;
        }
        if !phase::is_invulnerable(clock, now) {
            marker.breakable_announced = true;
            log::info!("{} is now breakable at t={now:.3}", agent.id);
            events.push(CombatEvent::BossPhaseChanged {
                agent: agent.id,
                phase: BossPhase::Breakable,
            });
        }
    }
}

/// Kill the boss after a parry in its breakable phase.
///
/// Credited at most once: a second call (another confirmation racing the
/// first) changes nothing and emits nothing. Returns whether this call
/// performed the kill.
#[allow(clippy::too_many_arguments)]
pub fn parry_kill(
    world: &mut World,
    entity: Entity,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    events: &mut Vec<CombatEvent>,
    now: f64,
    corpse_linger_secs: f64,
) -> bool {
    {
        let Ok(mut marker) = world.get::<&mut BossMarker>(entity) else {
            return false;
        };
        if marker.kill_credited {
            log::debug!("parry kill already credited, ignoring repeat at t={now:.3}");
            return false;
        }
        marker.kill_credited = true;
    }
    lifecycle::kill(
        world,
        entity,
        DeathCause::ParryKill,
        pool,
        nav,
        events,
        now,
        corpse_linger_secs,
    )
}
