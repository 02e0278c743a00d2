//! Agent AI system: evaluates each agent's FSM and turns the result into
//! navigation requests, slot requests and cast starts.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use riposte_core::components::*;
use riposte_core::config::AgentProfile;
use riposte_core::enums::{AgentKind, AgentState};
use riposte_core::events::CombatEvent;
use riposte_core::types::{horizontal_distance, AgentId};

use riposte_ai::facing::turn_toward;
use riposte_ai::fsm::{self, AgentContext, Directive};
use riposte_ai::staging;

use crate::engagement::EngagementPool;
use crate::lifecycle;
use crate::navigation::Navigation;
use crate::player::PlayerState;
use crate::systems::{cast, director};

/// Stopping distance used when walking to a staging spot.
const STAGING_STOP_DISTANCE: f32 = 0.2;

/// Run the FSM for every agent.
///
/// With a director, grunts ask it for slots; without one, or for the boss,
/// agents enter combat on their own.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    player: &PlayerState,
    rng: &mut ChaCha8Rng,
    director_enabled: bool,
    events: &mut Vec<CombatEvent>,
    now: f64,
    dt: f64,
) {
    let mut slot_requests: Vec<(AgentId, Entity, AgentKind, bool)> = Vec::new();
    let mut attack_starts: Vec<(AgentId, Entity)> = Vec::new();

    for (entity, (agent, profile, brain, casting)) in
        world.query_mut::<(&Agent, &AgentProfile, &mut Brain, Option<&Cast>)>()
    {
        let id = agent.id;
        if brain.state == AgentState::Dead {
            continue;
        }

        match nav.current_position(id) {
            Some(position) => brain.last_known_position = position,
            None => log::warn!("{id}: navigation reports no position, using last known"),
        }
        let position = brain.last_known_position;

        let distance = player
            .alive
            .then(|| horizontal_distance(position, player.position));

        let ctx = AgentContext {
            state: brain.state,
            now,
            distance_to_target: distance,
            sight_radius: profile.sight_radius,
            attack_range: profile.attack_range,
            attack_ready_at: brain.attack_ready_at,
            stunned_until: brain.stunned_until,
            request_due: brain.state == AgentState::Waiting && now >= brain.next_request_at,
        };
        let update = fsm::evaluate(&ctx);

        // Facing tracks the target unless a cast locked it or the agent is stunned.
        if casting.is_none() && update.new_state != AgentState::Stunned && player.alive {
            let desired = player.position - position;
            let max_turn = profile.turn_rate_deg.to_radians() * dt as f32;
            brain.facing = turn_toward(brain.facing, desired, max_turn);
        }

        match update.directive {
            Directive::Hold | Directive::ContinueAttack => nav.stop(id),
            Directive::HoldStagingSpot { request_slot } => {
                let (index, total) = ring_position(pool, id, agent.kind);
                let slot = *brain.staging.get_or_insert_with(|| {
                    staging::roll_slot(index, total, profile.ring_radius, profile.ring_jitter, rng)
                });
                if now >= brain.next_shuffle_at {
                    brain.shuffle_offset =
                        staging::roll_shuffle_offset(profile.idle_shuffle_radius, rng);
                    brain.next_shuffle_at =
                        now + staging::next_shuffle_delay(profile.idle_shuffle_interval_secs, rng);
                }
                let spot = staging::slot_position(player.position, &slot, brain.shuffle_offset);
                nav.request_destination(id, spot, STAGING_STOP_DISTANCE);

                if request_slot {
                    let from_waiting = brain.state == AgentState::Waiting;
                    if from_waiting {
                        brain.next_request_at = now + request_delay(profile, rng);
                    }
                    slot_requests.push((id, entity, agent.kind, from_waiting && !profile.auto_request));
                }
            }
            Directive::ApproachTarget => {
                nav.request_destination(id, player.position, profile.stop_distance);
            }
            Directive::BeginAttack => {
                nav.stop(id);
                brain.state = AgentState::Attacking;
                attack_starts.push((id, entity));
            }
            Directive::Recover => {
                brain.state = AgentState::Waiting;
                brain.staging = None;
                brain.next_request_at = now + request_delay(profile, rng);
                log::debug!("{id} recovered from stun at t={now:.3}");
            }
        }
    }

    slot_requests.sort_by_key(|r| r.0);
    for (id, entity, kind, waiting_without_auto) in slot_requests {
        if director_enabled && kind == AgentKind::Grunt {
            director::grant_request(world, pool, entity, id, events);
        } else if !waiting_without_auto {
            lifecycle::enter_combat(world, entity, false);
        }
    }

    attack_starts.sort_by_key(|a| a.0);
    for (_, entity) in attack_starts {
        cast::begin(world, entity, events, now);
    }
}

/// Ring index and ring size for staging placement. The boss stands alone.
fn ring_position(pool: &EngagementPool, id: AgentId, kind: AgentKind) -> (usize, usize) {
    match kind {
        AgentKind::Boss => (0, 1),
        AgentKind::Grunt => (pool.index_of(id).unwrap_or(0), pool.total()),
    }
}

fn request_delay(profile: &AgentProfile, rng: &mut ChaCha8Rng) -> f64 {
    staging::next_request_delay(
        profile.request_interval_min_secs,
        profile.request_interval_max_secs,
        rng,
    )
}
