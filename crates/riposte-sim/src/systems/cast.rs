//! Cast routine: windup, damage confirmation, failsafe and combo gaps.
//!
//! Each strike carries a `CastTicket` and a confirmation `TimingWindow` that
//! is armed at windup end with the failsafe span as its valid duration. A
//! strike is resolved exactly once: by the windup end (cast-timer mode or a
//! latched confirmation), by a matching `ConfirmDamageWindow`, or by the
//! failsafe once the window has elapsed. The first two consume the window
//! and the failsafe disarms it, so the others find nothing left to resolve.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use riposte_core::components::*;
use riposte_core::config::{AgentProfile, CombatConfig};
use riposte_core::enums::{AgentKind, ConfirmationMode};
use riposte_core::events::CombatEvent;
use riposte_core::types::{AgentId, CastTicket};
use riposte_core::window::TimingWindow;

use riposte_ai::phase::{self, ParryVerdict};

use crate::damage::DamageSink;
use crate::engagement::EngagementPool;
use crate::lifecycle;
use crate::navigation::Navigation;
use crate::player::PlayerState;
use crate::resolution::{resolve_strike, Resolution};
use crate::systems::boss;

/// Start an attack sequence for an agent that just entered Attacking.
pub fn begin(world: &mut World, entity: Entity, events: &mut Vec<CombatEvent>, now: f64) {
    let cast = {
        let Ok((agent, profile, brain)) =
            world.query_one_mut::<(&Agent, &AgentProfile, &mut Brain)>(entity)
        else {
            return;
        };
        brain.cast_generation += 1;
        brain.combo_progress = 0;
        let ticket = CastTicket {
            agent: agent.id,
            generation: brain.cast_generation,
        };
        let strikes_total = profile.combo_hits.max(1);
        if strikes_total > 1 {
            events.push(CombatEvent::ComboBegin {
                agent: agent.id,
                hits: strikes_total,
            });
        }
        events.push(CombatEvent::AttackTelegraph {
            agent: agent.id,
            ticket,
            strike: 0,
        });
        Cast {
            ticket,
            strike: 0,
            strikes_total,
            phase: CastPhase::Windup {
                until: now + profile.cast_secs,
            },
            locked_forward: brain.facing,
            confirmation: TimingWindow::new(profile.failsafe_secs, 0.0, 0.0),
            confirm_latched: false,
        }
    };
    if let Err(err) = world.insert_one(entity, cast) {
        log::debug!("cast for despawned entity dropped: {err}");
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    WindupElapsed,
    Failsafe,
    NextStrike,
}

/// Advance every in-flight cast whose current phase has elapsed.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    player: &mut PlayerState,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
    now: f64,
) {
    let mut due: Vec<(AgentId, Entity, Step)> = world
        .query::<(&Agent, &Cast)>()
        .iter()
        .filter_map(|(entity, (agent, cast))| {
            let step = match cast.phase {
                CastPhase::Windup { until } if now >= until => Step::WindupElapsed,
                CastPhase::AwaitingConfirmation if !cast.confirmation.is_open(now) => {
                    Step::Failsafe
                }
                CastPhase::Gap { until } if now >= until => Step::NextStrike,
                _ => return None,
            };
            Some((agent.id, entity, step))
        })
        .collect();
    due.sort_by_key(|d| d.0);

    for (id, entity, step) in due {
        match step {
            Step::WindupElapsed => {
                let damage_frame = {
                    let Ok((profile, cast)) =
                        world.query_one_mut::<(&AgentProfile, &mut Cast)>(entity)
                    else {
                        continue;
                    };
                    let CastPhase::Windup { until } = cast.phase else {
                        continue;
                    };
                    cast.confirmation.activate(until);
                    cast.phase = CastPhase::AwaitingConfirmation;
                    let claimed = profile.confirmation == ConfirmationMode::CastTimer
                        || std::mem::take(&mut cast.confirm_latched);
                    (claimed && cast.confirmation.query(until).is_some()).then_some(until)
                };
                // Parries are judged at the scheduled damage frame, not the tick boundary.
                if let Some(strike_at) = damage_frame {
                    resolve_current(
                        world, entity, pool, nav, player, config, events, strike_at, now,
                    );
                }
            }
            Step::Failsafe => {
                if let Ok(mut cast) = world.get::<&mut Cast>(entity) {
                    cast.confirmation.disarm();
                }
                log::warn!("{id}: damage confirmation never arrived, resolving on failsafe");
                resolve_current(world, entity, pool, nav, player, config, events, now, now);
            }
            Step::NextStrike => next_strike(world, entity, events, now),
        }
    }
}

/// Inbound animation callback for a strike's damage frame.
///
/// Resolves immediately when it consumes the strike's armed confirmation
/// window, latches it when it arrives during windup, and ignores it otherwise
/// (stale, duplicate or past the failsafe deadline). Returns whether the
/// strike was resolved.
#[allow(clippy::too_many_arguments)]
pub fn confirm(
    world: &mut World,
    index: &BTreeMap<AgentId, Entity>,
    ticket: CastTicket,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    player: &mut PlayerState,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
    now: f64,
) -> bool {
    let Some(&entity) = index.get(&ticket.agent) else {
        log::debug!("confirmation for unknown {} ignored", ticket.agent);
        return false;
    };

    let resolve_now = {
        let Ok(mut cast) = world.get::<&mut Cast>(entity) else {
            log::debug!("{}: confirmation with no cast in flight ignored", ticket.agent);
            return false;
        };
        if cast.ticket != ticket {
            log::debug!(
                "{}: stale confirmation gen {} (current gen {}) ignored",
                ticket.agent,
                ticket.generation,
                cast.ticket.generation
            );
            return false;
        }
        match cast.phase {
            CastPhase::AwaitingConfirmation => match cast.confirmation.query(now) {
                Some(_) => true,
                None => {
                    log::debug!(
                        "{}: confirmation past the failsafe deadline ignored",
                        ticket.agent
                    );
                    false
                }
            },
            CastPhase::Windup { .. } => {
                if cast.confirm_latched {
                    log::debug!("{}: duplicate early confirmation ignored", ticket.agent);
                }
                cast.confirm_latched = true;
                false
            }
            CastPhase::Gap { .. } => {
                log::debug!("{}: confirmation for a resolved strike ignored", ticket.agent);
                false
            }
        }
    };

    if resolve_now {
        resolve_current(world, entity, pool, nav, player, config, events, now, now);
    }
    resolve_now
}

/// Resolve the current strike and apply its outcome.
///
/// `strike_at` is the damage instant the parry window is tested against;
/// everything the outcome schedules runs from `now`.
#[allow(clippy::too_many_arguments)]
fn resolve_current(
    world: &mut World,
    entity: Entity,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    player: &mut PlayerState,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
    strike_at: f64,
    now: f64,
) {
    let (agent, profile, forward, last_known, clock, punish_damage) = {
        let Ok((agent, profile, cast, brain, clock, marker)) = world.query_one_mut::<(
            &Agent,
            &AgentProfile,
            &Cast,
            &Brain,
            Option<&BossPhaseClock>,
            Option<&BossMarker>,
        )>(entity) else {
            return;
        };
        (
            *agent,
            profile.clone(),
            cast.locked_forward,
            brain.last_known_position,
            clock.copied(),
            marker.map(|m| m.punish_damage).unwrap_or(0),
        )
    };
    let id = agent.id;
    let attacker = nav.current_position(id).unwrap_or(last_known);

    let outcome = resolve_strike(attacker, forward, &profile, player, strike_at);
    log::debug!("{id}: strike {:?} at t={strike_at:.3}", outcome.result());
    match outcome {
        Resolution::Parried { stun_secs } => match (agent.kind, clock) {
            (AgentKind::Boss, Some(clock)) => match phase::parry_verdict(&clock, now) {
                ParryVerdict::PunishPlayer => {
                    log::info!("{id}: parried while invulnerable, punishing player");
                    events.push(CombatEvent::ParryPunished {
                        agent: id,
                        damage: punish_damage,
                    });
                    player.apply_damage(punish_damage, now, events);
                    lifecycle::leave_combat_to_staging(world, entity, pool, nav, events, now);
                }
                ParryVerdict::KillBoss => {
                    events.push(CombatEvent::Parried {
                        agent: id,
                        stun_secs: 0.0,
                    });
                    boss::parry_kill(
                        world,
                        entity,
                        pool,
                        nav,
                        events,
                        now,
                        config.sim.corpse_linger_secs,
                    );
                }
            },
            _ => {
                events.push(CombatEvent::Parried {
                    agent: id,
                    stun_secs,
                });
                lifecycle::apply_stun(world, entity, stun_secs, pool, nav, events, now);
            }
        },
        Resolution::Hit { damage } => {
            events.push(CombatEvent::HitConfirmed { agent: id, damage });
            player.apply_damage(damage, now, events);
            finish_strike(world, entity, pool, nav, events, now);
        }
        Resolution::Miss => {
            events.push(CombatEvent::Missed { agent: id });
            finish_strike(world, entity, pool, nav, events, now);
        }
    }
}

/// Count the strike; gap before the next one or end the sequence.
fn finish_strike(
    world: &mut World,
    entity: Entity,
    pool: &mut EngagementPool,
    nav: &mut dyn Navigation,
    events: &mut Vec<CombatEvent>,
    now: f64,
) {
    let sequence_done = {
        let Ok((profile, cast, brain)) =
            world.query_one_mut::<(&AgentProfile, &mut Cast, &mut Brain)>(entity)
        else {
            return;
        };
        brain.combo_progress += 1;
        if cast.strike + 1 < cast.strikes_total {
            cast.strike += 1;
            cast.phase = CastPhase::Gap {
                until: now + profile.combo_gap_secs,
            };
            false
        } else {
            true
        }
    };

    if sequence_done {
        lifecycle::leave_combat_to_staging(world, entity, pool, nav, events, now);
    }
}

/// Open the windup of the next combo strike under a fresh ticket.
fn next_strike(world: &mut World, entity: Entity, events: &mut Vec<CombatEvent>, now: f64) {
    let Ok((agent, profile, cast, brain)) =
        world.query_one_mut::<(&Agent, &AgentProfile, &mut Cast, &mut Brain)>(entity)
    else {
        return;
    };
    brain.cast_generation += 1;
    cast.ticket = CastTicket {
        agent: agent.id,
        generation: brain.cast_generation,
    };
    cast.phase = CastPhase::Windup {
        until: now + profile.cast_secs,
    };
    events.push(CombatEvent::AttackTelegraph {
        agent: agent.id,
        ticket: cast.ticket,
        strike: cast.strike,
    });
}
