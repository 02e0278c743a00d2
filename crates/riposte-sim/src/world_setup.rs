//! Entity spawn factories for hostile agents.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;

use riposte_core::components::*;
use riposte_core::config::{AgentProfile, BossConfig};
use riposte_core::enums::AgentKind;
use riposte_core::types::AgentId;

use riposte_ai::staging::next_request_delay;

fn initial_brain<R: Rng + ?Sized>(
    position: Vec3,
    profile: &AgentProfile,
    rng: &mut R,
    now: f64,
) -> Brain {
    Brain {
        last_known_position: position,
        next_request_at: now
            + next_request_delay(
                profile.request_interval_min_secs,
                profile.request_interval_max_secs,
                rng,
            ),
        // Shuffle right away so freshly spawned agents do not stand in a perfect ring.
        next_shuffle_at: now,
        ..Brain::default()
    }
}

/// Spawn a rank-and-file agent.
pub fn spawn_grunt<R: Rng + ?Sized>(
    world: &mut World,
    id: AgentId,
    profile: &AgentProfile,
    position: Vec3,
    rng: &mut R,
    now: f64,
) -> Entity {
    world.spawn((
        Agent {
            id,
            kind: AgentKind::Grunt,
        },
        initial_brain(position, profile, rng, now),
        Health {
            current: profile.max_hp,
            max: profile.max_hp,
        },
        profile.clone(),
    ))
}

/// Spawn the boss. Its phase clock starts now.
pub fn spawn_boss<R: Rng + ?Sized>(
    world: &mut World,
    id: AgentId,
    boss: &BossConfig,
    position: Vec3,
    rng: &mut R,
    now: f64,
) -> Entity {
    world.spawn((
        Agent {
            id,
            kind: AgentKind::Boss,
        },
        initial_brain(position, &boss.profile, rng, now),
        Health {
            current: boss.profile.max_hp,
            max: boss.profile.max_hp,
        },
        boss.profile.clone(),
        BossPhaseClock {
            spawned_at: now,
            invulnerable_secs: boss.invulnerable_secs,
        },
        BossMarker {
            punish_damage: boss.punish_damage,
            ..BossMarker::default()
        },
    ))
}
