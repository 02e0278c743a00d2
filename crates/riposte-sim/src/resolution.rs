//! Strike resolution: parry, hit or miss, decided exactly once per confirmed strike.
//!
//! The order is fixed. The parry window is queried first and consumed on
//! success; only when it fails is reach tested. The returned value carries
//! exactly one outcome, so the parry branch and the hit/miss branch can never
//! both run for the same strike.

use glam::Vec3;

use riposte_core::config::AgentProfile;
use riposte_core::enums::StrikeResult;
use riposte_core::types::horizontal_direction;

use riposte_ai::facing::strike_lands;

use crate::player::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Parried { stun_secs: f64 },
    Hit { damage: i32 },
    Miss,
}

impl Resolution {
    pub fn result(&self) -> StrikeResult {
        match self {
            Resolution::Parried { .. } => StrikeResult::Parried,
            Resolution::Hit { .. } => StrikeResult::Hit,
            Resolution::Miss => StrikeResult::Miss,
        }
    }
}

/// Resolve one strike at its damage instant.
///
/// `attacker` is the attacker's best-known position; `forward` is the
/// facing locked when the cast began. A dead player is a stale target and
/// always yields a miss. Damage is not applied here.
pub fn resolve_strike(
    attacker: Vec3,
    forward: Vec3,
    profile: &AgentProfile,
    player: &mut PlayerState,
    now: f64,
) -> Resolution {
    if !player.alive {
        return Resolution::Miss;
    }

    if let Some(credit) = player.parry.try_parry(attacker, player.position, now) {
        // The deflection snaps the player to face the attacker.
        if let Some(dir) = horizontal_direction(player.position, attacker) {
            player.facing = dir;
        }
        return Resolution::Parried {
            stun_secs: credit.stun_secs,
        };
    }

    if strike_lands(
        attacker,
        forward,
        player.position,
        profile.attack_range,
        profile.front_dot,
    ) {
        Resolution::Hit {
            damage: profile.melee_damage,
        }
    } else {
        Resolution::Miss
    }
}
