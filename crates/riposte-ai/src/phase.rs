//! Boss phase clock.
//!
//! Invulnerability is a pure function of elapsed time since spawn. There is
//! no stored flag to drift out of sync with the clock.

use riposte_core::components::BossPhaseClock;
use riposte_core::enums::BossPhase;

/// What a successful parry does to a boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParryVerdict {
    /// Invulnerable: the player takes punish damage, the boss is untouched.
    PunishPlayer,
    /// Breakable: the boss dies.
    KillBoss,
}

pub fn is_invulnerable(clock: &BossPhaseClock, now: f64) -> bool {
    now - clock.spawned_at < clock.invulnerable_secs
}

pub fn phase_at(clock: &BossPhaseClock, now: f64) -> BossPhase {
    if is_invulnerable(clock, now) {
        BossPhase::Survive
    } else {
        BossPhase::Breakable
    }
}

/// Seconds until the boss becomes breakable.
pub fn invulnerable_remaining(clock: &BossPhaseClock, now: f64) -> f64 {
    (clock.spawned_at + clock.invulnerable_secs - now).max(0.0)
}

pub fn parry_verdict(clock: &BossPhaseClock, now: f64) -> ParryVerdict {
    if is_invulnerable(clock, now) {
        ParryVerdict::PunishPlayer
    } else {
        ParryVerdict::KillBoss
    }
}
