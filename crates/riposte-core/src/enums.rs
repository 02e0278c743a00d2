//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Combat state of a hostile agent. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    /// Holding a staging spot, periodically asking for a slot.
    #[default]
    Waiting,
    /// Back on the ring after a fight; re-requests a slot every tick.
    Staging,
    /// Holds a slot and closes to attack range.
    Approaching,
    /// Navigation suspended, cast routine running.
    Attacking,
    /// Knocked out of the fight until `stunned_until`.
    Stunned,
    /// Terminal.
    Dead,
}

impl AgentState {
    /// States in which an agent may hold an engagement slot.
    pub fn is_aggressive(self) -> bool {
        matches!(self, AgentState::Approaching | AgentState::Attacking)
    }

    /// States from which the director may grant a slot.
    pub fn is_idle(self) -> bool {
        matches!(self, AgentState::Waiting | AgentState::Staging)
    }
}

/// Agent archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    /// Rank-and-file arena enemy, scheduled by the engagement director.
    #[default]
    Grunt,
    /// Phase-gated boss; fights on its own schedule.
    Boss,
}

/// Boss phase, derived from elapsed time since spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Invulnerable. A parry punishes the player.
    #[default]
    Survive,
    /// Vulnerable. A parry kills the boss outright.
    Breakable,
}

/// How a cast learns that its damage frame has arrived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationMode {
    /// The end of the windup is the damage frame.
    #[default]
    CastTimer,
    /// Wait for an animation callback, with a failsafe timeout.
    AnimationEvent,
}

/// Outcome of a single strike resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeResult {
    Parried,
    Hit,
    Miss,
}

/// Which branch of a timing window accepted a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMatch {
    /// The event fell inside `[activation, activation + valid + pre_grace]`.
    OnTime,
    /// The input came slightly after the event, within `post_grace`.
    LatePress,
}

/// Why an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Health reached zero.
    Damage,
    /// Boss parried during its breakable phase.
    ParryKill,
}

/// Encounter (top-level) phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterPhase {
    #[default]
    Setup,
    Active,
    Paused,
    Victory,
    Defeat,
}
