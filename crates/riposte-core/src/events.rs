//! Presentation signals emitted by the simulation.
//!
//! Fire-and-forget: the core never waits on a reply. Events are collected
//! during a tick and drained into that tick's snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AgentId, CastTicket};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    // --- Encounter ---
    EncounterPhaseChanged { phase: EncounterPhase },
    EncounterCleared,

    // --- Engagement ---
    EngagementGranted { agent: AgentId },
    EngagementReleased { agent: AgentId },

    // --- Casts ---
    /// A strike's windup began. Drives the telegraph flash and animation trigger.
    AttackTelegraph {
        agent: AgentId,
        ticket: CastTicket,
        strike: u32,
    },
    /// A multi-hit sequence began.
    ComboBegin { agent: AgentId, hits: u32 },
    HitConfirmed { agent: AgentId, damage: i32 },
    Missed { agent: AgentId },
    Parried { agent: AgentId, stun_secs: f64 },
    /// A parry against an invulnerable boss backfired.
    ParryPunished { agent: AgentId, damage: i32 },

    // --- Agent lifecycle ---
    AgentStunned { agent: AgentId, until: f64 },
    AgentDied { agent: AgentId, cause: DeathCause },
    BossPhaseChanged { agent: AgentId, phase: BossPhase },

    // --- Player ---
    ParryArmed { at: f64 },
    PlayerStrike { target: Option<AgentId> },
    PlayerDamaged { amount: i32, remaining: i32 },
    PlayerDied,
}
