//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AgentId, CastTicket};
use crate::window::TimingWindow;

/// Identity of a hostile agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub kind: AgentKind,
}

/// Staging spot on the ring around the target, relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StagingSlot {
    /// Angle around the target (radians, measured in the XZ plane).
    pub angle: f32,
    pub radius: f32,
}

/// Combat state machine data for one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brain {
    pub state: AgentState,
    /// Whether the agent currently holds an engagement slot.
    pub engaged: bool,
    /// Earliest time the agent may start another attack.
    pub attack_ready_at: f64,
    /// Stun expiry; only meaningful while `state == Stunned`.
    pub stunned_until: f64,
    /// Next self-request for a slot (Waiting only).
    pub next_request_at: f64,
    /// Next idle shuffle re-roll.
    pub next_shuffle_at: f64,
    /// Rolled on entry to Waiting/Staging, cleared on engagement.
    pub staging: Option<StagingSlot>,
    /// Idle shuffle displacement added to the staging spot.
    pub shuffle_offset: Vec3,
    /// Horizontal unit facing.
    pub facing: Vec3,
    /// Last position the navigation collaborator reported.
    pub last_known_position: Vec3,
    /// Hits delivered in the current attack sequence.
    pub combo_progress: u32,
    /// Monotonic strike counter; every strike draws a fresh generation.
    pub cast_generation: u64,
}

impl Default for Brain {
    fn default() -> Self {
        Self {
            state: AgentState::Waiting,
            engaged: false,
            attack_ready_at: 0.0,
            stunned_until: 0.0,
            next_request_at: 0.0,
            next_shuffle_at: 0.0,
            staging: None,
            shuffle_offset: Vec3::ZERO,
            facing: Vec3::Z,
            last_known_position: Vec3::ZERO,
            combo_progress: 0,
            cast_generation: 0,
        }
    }
}

/// Where a strike is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CastPhase {
    /// Telegraph playing; the damage frame is at `until`.
    Windup { until: f64 },
    /// Confirmation window armed; waiting for a confirmation or the failsafe.
    AwaitingConfirmation,
    /// Between combo strikes.
    Gap { until: f64 },
}

/// In-flight attack sequence. Present only while the agent is Attacking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cast {
    /// Ticket of the current strike.
    pub ticket: CastTicket,
    /// Zero-based index of the current strike.
    pub strike: u32,
    pub strikes_total: u32,
    pub phase: CastPhase,
    /// Facing captured when the sequence began.
    pub locked_forward: Vec3,
    /// Damage confirmation for the current strike. Armed at windup end with
    /// the failsafe span as its valid duration; consumed by whichever of the
    /// confirmation or the cast timer claims the strike.
    pub confirmation: TimingWindow,
    /// A confirmation for the current ticket arrived during windup.
    pub confirm_latched: bool,
}

/// Integer hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Spawn instant and invulnerable span of a boss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossPhaseClock {
    pub spawned_at: f64,
    pub invulnerable_secs: f64,
}

/// Boss-only bookkeeping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BossMarker {
    /// The parry-kill has been credited.
    pub kill_credited: bool,
    /// `BossPhaseChanged` has been emitted.
    pub breakable_announced: bool,
    pub punish_damage: i32,
}

/// Despawn the entity once simulation time reaches this value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DespawnAt(pub f64);
