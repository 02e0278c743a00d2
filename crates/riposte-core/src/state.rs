//! Combat snapshot: the complete visible state handed to presentation each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{AgentId, SimTime};

/// Complete combat state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    pub phase: EncounterPhase,
    pub player: PlayerView,
    /// Sorted by id.
    pub agents: Vec<AgentView>,
    /// `None` in solo scenes.
    pub director: Option<DirectorView>,
    pub boss: Option<BossView>,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<CombatEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub facing: Vec3,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub invulnerable: bool,
    /// An unconsumed parry press is pending.
    pub parry_armed: bool,
    pub parry_ready: bool,
    pub in_riposte_window: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub kind: AgentKind,
    pub state: AgentState,
    pub engaged: bool,
    pub position: Vec3,
    pub facing: Vec3,
    pub hp: i32,
    pub combo_progress: u32,
    /// Facing is locked by an in-flight cast.
    pub casting: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorView {
    pub registered: usize,
    pub engaged: Vec<AgentId>,
    pub max_engaged: usize,
    pub next_select_at: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub agent: AgentId,
    pub phase: BossPhase,
    /// Seconds until the boss becomes breakable (0 once it is).
    pub invulnerable_remaining: f64,
}
