//! Inputs to the simulation.
//!
//! Both kinds are queued and processed at the next tick boundary: player
//! commands first, then collaborator events, each in arrival order.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{AgentId, CastTicket};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Encounter control ---
    /// Leave Setup and start the fight.
    StartEncounter,
    /// Freeze the simulation clock.
    Pause,
    /// Unfreeze the simulation clock.
    Resume,

    // --- Player state ---
    /// Report the player's current pose from the character controller.
    SetPlayerPose { position: Vec3, facing: Vec3 },
    /// Press the parry button.
    ///
    /// `at` is the host's timestamp of the press when it falls between tick
    /// boundaries; absent, the press is stamped with the tick it is processed
    /// on. Timestamps past that tick are clamped to it. Strikes are judged at
    /// their scheduled damage frame, so a press stamped shortly after a frame
    /// that fell inside the same tick can still earn the late-press grace.
    Parry {
        #[serde(default)]
        at: Option<f64>,
    },
    /// Swing the player's weapon.
    Attack,
}

/// Callbacks from collaborators outside the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExternalEvent {
    /// The animation system reached the damage frame of the given strike.
    ConfirmDamageWindow { ticket: CastTicket },
    /// Stun from a source other than a parry.
    ApplyStun { agent: AgentId, secs: f64 },
    /// The spawner removed an agent.
    Despawn { agent: AgentId },
}
