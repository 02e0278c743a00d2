//! Fundamental identity, geometry and simulation-time types.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identity of a hostile agent. Assigned in spawn order, never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Identifies one strike of one attack cycle.
///
/// Every strike gets a fresh `generation` from its agent's counter. Inbound
/// confirmations carry the ticket they were issued for; a ticket that no
/// longer matches the agent's live cast is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastTicket {
    pub agent: AgentId,
    pub generation: u64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick at the given rate.
    ///
    /// Elapsed time is derived from the tick count rather than accumulated,
    /// so tick 15 at 30 Hz is exactly 0.5 s.
    pub fn advance(&mut self, tick_rate: u32) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 / tick_rate.max(1) as f64;
    }
}

/// Project onto the ground plane (Y up).
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal distance between two points, ignoring height.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(b - a).length()
}

/// Squared horizontal distance (for ordering without a sqrt).
pub fn horizontal_distance_sq(a: Vec3, b: Vec3) -> f32 {
    flatten(b - a).length_squared()
}

/// Unit horizontal direction from `from` to `to`, or `None` when the points coincide.
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let d = flatten(to - from);
    if d.length_squared() < 1e-4 {
        None
    } else {
        Some(d.normalize())
    }
}
