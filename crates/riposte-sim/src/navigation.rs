//! Navigation collaborator boundary.
//!
//! The combat core never plans paths. It asks a `Navigation` implementation
//! to move agents and reads back where they are. `DirectNavigation` is the
//! built-in headless implementation: straight-line motion at a fixed speed,
//! used by tests and by hosts without a navmesh.

use std::collections::BTreeMap;

use glam::Vec3;

use riposte_core::types::{flatten, horizontal_distance, AgentId};

/// Default agent move speed (m/s).
pub const DEFAULT_MOVE_SPEED: f32 = 3.5;

/// Movement capability consumed by the combat core.
pub trait Navigation {
    /// Put a newly spawned agent at `position`.
    fn place(&mut self, agent: AgentId, position: Vec3);

    /// Start moving toward `point`, stopping within `stopping_distance` of it.
    fn request_destination(&mut self, agent: AgentId, point: Vec3, stopping_distance: f32);

    /// `None` when the collaborator cannot report a position right now.
    fn current_position(&self, agent: AgentId) -> Option<Vec3>;

    fn current_velocity(&self, agent: AgentId) -> Option<Vec3>;

    /// Halt in place, dropping any destination.
    fn stop(&mut self, agent: AgentId);

    /// The agent is gone; free whatever is held for it.
    fn release(&mut self, agent: AgentId);

    /// Integrate motion. Collaborators driven by an external clock leave this as a no-op.
    fn advance(&mut self, _dt: f64) {}
}

#[derive(Debug, Clone)]
struct Body {
    position: Vec3,
    velocity: Vec3,
    destination: Option<(Vec3, f32)>,
}

/// Straight-line kinematic navigation.
#[derive(Debug, Clone)]
pub struct DirectNavigation {
    bodies: BTreeMap<AgentId, Body>,
    speed: f32,
    available: bool,
}

impl Default for DirectNavigation {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_SPEED)
    }
}

impl DirectNavigation {
    pub fn new(speed: f32) -> Self {
        Self {
            bodies: BTreeMap::new(),
            speed,
            available: true,
        }
    }

    /// Move an agent instantly, cancelling its destination.
    pub fn teleport(&mut self, agent: AgentId, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.position = position;
            body.velocity = Vec3::ZERO;
            body.destination = None;
        }
    }

    /// Simulate the collaborator dropping out (no positions reported, no motion).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn destination(&self, agent: AgentId) -> Option<Vec3> {
        self.bodies.get(&agent)?.destination.map(|(p, _)| p)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn tracked(&self) -> usize {
        self.bodies.len()
    }
}

impl Navigation for DirectNavigation {
    fn place(&mut self, agent: AgentId, position: Vec3) {
        self.bodies.insert(
            agent,
            Body {
                position,
                velocity: Vec3::ZERO,
                destination: None,
            },
        );
    }

    fn request_destination(&mut self, agent: AgentId, point: Vec3, stopping_distance: f32) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.destination = Some((point, stopping_distance.max(0.0)));
        }
    }

    fn current_position(&self, agent: AgentId) -> Option<Vec3> {
        if !self.available {
            return None;
        }
        self.bodies.get(&agent).map(|b| b.position)
    }

    fn current_velocity(&self, agent: AgentId) -> Option<Vec3> {
        if !self.available {
            return None;
        }
        self.bodies.get(&agent).map(|b| b.velocity)
    }

    fn stop(&mut self, agent: AgentId) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.destination = None;
            body.velocity = Vec3::ZERO;
        }
    }

    fn release(&mut self, agent: AgentId) {
        self.bodies.remove(&agent);
    }

    fn advance(&mut self, dt: f64) {
        if !self.available {
            return;
        }
        let dt = dt as f32;
        for body in self.bodies.values_mut() {
            let Some((point, stopping)) = body.destination else {
                body.velocity = Vec3::ZERO;
                continue;
            };

            let remaining = horizontal_distance(body.position, point) - stopping;
            if remaining <= 0.0 {
                body.destination = None;
                body.velocity = Vec3::ZERO;
                continue;
            }

            let dir = flatten(point - body.position).normalize_or_zero();
            let step = (self.speed * dt).min(remaining);
            body.position += dir * step;
            body.velocity = if dt > 0.0 { dir * (step / dt) } else { Vec3::ZERO };
            if step >= remaining {
                body.destination = None;
            }
        }
    }
}
