//! The player's parry: a cooldown-gated press feeding a single-use timing window.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use riposte_core::config::ParryConfig;
use riposte_core::enums::WindowMatch;
use riposte_core::types::horizontal_distance;
use riposte_core::window::TimingWindow;

/// A successful deflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParryCredit {
    pub stun_secs: f64,
    pub matched: WindowMatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerParry {
    window: TimingWindow,
    ready_at: f64,
    riposte_until: Option<f64>,
    radius: f32,
    stun_secs: f64,
    cooldown_secs: f64,
    riposte_secs: f64,
}

impl PlayerParry {
    pub fn new(config: &ParryConfig) -> Self {
        Self {
            window: TimingWindow::new(
                config.valid_secs,
                config.pre_grace_secs,
                config.post_grace_secs,
            ),
            ready_at: 0.0,
            riposte_until: None,
            radius: config.radius,
            stun_secs: config.stun_secs,
            cooldown_secs: config.cooldown_secs,
            riposte_secs: config.riposte_secs,
        }
    }

    /// Press the button. Ignored while on cooldown; returns whether the window was armed.
    pub fn press(&mut self, now: f64) -> bool {
        if now < self.ready_at {
            return false;
        }
        self.window.activate(now);
        self.ready_at = now + self.cooldown_secs;
        true
    }

    /// Resolve a parry attempt against an attacker at the damage instant `now`.
    ///
    /// An attacker outside the parry radius fails without touching the
    /// window. Otherwise the window is queried and, on success, consumed.
    pub fn try_parry(&mut self, attacker: Vec3, player: Vec3, now: f64) -> Option<ParryCredit> {
        if horizontal_distance(attacker, player) > self.radius {
            return None;
        }
        let matched = self.window.query(now)?;
        self.riposte_until = Some(now + self.riposte_secs);
        Some(ParryCredit {
            stun_secs: self.stun_secs,
            matched,
        })
    }

    pub fn is_ready(&self, now: f64) -> bool {
        now >= self.ready_at
    }

    pub fn is_armed(&self) -> bool {
        self.window.is_armed()
    }

    /// Whether a press is pending and could still be credited at `now`.
    pub fn is_open(&self, now: f64) -> bool {
        self.window.is_open(now)
    }

    pub fn in_riposte_window(&self, now: f64) -> bool {
        matches!(self.riposte_until, Some(until) if now < until)
    }

    pub fn window(&self) -> &TimingWindow {
        &self.window
    }
}
