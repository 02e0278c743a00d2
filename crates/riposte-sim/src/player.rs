//! Player-side combat state: pose, health with i-frames, parry and melee cooldown.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use riposte_core::config::CombatConfig;
use riposte_core::events::CombatEvent;
use riposte_core::state::PlayerView;

use crate::damage::DamageSink;
use crate::parry::PlayerParry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    pub facing: Vec3,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub invulnerable_until: f64,
    /// I-frame span granted by each hit that lands.
    pub invulnerable_secs: f64,
    pub next_attack_at: f64,
    pub parry: PlayerParry,
}

impl PlayerState {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            facing: Vec3::Z,
            hp: config.player.max_hp,
            max_hp: config.player.max_hp,
            alive: true,
            invulnerable_until: 0.0,
            invulnerable_secs: config.player.invulnerable_secs,
            next_attack_at: 0.0,
            parry: PlayerParry::new(&config.parry),
        }
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        now < self.invulnerable_until
    }

    pub fn view(&self, now: f64) -> PlayerView {
        PlayerView {
            position: self.position,
            facing: self.facing,
            hp: self.hp,
            max_hp: self.max_hp,
            alive: self.alive,
            invulnerable: self.is_invulnerable(now),
            parry_armed: self.parry.is_open(now),
            parry_ready: self.parry.is_ready(now),
            in_riposte_window: self.parry.in_riposte_window(now),
        }
    }
}

impl DamageSink for PlayerState {
    /// Apply damage unless dead or inside i-frames. Returns whether it landed.
    fn apply_damage(&mut self, amount: i32, now: f64, events: &mut Vec<CombatEvent>) -> bool {
        if !self.alive || amount <= 0 {
            return false;
        }
        if self.is_invulnerable(now) {
            log::debug!("player damage {amount} absorbed by i-frames at t={now:.3}");
            return false;
        }

        self.invulnerable_until = now + self.invulnerable_secs;
        self.hp -= amount;
        events.push(CombatEvent::PlayerDamaged {
            amount,
            remaining: self.hp.max(0),
        });

        if self.hp <= 0 {
            self.hp = 0;
            self.alive = false;
            log::info!("player died at t={now:.3}");
            events.push(CombatEvent::PlayerDied);
        }
        true
    }
}
