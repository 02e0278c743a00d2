//! Tunable combat configuration.
//!
//! Every section is `#[serde(default)]`, so a partial JSON document only
//! overrides the fields it names.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ConfirmationMode;
use crate::error::ConfigError;

/// Complete combat configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub sim: SimSettings,
    pub player: PlayerConfig,
    pub parry: ParryConfig,
    pub grunt: AgentProfile,
    pub boss: BossConfig,
    /// `None` runs a solo scene where agents engage on their own.
    pub director: Option<DirectorConfig>,
}

impl CombatConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with the engagement director enabled.
    pub fn with_director() -> Self {
        Self {
            director: Some(DirectorConfig::default()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("sim.tick_rate", self.sim.tick_rate as f64)?;
        duration("sim.start_freeze_secs", self.sim.start_freeze_secs)?;
        duration("sim.corpse_linger_secs", self.sim.corpse_linger_secs)?;

        duration("player.invulnerable_secs", self.player.invulnerable_secs)?;
        duration("player.attack_cooldown_secs", self.player.attack_cooldown_secs)?;
        positive("player.attack_range", self.player.attack_range as f64)?;
        positive("player.attack_cone_deg", self.player.attack_cone_deg as f64)?;
        positive("player.max_hp", self.player.max_hp as f64)?;

        duration("parry.valid_secs", self.parry.valid_secs)?;
        duration("parry.pre_grace_secs", self.parry.pre_grace_secs)?;
        duration("parry.post_grace_secs", self.parry.post_grace_secs)?;
        duration("parry.stun_secs", self.parry.stun_secs)?;
        duration("parry.cooldown_secs", self.parry.cooldown_secs)?;
        duration("parry.riposte_secs", self.parry.riposte_secs)?;
        positive("parry.radius", self.parry.radius as f64)?;

        self.grunt.validate()?;
        self.boss.profile.validate()?;
        duration("boss.invulnerable_secs", self.boss.invulnerable_secs)?;

        if let Some(director) = &self.director {
            if director.max_engaged == 0 {
                return Err(ConfigError::ZeroEngagementSlots);
            }
            positive("director.select_interval_secs", director.select_interval_secs)?;
        }
        Ok(())
    }
}

fn duration(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub tick_rate: u32,
    pub start_freeze_secs: f64,
    pub corpse_linger_secs: f64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            start_freeze_secs: START_FREEZE_SECS,
            corpse_linger_secs: CORPSE_LINGER_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_hp: i32,
    pub invulnerable_secs: f64,
    pub attack_cooldown_secs: f64,
    pub attack_damage: i32,
    pub attack_range: f32,
    /// Full cone width in degrees.
    pub attack_cone_deg: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_hp: PLAYER_MAX_HP,
            invulnerable_secs: PLAYER_INVULNERABLE_SECS,
            attack_cooldown_secs: PLAYER_ATTACK_COOLDOWN_SECS,
            attack_damage: PLAYER_ATTACK_DAMAGE,
            attack_range: PLAYER_ATTACK_RANGE,
            attack_cone_deg: PLAYER_ATTACK_CONE_DEG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParryConfig {
    pub valid_secs: f64,
    pub pre_grace_secs: f64,
    pub post_grace_secs: f64,
    pub radius: f32,
    pub stun_secs: f64,
    pub cooldown_secs: f64,
    pub riposte_secs: f64,
}

impl Default for ParryConfig {
    fn default() -> Self {
        Self {
            valid_secs: PARRY_VALID_SECS,
            pre_grace_secs: PARRY_PRE_GRACE_SECS,
            post_grace_secs: PARRY_POST_GRACE_SECS,
            radius: PARRY_RADIUS,
            stun_secs: PARRY_STUN_SECS,
            cooldown_secs: PARRY_COOLDOWN_SECS,
            riposte_secs: RIPOSTE_WINDOW_SECS,
        }
    }
}

/// Per-archetype behavior tuning. Also attached to each agent as a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentProfile {
    pub sight_radius: f32,
    /// Degrees per second.
    pub turn_rate_deg: f32,
    pub attack_range: f32,
    /// Approach stopping distance from the target.
    pub stop_distance: f32,
    pub cast_secs: f64,
    pub melee_damage: i32,
    /// Cosine threshold of the frontal hit cone.
    pub front_dot: f32,
    pub ring_radius: f32,
    pub ring_jitter: f32,
    pub idle_shuffle_radius: f32,
    pub idle_shuffle_interval_secs: f64,
    pub reengage_delay_secs: f64,
    pub request_interval_min_secs: f64,
    pub request_interval_max_secs: f64,
    /// Whether Waiting agents ask for a slot on their own.
    pub auto_request: bool,
    pub combo_hits: u32,
    pub combo_gap_secs: f64,
    pub confirmation: ConfirmationMode,
    pub failsafe_secs: f64,
    pub max_hp: i32,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            sight_radius: SIGHT_RADIUS,
            turn_rate_deg: TURN_RATE_DEG,
            attack_range: GRUNT_ATTACK_RANGE,
            stop_distance: GRUNT_STOP_DISTANCE,
            cast_secs: GRUNT_CAST_SECS,
            melee_damage: GRUNT_MELEE_DAMAGE,
            front_dot: FRONT_DOT,
            ring_radius: STAGING_RING_RADIUS,
            ring_jitter: STAGING_RING_JITTER,
            idle_shuffle_radius: IDLE_SHUFFLE_RADIUS,
            idle_shuffle_interval_secs: IDLE_SHUFFLE_INTERVAL_SECS,
            reengage_delay_secs: GRUNT_REENGAGE_DELAY_SECS,
            request_interval_min_secs: REQUEST_INTERVAL_MIN_SECS,
            request_interval_max_secs: REQUEST_INTERVAL_MAX_SECS,
            auto_request: true,
            combo_hits: 1,
            combo_gap_secs: 0.0,
            confirmation: ConfirmationMode::CastTimer,
            failsafe_secs: CONFIRM_FAILSAFE_SECS,
            max_hp: GRUNT_MAX_HP,
        }
    }
}

impl AgentProfile {
    /// Boss defaults: longer reach, three-hit combo, animation-driven confirmation.
    pub fn boss() -> Self {
        Self {
            attack_range: BOSS_ATTACK_RANGE,
            stop_distance: BOSS_STOP_DISTANCE,
            reengage_delay_secs: BOSS_REENGAGE_DELAY_SECS,
            combo_hits: BOSS_COMBO_HITS,
            combo_gap_secs: BOSS_COMBO_GAP_SECS,
            confirmation: ConfirmationMode::AnimationEvent,
            max_hp: BOSS_MAX_HP,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("sight_radius", self.sight_radius as f64)?;
        positive("turn_rate_deg", self.turn_rate_deg as f64)?;
        positive("attack_range", self.attack_range as f64)?;
        positive("stop_distance", self.stop_distance as f64)?;
        positive("max_hp", self.max_hp as f64)?;
        duration("cast_secs", self.cast_secs)?;
        duration("idle_shuffle_interval_secs", self.idle_shuffle_interval_secs)?;
        duration("reengage_delay_secs", self.reengage_delay_secs)?;
        duration("request_interval_min_secs", self.request_interval_min_secs)?;
        duration("request_interval_max_secs", self.request_interval_max_secs)?;
        duration("combo_gap_secs", self.combo_gap_secs)?;
        duration("failsafe_secs", self.failsafe_secs)?;
        if !(-1.0..=1.0).contains(&self.front_dot) {
            return Err(ConfigError::FrontDotOutOfRange(self.front_dot));
        }
        if self.combo_hits == 0 {
            return Err(ConfigError::ZeroComboHits);
        }
        if self.request_interval_min_secs > self.request_interval_max_secs {
            return Err(ConfigError::InvertedRequestInterval {
                min: self.request_interval_min_secs,
                max: self.request_interval_max_secs,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub profile: AgentProfile,
    pub invulnerable_secs: f64,
    pub punish_damage: i32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            profile: AgentProfile::boss(),
            invulnerable_secs: BOSS_INVULNERABLE_SECS,
            punish_damage: BOSS_PUNISH_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    pub max_engaged: usize,
    pub select_interval_secs: f64,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            max_engaged: MAX_ENGAGED,
            select_interval_secs: DIRECTOR_INTERVAL_SECS,
        }
    }
}
