//! Simulation constants and default tuning parameters.
//!
//! Every tunable here is only a default: the live values come from
//! [`CombatConfig`](crate::config::CombatConfig).

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

// --- Encounter ---

/// Agent AI and casts stay frozen this long after the encounter starts.
pub const START_FREEZE_SECS: f64 = 1.0;

/// Dead agents stay in the world this long before being despawned.
pub const CORPSE_LINGER_SECS: f64 = 3.0;

// --- Player ---

pub const PLAYER_MAX_HP: i32 = 3;

/// Invulnerability after taking a hit.
pub const PLAYER_INVULNERABLE_SECS: f64 = 0.5;

pub const PLAYER_ATTACK_COOLDOWN_SECS: f64 = 0.7;
pub const PLAYER_ATTACK_DAMAGE: i32 = 1;
pub const PLAYER_ATTACK_RANGE: f32 = 1.6;

/// Full width of the player's strike cone (degrees).
pub const PLAYER_ATTACK_CONE_DEG: f32 = 80.0;

// --- Parry ---

pub const PARRY_VALID_SECS: f64 = 0.5;
pub const PARRY_PRE_GRACE_SECS: f64 = 0.0;
pub const PARRY_POST_GRACE_SECS: f64 = 0.06;

/// Attackers farther than this cannot be parried.
pub const PARRY_RADIUS: f32 = 1.3;

pub const PARRY_STUN_SECS: f64 = 3.0;
pub const PARRY_COOLDOWN_SECS: f64 = 2.0;
pub const RIPOSTE_WINDOW_SECS: f64 = 0.7;

// --- Grunt ---

pub const SIGHT_RADIUS: f32 = 20.0;

/// Turn rate toward the target (degrees per second).
pub const TURN_RATE_DEG: f32 = 720.0;

pub const GRUNT_ATTACK_RANGE: f32 = 1.2;

/// How close an approaching grunt walks before stopping.
pub const GRUNT_STOP_DISTANCE: f32 = 1.1;

pub const GRUNT_CAST_SECS: f64 = 0.5;
pub const GRUNT_MELEE_DAMAGE: i32 = 1;

/// Cosine threshold of the frontal hit cone.
pub const FRONT_DOT: f32 = 0.3;

pub const STAGING_RING_RADIUS: f32 = 5.0;
pub const STAGING_RING_JITTER: f32 = 0.6;

/// Angular jitter applied to a staging slot (radians, symmetric).
pub const STAGING_ANGLE_JITTER: f32 = 0.2;

pub const IDLE_SHUFFLE_RADIUS: f32 = 0.5;
pub const IDLE_SHUFFLE_INTERVAL_SECS: f64 = 2.2;

/// Symmetric jitter on the shuffle interval.
pub const IDLE_SHUFFLE_JITTER_SECS: f64 = 0.4;

pub const GRUNT_REENGAGE_DELAY_SECS: f64 = 1.2;
pub const REQUEST_INTERVAL_MIN_SECS: f64 = 1.0;
pub const REQUEST_INTERVAL_MAX_SECS: f64 = 2.0;

/// Maximum wait for an external damage confirmation, measured from windup end.
pub const CONFIRM_FAILSAFE_SECS: f64 = 3.0;

pub const GRUNT_MAX_HP: i32 = 50;

// --- Boss ---

/// Boss reach stays inside the parry radius so its strikes can be deflected.
pub const BOSS_ATTACK_RANGE: f32 = 1.25;
pub const BOSS_STOP_DISTANCE: f32 = 1.0;

pub const BOSS_COMBO_HITS: u32 = 3;
pub const BOSS_COMBO_GAP_SECS: f64 = 0.25;
pub const BOSS_REENGAGE_DELAY_SECS: f64 = 2.0;
pub const BOSS_MAX_HP: i32 = 99_999;
pub const BOSS_INVULNERABLE_SECS: f64 = 30.0;

/// Damage dealt to the player when a parry lands during the invulnerable phase.
pub const BOSS_PUNISH_DAMAGE: i32 = 1;

// --- Director ---

pub const MAX_ENGAGED: usize = 2;
pub const DIRECTOR_INTERVAL_SECS: f64 = 3.0;
