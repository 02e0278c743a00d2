//! Damage collaborator boundary.
//!
//! Resolved strikes hand their damage to a `DamageSink` rather than touching
//! a health pool directly. `PlayerState` is the built-in sink.

use riposte_core::events::CombatEvent;

/// Receiver of damage dealt by agent strikes.
pub trait DamageSink {
    /// Apply `amount` at `now`, pushing whatever events it causes.
    /// Returns whether the damage landed.
    fn apply_damage(&mut self, amount: i32, now: f64, events: &mut Vec<CombatEvent>) -> bool;
}
