//! Combat encounter simulation for riposte.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces CombatSnapshots for presentation.

pub mod damage;
pub mod engagement;
pub mod engine;
pub mod error;
mod lifecycle;
pub mod navigation;
pub mod parry;
pub mod player;
pub mod resolution;
pub mod systems;
pub mod world_setup;

pub use damage::DamageSink;
pub use engine::{SimConfig, SimulationEngine};
pub use error::SimError;
pub use navigation::{DirectNavigation, Navigation};
pub use riposte_core as core;
