//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only) plus the engine state they touch explicitly. They do not own
//! state. All state lives in components or in the engine.

pub mod agent_ai;
pub mod boss;
pub mod cast;
pub mod cleanup;
pub mod director;
pub mod player_attack;
pub mod snapshot;
