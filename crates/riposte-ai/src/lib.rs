//! Agent decision logic for riposte.
//!
//! Implements the agent combat state machine, staging-ring placement,
//! facing/cone math and the boss phase clock as pure functions.

pub mod facing;
pub mod fsm;
pub mod phase;
pub mod staging;

pub use riposte_core as core;

#[cfg(test)]
mod tests;
