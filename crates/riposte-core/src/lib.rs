//! Core types and definitions for the riposte combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, events, snapshots, configuration, constants and the
//! timing window primitive. It holds no ECS world and no engine.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod window;

#[cfg(test)]
mod tests;
