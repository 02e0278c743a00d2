//! Errors at the engine API boundary.
//!
//! Gameplay hazards (stale targets, duplicate confirmations, late callbacks)
//! are recovered inside the systems and never show up here.

use thiserror::Error;

use riposte_core::error::ConfigError;
use riposte_core::types::AgentId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("a boss is already present ({0})")]
    BossAlreadyPresent(AgentId),

    #[error("invalid combat config: {0}")]
    Config(#[from] ConfigError),
}
