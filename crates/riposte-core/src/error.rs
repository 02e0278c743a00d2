//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse combat config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a finite, non-negative duration (got {value})")]
    InvalidDuration { field: &'static str, value: f64 },

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("front_dot must lie in [-1, 1] (got {0})")]
    FrontDotOutOfRange(f32),

    #[error("director max_engaged must be at least 1")]
    ZeroEngagementSlots,

    #[error("combo_hits must be at least 1")]
    ZeroComboHits,

    #[error("request interval is inverted: min {min} > max {max}")]
    InvertedRequestInterval { min: f64, max: f64 },
}
