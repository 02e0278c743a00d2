//! Single-use timing window shared by parry and damage confirmation.
//!
//! A window is armed by `activate(now)` and answers `query(t)`:
//!
//! ```text
//! on time:    activation <= t <= activation + valid_duration + pre_grace   (valid_duration > 0)
//! late press: 0 <= activation - t <= post_grace                            (otherwise)
//! ```
//!
//! The on-time branch is checked first, so a query is matched by at most one
//! branch. A successful query disarms the window.

use serde::{Deserialize, Serialize};

use crate::enums::WindowMatch;

/// Single-use timing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingWindow {
    /// Instant of the most recent unconsumed activation.
    activated_at: Option<f64>,
    /// Length of the forward window after activation (seconds).
    pub valid_duration: f64,
    /// Extra forward tolerance for presses that came early (seconds).
    pub pre_grace: f64,
    /// Tolerance for presses that came after the event (seconds).
    pub post_grace: f64,
}

impl TimingWindow {
    pub fn new(valid_duration: f64, pre_grace: f64, post_grace: f64) -> Self {
        Self {
            activated_at: None,
            valid_duration,
            pre_grace,
            post_grace,
        }
    }

    /// Record an activation, replacing any earlier unconsumed one.
    pub fn activate(&mut self, now: f64) {
        self.activated_at = Some(now);
    }

    /// Drop any pending activation.
    pub fn disarm(&mut self) {
        self.activated_at = None;
    }

    /// Whether an activation is pending.
    pub fn is_armed(&self) -> bool {
        self.activated_at.is_some()
    }

    pub fn activated_at(&self) -> Option<f64> {
        self.activated_at
    }

    /// Test `t` against the window without consuming it.
    pub fn peek(&self, t: f64) -> Option<WindowMatch> {
        let activation = self.activated_at?;

        if self.valid_duration > 0.0
            && t >= activation
            && t <= activation + self.valid_duration + self.pre_grace
        {
            return Some(WindowMatch::OnTime);
        }

        let lateness = activation - t;
        if lateness >= 0.0 && lateness <= self.post_grace {
            return Some(WindowMatch::LatePress);
        }

        None
    }

    /// Test `t` against the window and consume it on success.
    pub fn query(&mut self, t: f64) -> Option<WindowMatch> {
        let matched = self.peek(t)?;
        self.activated_at = None;
        Some(matched)
    }

    /// Whether a query at `t` could still succeed for the pending activation.
    /// False once the window has been consumed or has fully elapsed.
    pub fn is_open(&self, t: f64) -> bool {
        match self.activated_at {
            Some(a) => t <= a + self.valid_duration + self.pre_grace,
            None => false,
        }
    }
}
