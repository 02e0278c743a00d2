//! Staging ring geometry and idle timers.
//!
//! Agents without a slot hold a spot on a ring around the target. The angle
//! comes from the agent's index among registered agents with a little jitter
//! so the ring never looks perfectly regular; the spot follows the target.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use riposte_core::components::StagingSlot;
use riposte_core::constants::{IDLE_SHUFFLE_JITTER_SECS, STAGING_ANGLE_JITTER};

/// Shortest delay between shuffle re-rolls.
const MIN_SHUFFLE_DELAY_SECS: f64 = 0.05;

/// Roll a staging slot for the agent at `index` of `total` registered agents.
pub fn roll_slot<R: Rng + ?Sized>(
    index: usize,
    total: usize,
    ring_radius: f32,
    ring_jitter: f32,
    rng: &mut R,
) -> StagingSlot {
    let base = index as f32 / total.max(1) as f32 * TAU;
    let angle = base + rng.gen_range(-STAGING_ANGLE_JITTER..=STAGING_ANGLE_JITTER);
    let radius = if ring_jitter > 0.0 {
        ring_radius + rng.gen_range(-ring_jitter..=ring_jitter)
    } else {
        ring_radius
    };
    StagingSlot {
        angle,
        radius: radius.max(0.0),
    }
}

/// World-space point of a staging slot around `target`.
pub fn slot_position(target: Vec3, slot: &StagingSlot, shuffle_offset: Vec3) -> Vec3 {
    let offset = Vec3::new(slot.angle.cos(), 0.0, slot.angle.sin()) * slot.radius;
    Vec3::new(target.x, 0.0, target.z) + offset + shuffle_offset
}

/// Uniform random point inside a horizontal disk of `radius`.
pub fn roll_shuffle_offset<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    if radius <= 0.0 {
        return Vec3::ZERO;
    }
    let r = radius * rng.gen::<f32>().sqrt();
    let theta = rng.gen_range(0.0..TAU);
    Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
}

/// Delay until the next idle shuffle: `interval ± 0.4 s`.
pub fn next_shuffle_delay<R: Rng + ?Sized>(interval: f64, rng: &mut R) -> f64 {
    let jitter = rng.gen_range(-IDLE_SHUFFLE_JITTER_SECS..=IDLE_SHUFFLE_JITTER_SECS);
    (interval + jitter).max(MIN_SHUFFLE_DELAY_SECS)
}

/// Delay until a Waiting agent next asks for a slot.
pub fn next_request_delay<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
