//! Facing and frontal-cone math on the ground plane.

use glam::{Quat, Vec3};

use riposte_core::types::{flatten, horizontal_direction, horizontal_distance};

/// Rotate `current` toward `desired` by at most `max_radians`.
///
/// Both are treated as horizontal directions. Returns a unit vector; a
/// degenerate `desired` leaves the facing unchanged.
pub fn turn_toward(current: Vec3, desired: Vec3, max_radians: f32) -> Vec3 {
    let from = flatten(current).normalize_or_zero();
    let to = flatten(desired).normalize_or_zero();
    if to == Vec3::ZERO {
        return if from == Vec3::ZERO { Vec3::Z } else { from };
    }
    if from == Vec3::ZERO {
        return to;
    }

    let angle = from.angle_between(to);
    if angle <= max_radians {
        return to;
    }

    // Positive cross.y means `to` is counter-clockwise around +Y.
    let sign = if from.cross(to).y >= 0.0 { 1.0 } else { -1.0 };
    let rotated = Quat::from_rotation_y(sign * max_radians) * from;
    flatten(rotated).normalize_or_zero()
}

/// Whether `to` lies inside the frontal cone `dot(forward, dir) > front_dot`.
///
/// A target standing exactly on the attacker counts as in front.
pub fn in_front_cone(forward: Vec3, from: Vec3, to: Vec3, front_dot: f32) -> bool {
    let Some(dir) = horizontal_direction(from, to) else {
        return true;
    };
    flatten(forward).normalize_or_zero().dot(dir) > front_dot
}

/// Whether `to` lies inside a cone of full width `cone_deg` around `forward`.
pub fn within_cone_angle(forward: Vec3, from: Vec3, to: Vec3, cone_deg: f32) -> bool {
    let Some(dir) = horizontal_direction(from, to) else {
        return true;
    };
    let half = (cone_deg * 0.5).to_radians();
    flatten(forward).normalize_or_zero().dot(dir) >= half.cos()
}

/// Melee reach test: in range and in the frontal cone.
pub fn strike_lands(
    attacker: Vec3,
    forward: Vec3,
    target: Vec3,
    attack_range: f32,
    front_dot: f32,
) -> bool {
    horizontal_distance(attacker, target) <= attack_range
        && in_front_cone(forward, attacker, target, front_dot)
}
