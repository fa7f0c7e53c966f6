//! Ship motion integration and screen wrapping
//!
//! Ships wrap toroidally; bullets do not (they expire at the edge instead,
//! see `ship::Bullet::advance`).

use glam::Vec2;

use crate::consts::{DAMPING, HEIGHT, WIDTH};

/// Advance a ship one tick: integrate position, damp velocity, wrap into the
/// play area. Wrapping never touches velocity.
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2) {
    *pos += *vel;
    *vel *= DAMPING;
    *pos = wrap(*pos);
}

/// Wrap a position into `[0, WIDTH) x [0, HEIGHT)`. Exiting one edge
/// re-enters at the opposite edge.
pub fn wrap(p: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(p.x, WIDTH), wrap_axis(p.y, HEIGHT))
}

fn wrap_axis(v: f32, extent: f32) -> f32 {
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    let w = v.rem_euclid(extent);
    if w >= extent { w - extent } else { w }
}
