//! Steering decisions per archetype
//!
//! Each archetype produces one `Steer` per frame from a target context. The
//! decision is pure; `Ship::apply_steer` mutates the ship and the tick turns
//! `fire` into a bullet once the cooldown gate agrees.

use glam::Vec2;

use super::ship::{Archetype, Ship};
use crate::{bearing_deg, normalize_angle_deg};

/// How a ship should accelerate this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    /// No velocity change
    Coast,
    /// Decelerate (`vel *= BRAKE`)
    Brake,
    /// Accelerate along the post-turn facing, scaled relative to base accel
    Forward { scale: f32 },
    /// Accelerate along a world-space vector (sniper banding)
    Vector { accel: Vec2 },
}

/// One frame's steering decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steer {
    /// Degrees to add to the facing, already clamped to the turn-rate bound
    pub turn: f32,
    pub drive: Drive,
    /// Whether the archetype wants to fire (cooldown not yet consulted)
    pub fire: bool,
}

/// Target passed to `decide`. Drones may be handed the protected player
/// instead of a hostile; they hold fire in that case.
#[derive(Debug, Clone, Copy)]
pub struct TargetContext {
    pub pos: Vec2,
    pub is_hostile: bool,
}

impl Archetype {
    /// Compute this frame's steering toward the given target
    pub fn decide(self, ship: &Ship, target: TargetContext) -> Steer {
        let to_target = target.pos - ship.pos;
        let dist = to_target.length();
        // Angular error, shortest path, evaluated before turning; fire
        // windows use this pre-turn error.
        let err = normalize_angle_deg(bearing_deg(ship.pos, target.pos) - ship.angle);
        let turn = err.clamp(-ship.rot_speed, ship.rot_speed);

        match self {
            Archetype::Chaser => Steer {
                turn,
                drive: if dist > 150.0 {
                    Drive::Forward { scale: 0.5 }
                } else {
                    Drive::Brake
                },
                fire: err.abs() < 10.0,
            },

            Archetype::Sniper => {
                // Preferred engagement band: retreat under 200, close over
                // 500, strafe in between. A zero-length line of sight skips
                // the thrust in every branch.
                let drive = match to_target.try_normalize() {
                    None => Drive::Coast,
                    Some(dir) => {
                        if dist < 200.0 {
                            Drive::Vector { accel: -dir * ship.accel }
                        } else if dist > 500.0 {
                            Drive::Vector { accel: dir * ship.accel }
                        } else {
                            let perp = Vec2::new(-dir.y, dir.x);
                            Drive::Vector { accel: perp * ship.accel * 0.5 }
                        }
                    }
                };
                Steer { turn, drive, fire: err.abs() < 15.0 }
            }

            Archetype::Drone => Steer {
                turn,
                drive: if dist > 50.0 {
                    Drive::Forward { scale: 1.0 }
                } else {
                    Drive::Brake
                },
                fire: target.is_hostile && err.abs() < 10.0 && dist < 200.0,
            },
        }
    }
}

/// Pick a drone's target: nearest hostile by Euclidean distance, falling back
/// to escorting the player when no hostiles remain.
pub fn drone_target(drone_pos: Vec2, hostiles: &[super::ship::Hostile], player_pos: Vec2) -> TargetContext {
    hostiles
        .iter()
        .map(|h| h.ship.pos)
        .min_by(|a, b| {
            a.distance_squared(drone_pos)
                .total_cmp(&b.distance_squared(drone_pos))
        })
        .map(|pos| TargetContext { pos, is_hostile: true })
        .unwrap_or(TargetContext { pos: player_pos, is_hostile: false })
}
