//! Entity types: ships, bullets, explosions
//!
//! A single `Ship` struct carries the kinematic fields shared by the player,
//! hostiles and drones; AI behavior is injected via `Archetype` (see `ai`).

use glam::Vec2;

use super::ai::{Drive, Steer};
use super::kinematics;
use crate::consts::*;
use crate::{Rgb, heading};

/// Fixed AI behavior variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    /// Closes to short range and pressures the target
    Chaser,
    /// Holds a 200-500 px engagement band, strafing inside it
    Sniper,
    /// Friendly escort; hunts the nearest hostile
    Drone,
}

/// Which population fired a bullet. `Player` and `Drone` are both friendly;
/// only `Player` kills earn score and tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Drone,
    Hostile,
}

/// A ship: the player, a hostile, or an escort drone
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle in degrees, 0 = +x
    pub angle: f32,
    pub accel: f32,
    /// Turn-rate bound in degrees per tick
    pub rot_speed: f32,
    pub max_speed: f32,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    pub color: Rgb,
    pub last_shot_ms: u64,
    pub cooldown_ms: u64,
    /// Render-only flame flag, set while the player holds thrust
    pub thrust: bool,
}

impl Ship {
    fn base(pos: Vec2, color: Rgb, now_ms: u64) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            accel: 0.2,
            rot_speed: 3.0,
            max_speed: 5.0,
            radius: 15.0,
            health: 100,
            max_health: 100,
            color,
            last_shot_ms: now_ms,
            cooldown_ms: 500,
            thrust: false,
        }
    }

    /// The player's ship, spawned at the center of the play area
    pub fn player(now_ms: u64) -> Self {
        Self::base(Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), YELLOW, now_ms)
    }

    /// A friendly escort drone: lighter, faster, shorter cooldown
    pub fn drone(pos: Vec2, now_ms: u64) -> Self {
        Self {
            accel: 0.3,
            rot_speed: 4.0,
            max_speed: 6.0,
            radius: 10.0,
            health: 50,
            max_health: 50,
            cooldown_ms: 800,
            ..Self::base(pos, CYAN, now_ms)
        }
    }

    pub fn cooldown_ready(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) >= self.cooldown_ms
    }

    pub fn mark_fired(&mut self, now_ms: u64) {
        self.last_shot_ms = now_ms;
    }

    /// Integrate one tick of motion (position, damping, screen wrap)
    pub fn integrate(&mut self) {
        kinematics::integrate(&mut self.pos, &mut self.vel);
    }

    /// Accelerate along the current facing, clamped to max speed
    pub fn thrust_forward(&mut self, scale: f32) {
        self.vel += heading(self.angle) * self.accel * scale;
        self.vel = self.vel.clamp_length_max(self.max_speed);
    }

    /// Apply a steering decision: turn first, then drive
    pub fn apply_steer(&mut self, steer: &Steer) {
        self.angle += steer.turn;
        match steer.drive {
            Drive::Coast => {}
            Drive::Brake => self.vel *= BRAKE,
            Drive::Forward { scale } => self.thrust_forward(scale),
            Drive::Vector { accel } => {
                self.vel += accel;
                self.vel = self.vel.clamp_length_max(self.max_speed);
            }
        }
    }
}

/// A hostile ship paired with its AI archetype
#[derive(Debug, Clone)]
pub struct Hostile {
    pub ship: Ship,
    pub archetype: Archetype,
}

impl Hostile {
    /// Spawn a hostile with the aggression multiplier baked into its
    /// acceleration, turn rate and (inversely) fire cooldown.
    pub fn spawn(archetype: Archetype, pos: Vec2, aggression: f32, now_ms: u64) -> Self {
        let (color, cooldown_ms) = match archetype {
            Archetype::Chaser => (RED, 1000),
            Archetype::Sniper => (GREEN, 1500),
            Archetype::Drone => (CYAN, 800),
        };
        let mut ship = Ship::base(pos, color, now_ms);
        ship.accel *= aggression;
        ship.rot_speed *= aggression;
        ship.cooldown_ms = (cooldown_ms as f32 / aggression) as u64;
        Self { ship, archetype }
    }

    /// Snipers are the token-granting archetype
    pub fn grants_token(&self) -> bool {
        self.archetype == Archetype::Sniper
    }
}

/// A projectile. Immutable after creation apart from motion and expiry.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub owner: Owner,
    pub spawn_ms: u64,
    pub expired: bool,
}

impl Bullet {
    /// Spawn from a ship's nose: inherits the firer's velocity plus muzzle
    /// speed along its facing.
    pub fn fired_by(ship: &Ship, owner: Owner, now_ms: u64) -> Self {
        Self {
            pos: ship.pos,
            vel: ship.vel + heading(ship.angle) * MUZZLE_SPEED,
            radius: BULLET_RADIUS,
            color: ship.color,
            owner,
            spawn_ms: now_ms,
            expired: false,
        }
    }

    /// Integrate one tick. Bullets do not wrap: leaving the play area expires
    /// them immediately, as does outliving their fixed lifetime.
    pub fn advance(&mut self, now_ms: u64) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > WIDTH || self.pos.y < 0.0 || self.pos.y > HEIGHT {
            self.expired = true;
        }
        if now_ms.saturating_sub(self.spawn_ms) >= BULLET_LIFETIME_MS {
            self.expired = true;
        }
    }
}

/// A purely cosmetic explosion: radius grows, opacity decays
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, radius: 5.0, alpha: 255.0 }
    }

    pub fn update(&mut self) {
        self.radius += 1.5;
        self.alpha = (self.alpha - 5.0).max(0.0);
    }

    pub fn finished(&self) -> bool {
        self.alpha <= 0.0
    }
}
