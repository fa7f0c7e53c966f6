//! Star Skirmish - wave-based 2D space combat
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, steering AI, collisions, waves)
//! - `render`: Per-frame scene snapshot handed to an external renderer
//! - `highscores`: SQLite-backed leaderboard

pub mod highscores;
pub mod render;
pub mod sim;

pub use highscores::ScoreStore;

use glam::Vec2;

/// RGB color triple, shared between sim entities and scene primitives
pub type Rgb = [u8; 3];

/// Game configuration constants
pub mod consts {
    use super::{Rect, Rgb};

    /// Play area dimensions (pixels)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
    /// Target frame rate; the simulation advances exactly one tick per frame
    pub const FPS: u64 = 60;

    /// Velocity damping applied to every ship each tick
    pub const DAMPING: f32 = 0.99;
    /// Velocity retained when an AI ship decelerates instead of thrusting
    pub const BRAKE: f32 = 0.95;

    /// Muzzle speed added along the firer's facing when a bullet spawns
    pub const MUZZLE_SPEED: f32 = 10.0;
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_LIFETIME_MS: u64 = 2000;

    /// Damage a friendly bullet deals to a hostile ship
    pub const BULLET_DAMAGE_HOSTILE: i32 = 20;
    /// Damage a hostile bullet deals to the player or a drone
    pub const BULLET_DAMAGE_FRIENDLY: i32 = 10;
    /// Score awarded per hostile destroyed by a player-owned bullet
    pub const KILL_SCORE: u32 = 100;

    /// Force field lifetime once activated
    pub const FORCE_FIELD_DURATION_MS: u64 = 20_000;
    /// Lifetime budget of free force-field activations per session
    pub const FREE_FIELD_ACTIVATIONS: u32 = 5;
    /// Tokens per activation once the free budget is spent
    pub const FIELD_TOKEN_COST: u32 = 1;

    /// Drones deployed per trigger, spread evenly around the player
    pub const DRONE_DEPLOY_COUNT: u32 = 3;
    pub const DRONE_DEPLOY_RADIUS: f32 = 30.0;

    pub const BLACK: Rgb = [0, 0, 0];
    pub const WHITE: Rgb = [255, 255, 255];
    pub const YELLOW: Rgb = [255, 255, 0];
    pub const RED: Rgb = [255, 0, 0];
    pub const GREEN: Rgb = [0, 255, 0];
    pub const ORANGE: Rgb = [255, 165, 0];
    pub const CYAN: Rgb = [0, 255, 255];
    pub const BLUE: Rgb = [0, 0, 255];

    /// Start-screen name entry box
    pub const NAME_BOX: Rect = Rect {
        x: WIDTH / 2.0 - 150.0,
        y: HEIGHT / 2.0 - 60.0,
        w: 300.0,
        h: 40.0,
    };
    /// Start-screen play button
    pub const PLAY_BUTTON: Rect = Rect {
        x: WIDTH / 2.0 - 75.0,
        y: HEIGHT / 2.0 + 80.0,
        w: 150.0,
        h: 50.0,
    };
}

/// Axis-aligned rectangle used for UI hit testing and scene primitives
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// Wrap an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_angle_deg(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Unit vector for a facing angle in degrees (0 = +x, screen y grows downward)
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let r = angle_deg.to_radians();
    Vec2::new(r.cos(), -r.sin())
}

/// Facing angle from one point toward another, in degrees
#[inline]
pub fn bearing_deg(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    (-d.y).atan2(d.x).to_degrees()
}

/// Rotate a ship-local offset into world space for a given facing angle
#[inline]
pub fn rotate_deg(v: Vec2, angle_deg: f32) -> Vec2 {
    let r = angle_deg.to_radians();
    let (sin, cos) = r.sin_cos();
    Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_deg() {
        assert_eq!(normalize_angle_deg(0.0), 0.0);
        assert_eq!(normalize_angle_deg(190.0), -170.0);
        assert_eq!(normalize_angle_deg(-190.0), 170.0);
        assert_eq!(normalize_angle_deg(360.0), 0.0);
        assert_eq!(normalize_angle_deg(-180.0), -180.0);
    }

    #[test]
    fn test_heading_cardinals() {
        assert!((heading(0.0) - Vec2::X).length() < 1e-6);
        // 90 degrees points up the screen (negative y)
        assert!((heading(90.0) - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_bearing_matches_heading() {
        let from = Vec2::new(100.0, 100.0);
        for angle in [0.0f32, 45.0, 90.0, 135.0, -120.0] {
            let to = from + heading(angle) * 50.0;
            assert!((normalize_angle_deg(bearing_deg(from, to) - angle)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rotate_deg_matches_heading() {
        let v = rotate_deg(Vec2::new(15.0, 0.0), 30.0);
        assert!((v - heading(30.0) * 15.0).length() < 1e-4);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect { x: 10.0, y: 10.0, w: 20.0, h: 10.0 };
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(29.9, 19.9)));
        assert!(!r.contains(Vec2::new(30.0, 15.0)));
        assert!(!r.contains(Vec2::new(9.9, 15.0)));
    }
}
