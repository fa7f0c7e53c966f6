//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One tick per frame, timers derived from the tick counter
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod kinematics;
pub mod ship;
pub mod state;
pub mod tick;
pub mod wave;

pub use ai::{Drive, Steer, TargetContext};
pub use ship::{Archetype, Bullet, Explosion, Hostile, Owner, Ship};
pub use state::{GameState, Mode, Phase};
pub use tick::{FrameInput, HeldKeys, InputEvent, Key, tick};
pub use wave::{activate_force_field, deploy_drones, spawn_wave};
