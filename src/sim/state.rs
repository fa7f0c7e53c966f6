//! Session state
//!
//! Everything a running game owns lives in one `GameState` passed by
//! reference through the tick. Entities never hold references to each other;
//! AI re-resolves targets by scanning the live collections each frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ship::{Bullet, Explosion, Hostile, Ship};
use super::wave;
use crate::consts::FPS;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Name entry, mode selection, leaderboard display
    Start,
    /// Simulation active
    Playing,
    /// Player destroyed; score persisted once, restart/quit offered
    GameOver,
}

/// Pre-game difficulty selection. Fixes the aggression multiplier applied to
/// every hostile at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Standard,
    LessAggressive,
}

impl Mode {
    pub fn aggression(self) -> f32 {
        match self {
            Mode::Standard => 1.0,
            Mode::LessAggressive => 0.25,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Standard => "Standard",
            Mode::LessAggressive => "75% Less Aggressive",
        }
    }
}

/// Complete session state, owned exclusively by the game loop
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: Phase,
    /// Simulation tick counter; the monotonic clock for every timer
    pub time_ticks: u64,

    pub player: Ship,
    pub player_name: String,
    pub name_box_active: bool,
    pub mode: Mode,
    /// Multiplier fixed when play is confirmed; baked into hostiles at spawn
    pub aggression: f32,

    /// Friendly bullets (player- and drone-owned)
    pub shots: Vec<Bullet>,
    /// Hostile bullets
    pub hostile_shots: Vec<Bullet>,
    pub hostiles: Vec<Hostile>,
    pub drones: Vec<Ship>,
    pub explosions: Vec<Explosion>,

    pub score: u32,
    pub wave: u32,
    pub tokens: u32,
    pub field_active: bool,
    pub field_since_ms: u64,
    pub free_fields_used: u32,

    /// Set on explicit quit; the frontend tears down when it sees this
    pub quit: bool,
}

impl GameState {
    /// Fresh state on the start screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Start,
            time_ticks: 0,
            player: Ship::player(0),
            player_name: String::new(),
            name_box_active: false,
            mode: Mode::default(),
            aggression: Mode::default().aggression(),
            shots: Vec::new(),
            hostile_shots: Vec::new(),
            hostiles: Vec::new(),
            drones: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            wave: 1,
            tokens: 0,
            field_active: false,
            field_since_ms: 0,
            free_fields_used: 0,
            quit: false,
        }
    }

    /// Milliseconds of simulated time. Derived once per frame from the tick
    /// counter so no two timers in a frame see different readings.
    pub fn now_ms(&self) -> u64 {
        self.time_ticks * 1000 / FPS
    }

    /// Reset all per-session state and spawn wave 1. Called when play is
    /// confirmed from the start screen; the aggression multiplier must
    /// already be fixed from the selected mode.
    pub fn start_session(&mut self) {
        let now = self.now_ms();
        self.player = Ship::player(now);
        self.shots.clear();
        self.hostile_shots.clear();
        self.hostiles.clear();
        self.drones.clear();
        self.explosions.clear();
        self.score = 0;
        self.wave = 1;
        self.tokens = 0;
        self.field_active = false;
        self.field_since_ms = 0;
        self.free_fields_used = 0;
        wave::spawn_wave(self);
        self.phase = Phase::Playing;
        log::info!(
            "session start: player={:?} mode={:?} aggression={}",
            self.player_name,
            self.mode,
            self.aggression
        );
    }
}
