//! Star Skirmish entry point
//!
//! Thin frontend around the simulation core: owns the session, feeds it one
//! `FrameInput` per frame at 60 Hz, persists the score exactly once per game
//! over, and hands the resulting `Scene` snapshot to whatever renderer is
//! attached. Without a graphical frontend it runs a scripted demo session
//! and can dump frame snapshots as JSON.

use std::time::{Duration, Instant};

use glam::Vec2;

use star_skirmish::ScoreStore;
use star_skirmish::consts::{FPS, PLAY_BUTTON};
use star_skirmish::highscores::{ScoreRow, TOP_SCORES_SHOWN};
use star_skirmish::render::{Scene, build_scene};
use star_skirmish::sim::{FrameInput, GameState, HeldKeys, InputEvent, Key, Phase, tick};

/// Session plus the collaborators the simulation itself must not touch:
/// the score store and the leaderboard cache shown on the start screen.
struct App {
    state: GameState,
    store: Option<ScoreStore>,
    top_scores: Vec<ScoreRow>,
    last_phase: Phase,
}

impl App {
    fn new(seed: u64, store: Option<ScoreStore>) -> Self {
        let mut app = Self {
            state: GameState::new(seed),
            store,
            top_scores: Vec::new(),
            last_phase: Phase::Start,
        };
        app.refresh_top_scores();
        app
    }

    fn refresh_top_scores(&mut self) {
        self.top_scores = match &self.store {
            Some(store) => store.top(TOP_SCORES_SHOWN).unwrap_or_else(|e| {
                log::warn!("leaderboard query failed: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };
    }

    /// Run one frame and snapshot it. Score persistence happens on the edge
    /// into `GameOver`, so each match writes exactly one row.
    fn frame(&mut self, input: &FrameInput) -> Scene {
        tick(&mut self.state, input);

        if self.state.phase == Phase::GameOver && self.last_phase != Phase::GameOver {
            self.persist_score();
        }
        if self.state.phase == Phase::Start && self.last_phase != Phase::Start {
            self.refresh_top_scores();
        }
        self.last_phase = self.state.phase;

        build_scene(&self.state, &self.top_scores)
    }

    fn persist_score(&self) {
        let Some(store) = &self.store else { return };
        // Store trouble costs one score entry, never the process
        if let Err(e) = store.insert(&self.state.player_name, self.state.score) {
            log::warn!("failed to persist score: {e}");
        }
    }
}

/// Scripted input for the demo session: start the game, then orbit and fire
/// while periodically deploying drones and raising the force field.
fn demo_input(frame: u64) -> FrameInput {
    let mut input = FrameInput::default();
    if frame == 0 {
        input.events.push(InputEvent::Click(Vec2::new(
            PLAY_BUTTON.x + PLAY_BUTTON.w / 2.0,
            PLAY_BUTTON.y + PLAY_BUTTON.h / 2.0,
        )));
        return input;
    }
    if frame == 60 {
        input.events.push(InputEvent::Key(Key::F));
    }
    if frame % 600 == 120 {
        input.events.push(InputEvent::Key(Key::J));
    }
    input.held = HeldKeys {
        fire: true,
        thrust: frame % 120 < 60,
        left: frame % 90 < 30,
        right: false,
    };
    input
}

fn main() {
    env_logger::init();
    log::info!("Star Skirmish starting");

    let dump_scene = std::env::args().any(|a| a == "--dump-scene");

    let store = match ScoreStore::open("highscores.db") {
        Ok(store) => Some(store),
        Err(e) => {
            log::warn!("high-score store unavailable: {e}");
            None
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut app = App::new(seed, store);

    // Fixed-tick demo loop. A graphical frontend would poll real input here
    // and hand each Scene to its renderer; the demo scripts the input and
    // discards the scenes (or dumps one as JSON for inspection).
    let frame_budget = Duration::from_micros(1_000_000 / FPS);
    let max_frames = 60 * FPS;
    for frame in 0..max_frames {
        let started = Instant::now();
        let scene = app.frame(&demo_input(frame));

        if dump_scene && frame == 90 {
            match serde_json::to_string_pretty(&scene) {
                Ok(json) => println!("{json}"),
                Err(e) => log::warn!("scene dump failed: {e}"),
            }
        }
        if app.state.quit || app.state.phase == Phase::GameOver {
            break;
        }
        if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    log::info!(
        "demo finished: score={} wave={} phase={:?}",
        app.state.score,
        app.state.wave,
        app.state.phase
    );
    println!(
        "score {} | wave {} | tokens {}",
        app.state.score, app.state.wave, app.state.tokens
    );
}
