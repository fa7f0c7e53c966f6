//! Scene snapshots for the external renderer
//!
//! The simulation never draws. Once per frame it is flattened into a `Scene`
//! of primitives (serializable, so headless frontends can dump frames) and
//! the renderer consumes that without feeding anything back.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::highscores::ScoreRow;
use crate::sim::{GameState, Phase, Ship};
use crate::{Rect, Rgb, rotate_deg};

/// A single drawable primitive
#[derive(Debug, Clone, Serialize)]
pub enum Primitive {
    Polygon { points: Vec<Vec2>, color: Rgb },
    Circle { center: Vec2, radius: f32, color: Rgb, alpha: u8, filled: bool },
    RectFill { rect: Rect, color: Rgb },
    RectOutline { rect: Rect, color: Rgb },
    Label { text: String, pos: Vec2, size: u32, color: Rgb },
}

/// Immutable per-frame snapshot of everything drawable
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    pub prims: Vec<Primitive>,
}

impl Scene {
    fn push(&mut self, p: Primitive) {
        self.prims.push(p);
    }
}

/// Ship hull: a triangle pointing along the facing
fn ship_polygon(ship: &Ship) -> Primitive {
    let r = ship.radius;
    let local = [
        Vec2::new(r, 0.0),
        Vec2::new(-r / 2.0, r / 1.5),
        Vec2::new(-r / 2.0, -r / 1.5),
    ];
    Primitive::Polygon {
        points: local.iter().map(|&v| ship.pos + rotate_deg(v, ship.angle)).collect(),
        color: ship.color,
    }
}

/// Thruster flame behind a ship while it is accelerating
fn flame_polygon(ship: &Ship) -> Primitive {
    let r = ship.radius;
    let local = [
        Vec2::new(-r - 5.0, 0.0),
        Vec2::new(-r / 2.0 - 5.0, r / 3.0),
        Vec2::new(-r / 2.0 - 5.0, -r / 3.0),
    ];
    Primitive::Polygon {
        points: local.iter().map(|&v| ship.pos + rotate_deg(v, ship.angle)).collect(),
        color: ORANGE,
    }
}

/// Red backdrop plus green fill proportional to remaining health
fn health_bar(scene: &mut Scene, ship: &Ship, width: f32) {
    let x = ship.pos.x - width / 2.0;
    let y = ship.pos.y - ship.radius - 15.0;
    let frac = (ship.health.max(0) as f32 / ship.max_health as f32).min(1.0);
    scene.push(Primitive::RectFill {
        rect: Rect { x, y, w: width, h: 5.0 },
        color: RED,
    });
    scene.push(Primitive::RectFill {
        rect: Rect { x, y, w: width * frac, h: 5.0 },
        color: GREEN,
    });
}

fn label(text: impl Into<String>, pos: Vec2, size: u32, color: Rgb) -> Primitive {
    Primitive::Label { text: text.into(), pos, size, color }
}

/// Flatten the current state (plus the leaderboard shown on the start
/// screen) into a scene.
pub fn build_scene(state: &GameState, top_scores: &[ScoreRow]) -> Scene {
    let mut scene = Scene::default();
    match state.phase {
        Phase::Start => start_screen(&mut scene, state, top_scores),
        Phase::Playing => playing_screen(&mut scene, state),
        Phase::GameOver => game_over_screen(&mut scene),
    }
    scene
}

fn start_screen(scene: &mut Scene, state: &GameState, top_scores: &[ScoreRow]) {
    let cx = WIDTH / 2.0;
    let cy = HEIGHT / 2.0;
    scene.push(label("Star Skirmish", Vec2::new(cx, cy - 180.0), 48, YELLOW));
    scene.push(label("Enter your name:", Vec2::new(cx, cy - 110.0), 36, WHITE));
    scene.push(Primitive::RectOutline { rect: NAME_BOX, color: WHITE });
    scene.push(label(
        state.player_name.clone(),
        Vec2::new(NAME_BOX.x + 5.0, NAME_BOX.y + 5.0),
        36,
        WHITE,
    ));
    scene.push(label(
        "Press 1 for Standard, 2 for Less Aggressive",
        Vec2::new(cx, cy - 10.0),
        36,
        WHITE,
    ));
    scene.push(label(
        format!("Current Mode: {}", state.mode.label()),
        Vec2::new(cx, cy + 30.0),
        36,
        WHITE,
    ));
    scene.push(Primitive::RectFill { rect: PLAY_BUTTON, color: GREEN });
    scene.push(label(
        "Play",
        Vec2::new(PLAY_BUTTON.x + PLAY_BUTTON.w / 2.0, PLAY_BUTTON.y + PLAY_BUTTON.h / 2.0),
        36,
        BLACK,
    ));

    scene.push(label("High Scores:", Vec2::new(cx, cy + 150.0), 28, GREEN));
    for (i, row) in top_scores.iter().enumerate() {
        scene.push(label(
            format!("{}. {} - {}", i + 1, row.name, row.score),
            Vec2::new(cx, cy + 180.0 + i as f32 * 30.0),
            28,
            GREEN,
        ));
    }
}

fn playing_screen(scene: &mut Scene, state: &GameState) {
    scene.push(ship_polygon(&state.player));
    if state.player.thrust {
        scene.push(flame_polygon(&state.player));
    }
    health_bar(scene, &state.player, 40.0);

    for h in &state.hostiles {
        scene.push(ship_polygon(&h.ship));
        health_bar(scene, &h.ship, 40.0);
    }
    for d in &state.drones {
        scene.push(ship_polygon(d));
        health_bar(scene, d, 30.0);
    }
    for b in state.shots.iter().chain(&state.hostile_shots) {
        scene.push(Primitive::Circle {
            center: b.pos,
            radius: b.radius,
            color: b.color,
            alpha: 255,
            filled: true,
        });
    }
    for e in &state.explosions {
        scene.push(Primitive::Circle {
            center: e.pos,
            radius: e.radius,
            color: ORANGE,
            alpha: e.alpha as u8,
            filled: true,
        });
    }
    if state.field_active {
        scene.push(Primitive::Circle {
            center: state.player.pos,
            radius: state.player.radius + 15.0,
            color: BLUE,
            alpha: 255,
            filled: false,
        });
    }

    // HUD
    for (i, text) in [
        format!("Score: {}", state.score),
        format!("Wave: {}", state.wave),
        format!("Player Health: {}", state.player.health),
        format!("Tokens: {}", state.tokens),
    ]
    .into_iter()
    .enumerate()
    {
        scene.push(label(text, Vec2::new(10.0, 10.0 + i as f32 * 20.0), 24, WHITE));
    }
}

fn game_over_screen(scene: &mut Scene) {
    let cx = WIDTH / 2.0;
    let cy = HEIGHT / 2.0;
    scene.push(label("GAME OVER", Vec2::new(cx, cy - 60.0), 48, RED));
    scene.push(label("Press R to Restart or Q to Quit", Vec2::new(cx, cy), 48, RED));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{FrameInput, InputEvent, tick};

    fn playing_state() -> GameState {
        let mut state = GameState::new(1);
        let click = FrameInput {
            events: vec![InputEvent::Click(Vec2::new(PLAY_BUTTON.x + 1.0, PLAY_BUTTON.y + 1.0))],
            ..Default::default()
        };
        tick(&mut state, &click);
        state
    }

    #[test]
    fn test_start_scene_lists_top_scores() {
        let state = GameState::new(1);
        let rows = vec![
            ScoreRow { name: "Ada".into(), score: 900 },
            ScoreRow { name: "Bob".into(), score: 400 },
        ];
        let scene = build_scene(&state, &rows);
        let labels: Vec<&String> = scene
            .prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Label { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert!(labels.iter().any(|t| t.contains("Ada - 900")));
        assert!(labels.iter().any(|t| t.contains("Bob - 400")));
    }

    #[test]
    fn test_playing_scene_covers_every_population() {
        let mut state = playing_state();
        state.field_active = true;
        let scene = build_scene(&state, &[]);

        let polys = scene
            .prims
            .iter()
            .filter(|p| matches!(p, Primitive::Polygon { .. }))
            .count();
        // Player + 3 hostiles (no flame while coasting)
        assert_eq!(polys, 4);

        let rings = scene
            .prims
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { filled: false, .. }))
            .count();
        assert_eq!(rings, 1, "force-field ring");
    }

    #[test]
    fn test_flame_only_while_thrusting() {
        let mut state = playing_state();
        state.hostiles.clear();
        state.player.thrust = true;
        let with_flame = build_scene(&state, &[]);
        state.player.thrust = false;
        let without = build_scene(&state, &[]);
        let count = |s: &Scene| {
            s.prims
                .iter()
                .filter(|p| matches!(p, Primitive::Polygon { color, .. } if *color == ORANGE))
                .count()
        };
        assert_eq!(count(&with_flame), 1);
        assert_eq!(count(&without), 0);
    }

    #[test]
    fn test_scene_serializes() {
        let scene = build_scene(&playing_state(), &[]);
        let json = serde_json::to_string(&scene).expect("scene is serializable");
        assert!(json.contains("Polygon"));
    }
}
