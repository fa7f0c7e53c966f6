//! Per-frame orchestration and the session state machine
//!
//! One `tick` per frame. Order inside `Playing`: apply input, integrate the
//! player, run AI for hostiles and drones (collecting fired bullets),
//! integrate and prune bullets, resolve collisions, update explosions, check
//! the wave-advance condition.

use glam::Vec2;

use super::ai::{self, TargetContext};
use super::collision;
use super::ship::{Archetype, Bullet, Owner};
use super::state::{GameState, Mode, Phase};
use super::wave;
use crate::consts::{NAME_BOX, PLAY_BUTTON};

/// Discrete input events drained once per frame from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close request
    Quit,
    /// Mouse button released at a position
    Click(Vec2),
    Key(Key),
    /// A printable character was typed (name entry)
    Text(char),
}

/// Keys the state machine reacts to on key-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit1,
    Digit2,
    Backspace,
    /// Deploy drones
    F,
    /// Raise the force field
    J,
    /// Restart from game over
    R,
    /// Quit from game over
    Q,
}

/// Continuous key-held state, polled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// Everything the loop feeds the simulation for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) {
    state.time_ticks += 1;
    let now = state.now_ms();

    for ev in &input.events {
        if *ev == InputEvent::Quit {
            state.quit = true;
            return;
        }
        match state.phase {
            Phase::Start => start_event(state, ev),
            Phase::Playing => playing_event(state, ev, now),
            Phase::GameOver => game_over_event(state, ev),
        }
    }

    if state.phase == Phase::Playing {
        playing_frame(state, input.held, now);
    }
}

fn start_event(state: &mut GameState, ev: &InputEvent) {
    match ev {
        InputEvent::Click(pos) => {
            state.name_box_active = NAME_BOX.contains(*pos);
            if PLAY_BUTTON.contains(*pos) {
                if state.player_name.is_empty() {
                    state.player_name = "Player".to_string();
                }
                state.aggression = state.mode.aggression();
                state.start_session();
            }
        }
        InputEvent::Key(Key::Digit1) => state.mode = Mode::Standard,
        InputEvent::Key(Key::Digit2) => state.mode = Mode::LessAggressive,
        InputEvent::Key(Key::Backspace) if state.name_box_active => {
            state.player_name.pop();
        }
        // Non-printable characters are silently ignored
        InputEvent::Text(c) if state.name_box_active && !c.is_control() => {
            state.player_name.push(*c);
        }
        _ => {}
    }
}

fn playing_event(state: &mut GameState, ev: &InputEvent, now: u64) {
    match ev {
        InputEvent::Key(Key::F) => wave::deploy_drones(state, now),
        InputEvent::Key(Key::J) => wave::activate_force_field(state, now),
        _ => {}
    }
}

fn game_over_event(state: &mut GameState, ev: &InputEvent) {
    match ev {
        InputEvent::Key(Key::R) => state.phase = Phase::Start,
        InputEvent::Key(Key::Q) => state.quit = true,
        _ => {}
    }
}

fn playing_frame(state: &mut GameState, held: HeldKeys, now: u64) {
    wave::expire_force_field(state, now);

    {
        let GameState { player, hostiles, drones, shots, hostile_shots, .. } = state;

        // Player input
        if held.left {
            player.angle += player.rot_speed;
        }
        if held.right {
            player.angle -= player.rot_speed;
        }
        if held.thrust {
            player.thrust_forward(1.0);
        }
        player.thrust = held.thrust;

        // Holding fire trades cadence: 250 ms held, 500 ms tapped
        player.cooldown_ms = if held.fire { 250 } else { 500 };
        if held.fire && player.cooldown_ready(now) {
            player.mark_fired(now);
            shots.push(Bullet::fired_by(player, Owner::Player, now));
        }
        player.integrate();

        // Hostile AI
        for h in hostiles.iter_mut() {
            let target = TargetContext { pos: player.pos, is_hostile: true };
            let steer = h.archetype.decide(&h.ship, target);
            h.ship.apply_steer(&steer);
            if steer.fire && h.ship.cooldown_ready(now) {
                h.ship.mark_fired(now);
                hostile_shots.push(Bullet::fired_by(&h.ship, Owner::Hostile, now));
            }
            h.ship.integrate();
        }

        // Drone AI: re-resolve the nearest hostile every frame
        for d in drones.iter_mut() {
            let target = ai::drone_target(d.pos, hostiles.as_slice(), player.pos);
            let steer = Archetype::Drone.decide(d, target);
            d.apply_steer(&steer);
            if steer.fire && d.cooldown_ready(now) {
                d.mark_fired(now);
                shots.push(Bullet::fired_by(d, Owner::Drone, now));
            }
            d.integrate();
        }

        // Bullets integrate and expire before the collision pass sees them
        for b in shots.iter_mut().chain(hostile_shots.iter_mut()) {
            b.advance(now);
        }
        shots.retain(|b| !b.expired);
        hostile_shots.retain(|b| !b.expired);
    }

    collision::resolve(state);

    for e in &mut state.explosions {
        e.update();
    }
    state.explosions.retain(|e| !e.finished());

    if state.player.health <= 0 {
        state.phase = Phase::GameOver;
        log::info!(
            "game over: score={} wave={} tokens={}",
            state.score,
            state.wave,
            state.tokens
        );
    } else {
        wave::advance_wave_if_cleared(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BULLET_LIFETIME_MS, BULLET_RADIUS, RED, YELLOW};

    fn click_play() -> FrameInput {
        FrameInput {
            events: vec![InputEvent::Click(Vec2::new(
                PLAY_BUTTON.x + 1.0,
                PLAY_BUTTON.y + 1.0,
            ))],
            ..Default::default()
        }
    }

    fn key(k: Key) -> FrameInput {
        FrameInput { events: vec![InputEvent::Key(k)], ..Default::default() }
    }

    fn player_bullet_at(pos: Vec2) -> Bullet {
        Bullet {
            pos,
            vel: Vec2::ZERO,
            radius: BULLET_RADIUS,
            color: YELLOW,
            owner: Owner::Player,
            spawn_ms: 0,
            expired: false,
        }
    }

    #[test]
    fn test_name_entry_and_mode_selection() {
        let mut state = GameState::new(1);
        let click_box = FrameInput {
            events: vec![InputEvent::Click(Vec2::new(NAME_BOX.x + 5.0, NAME_BOX.y + 5.0))],
            ..Default::default()
        };
        tick(&mut state, &click_box);
        assert!(state.name_box_active);

        let typing = FrameInput {
            events: vec![
                InputEvent::Text('A'),
                InputEvent::Text('v'),
                InputEvent::Text('\u{7}'), // control char: silently ignored
                InputEvent::Text('a'),
                InputEvent::Key(Key::Backspace),
                InputEvent::Key(Key::Digit2),
            ],
            ..Default::default()
        };
        tick(&mut state, &typing);
        assert_eq!(state.player_name, "Av");
        assert_eq!(state.mode, Mode::LessAggressive);

        tick(&mut state, &click_play());
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.player_name, "Av");
        assert!((state.aggression - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_empty_name_defaults_to_player() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_play());
        assert_eq!(state.player_name, "Player");
        assert_eq!(state.phase, Phase::Playing);
        assert!((state.aggression - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_typing_outside_box_ignored() {
        let mut state = GameState::new(1);
        let typing = FrameInput {
            events: vec![InputEvent::Text('x')],
            ..Default::default()
        };
        tick(&mut state, &typing);
        assert!(state.player_name.is_empty());
    }

    #[test]
    fn test_held_fire_cadence() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_play());
        // Move hostiles far away so they don't interfere
        for h in &mut state.hostiles {
            h.ship.pos = Vec2::new(0.0, 0.0);
            h.ship.cooldown_ms = u64::MAX;
        }
        state.player.pos = Vec2::new(400.0, 300.0);

        let firing = FrameInput {
            held: HeldKeys { fire: true, ..Default::default() },
            ..Default::default()
        };
        // Two seconds of held fire at 250 ms cadence; count muzzle flashes
        // tick by tick since bullets expire off the right edge quickly
        let mut fired = 0;
        for _ in 0..120 {
            tick(&mut state, &firing);
            let now = state.now_ms();
            fired += state
                .shots
                .iter()
                .filter(|b| b.owner == Owner::Player && b.spawn_ms == now)
                .count();
        }
        assert!((7..=9).contains(&fired), "roughly every 250 ms, got {fired}");
    }

    #[test]
    fn test_expired_bullet_never_reaches_collision() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_play());
        state.time_ticks = 60 * 10; // now = 10 s

        let hostile_pos = state.hostiles[0].ship.pos;
        let mut bullet = player_bullet_at(hostile_pos);
        bullet.spawn_ms = state.now_ms() - BULLET_LIFETIME_MS; // already at lifetime
        state.shots.push(bullet);

        let health_before = state.hostiles[0].ship.health;
        tick(&mut state, &FrameInput::default());
        assert_eq!(state.hostiles[0].ship.health, health_before);
        assert!(state.shots.iter().all(|b| !b.expired), "expired bullet pruned");
    }

    #[test]
    fn test_wave_one_clear_end_to_end() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_play());
        assert_eq!(state.hostiles.len(), 3, "wave 1: 2 chasers + 1 sniper");

        // Soften every hostile to one hit and pin a player bullet on each
        let positions: Vec<Vec2> = state.hostiles.iter().map(|h| h.ship.pos).collect();
        for h in &mut state.hostiles {
            h.ship.health = 20;
            h.ship.cooldown_ms = u64::MAX;
        }
        for pos in positions {
            state.shots.push(player_bullet_at(pos));
        }

        tick(&mut state, &FrameInput::default());

        assert_eq!(state.score, 300);
        assert_eq!(state.tokens, 1, "one sniper destroyed");
        assert_eq!(state.wave, 2);
        assert_eq!(state.hostiles.len(), 4, "wave 2: 3 chasers + 1 sniper");
        assert_eq!(state.explosions.len(), 3);
    }

    #[test]
    fn test_ten_hits_end_the_match() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_play());
        assert_eq!(state.player.health, 100);

        for _ in 0..10 {
            state.hostile_shots.push(Bullet {
                owner: Owner::Hostile,
                color: RED,
                ..player_bullet_at(state.player.pos)
            });
        }
        tick(&mut state, &FrameInput::default());

        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_force_field_key_and_drone_key() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_play());

        tick(&mut state, &key(Key::J));
        assert!(state.field_active);
        assert_eq!(state.free_fields_used, 1);

        tick(&mut state, &key(Key::F));
        assert_eq!(state.drones.len(), 3);
    }

    #[test]
    fn test_game_over_restart_and_quit() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_play());
        state.player.health = 0;
        state.phase = Phase::GameOver;

        tick(&mut state, &key(Key::R));
        assert_eq!(state.phase, Phase::Start);

        // Play again: session state resets
        tick(&mut state, &click_play());
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.score, 0);

        state.phase = Phase::GameOver;
        tick(&mut state, &key(Key::Q));
        assert!(state.quit);
    }

    #[test]
    fn test_quit_event_any_phase() {
        let mut state = GameState::new(1);
        let quit = FrameInput { events: vec![InputEvent::Quit], ..Default::default() };
        tick(&mut state, &quit);
        assert!(state.quit);
    }

    #[test]
    fn test_drones_engage_hostiles() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_play());
        tick(&mut state, &key(Key::F));

        // Park a weak hostile near a drone, well within its fire range
        let drone_pos = state.drones[0].pos;
        state.hostiles.truncate(1);
        state.hostiles[0].ship.pos = drone_pos + Vec2::new(60.0, 0.0);
        state.hostiles[0].ship.cooldown_ms = u64::MAX;
        // Let the drone turn in and the cooldown elapse
        for _ in 0..120 {
            state.hostiles[0].ship.vel = Vec2::ZERO;
            tick(&mut state, &FrameInput::default());
            if state.shots.iter().any(|b| b.owner == Owner::Drone) {
                return;
            }
        }
        panic!("drone never fired at a hostile in range");
    }
}
