//! Wave spawning and the transient-resource economy
//!
//! Waves advance only when the hostile collection empties. The force field
//! burns 5 lifetime free activations before costing tokens; drones deploy
//! free on a dedicated trigger.

use glam::Vec2;
use rand::Rng;

use super::ship::{Archetype, Hostile, Ship};
use super::state::GameState;
use crate::consts::*;
use crate::rotate_deg;

/// A uniformly random point on a uniformly chosen screen edge
fn edge_spawn(rng: &mut impl Rng) -> Vec2 {
    match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(0.0..WIDTH), 0.0),
        1 => Vec2::new(rng.random_range(0.0..WIDTH), HEIGHT),
        2 => Vec2::new(0.0, rng.random_range(0.0..HEIGHT)),
        _ => Vec2::new(WIDTH, rng.random_range(0.0..HEIGHT)),
    }
}

/// Spawn the hostiles for `state.wave`: `n + 1` chasers and `max(1, n - 1)`
/// snipers, each entering from a random screen edge with the session's
/// aggression multiplier baked in.
pub fn spawn_wave(state: &mut GameState) {
    let now = state.now_ms();
    let wave = state.wave;
    let chasers = wave + 1;
    let snipers = wave.saturating_sub(1).max(1);

    for _ in 0..chasers {
        let pos = edge_spawn(&mut state.rng);
        state
            .hostiles
            .push(Hostile::spawn(Archetype::Chaser, pos, state.aggression, now));
    }
    for _ in 0..snipers {
        let pos = edge_spawn(&mut state.rng);
        state
            .hostiles
            .push(Hostile::spawn(Archetype::Sniper, pos, state.aggression, now));
    }
    log::info!("wave {wave}: spawned {chasers} chasers, {snipers} snipers");
}

/// Advance the wave when the current batch is fully eliminated. Never
/// timer-driven.
pub fn advance_wave_if_cleared(state: &mut GameState) {
    if state.hostiles.is_empty() {
        state.wave += 1;
        spawn_wave(state);
    }
}

/// Try to raise the force field. No-op while already active; consumes one of
/// the free activations first, then one token per activation. Without free
/// uses or tokens the field stays down and the balance is untouched.
pub fn activate_force_field(state: &mut GameState, now_ms: u64) {
    if state.field_active {
        return;
    }
    if state.free_fields_used < FREE_FIELD_ACTIVATIONS {
        state.free_fields_used += 1;
    } else if state.tokens >= FIELD_TOKEN_COST {
        state.tokens -= FIELD_TOKEN_COST;
    } else {
        return;
    }
    state.field_active = true;
    state.field_since_ms = now_ms;
    log::info!(
        "force field up (free used {}/{}, tokens left {})",
        state.free_fields_used,
        FREE_FIELD_ACTIVATIONS,
        state.tokens
    );
}

/// Drop the field once its fixed duration has elapsed
pub fn expire_force_field(state: &mut GameState, now_ms: u64) {
    if state.field_active && now_ms.saturating_sub(state.field_since_ms) > FORCE_FIELD_DURATION_MS {
        state.field_active = false;
        log::info!("force field expired");
    }
}

/// Deploy three escort drones around the player at 120 degree offsets.
/// Unconditional and free.
pub fn deploy_drones(state: &mut GameState, now_ms: u64) {
    for i in 0..DRONE_DEPLOY_COUNT {
        let offset = rotate_deg(Vec2::new(DRONE_DEPLOY_RADIUS, 0.0), (i * 120) as f32);
        state
            .drones
            .push(Ship::drone(state.player.pos + offset, now_ms));
    }
}
