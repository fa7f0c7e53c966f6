//! Collision resolution and damage
//!
//! Hit test: a bullet connects when the distance to the target's center is
//! strictly below the target's own radius. The bullet's radius is ignored;
//! the asymmetry is a deliberate balance choice (small bullets vs fat
//! hulls), not a bug to fix.
//!
//! Per-frame order: friendly bullets vs hostiles, hostile bullets vs player,
//! hostile bullets vs drones. Removal is mark-then-filter: nothing is pulled
//! out of a collection mid-scan.

use glam::Vec2;

use super::ship::{Explosion, Owner};
use super::state::GameState;
use crate::consts::{BULLET_DAMAGE_FRIENDLY, BULLET_DAMAGE_HOSTILE, KILL_SCORE};

/// Asymmetric proximity test against a target's radius
pub fn hits(point: Vec2, target_pos: Vec2, target_radius: f32) -> bool {
    point.distance(target_pos) < target_radius
}

/// Run the full collision pass for one frame
pub fn resolve(state: &mut GameState) {
    friendly_shots_vs_hostiles(state);
    hostile_shots_vs_player(state);
    hostile_shots_vs_drones(state);
}

/// Friendly bullets against hostile ships. Each bullet damages at most one
/// hostile (first live match wins). A kill spawns an explosion and, only for
/// player-owned bullets, pays out score and any sniper token.
fn friendly_shots_vs_hostiles(state: &mut GameState) {
    let GameState { shots, hostiles, explosions, score, tokens, .. } = state;

    let mut spent = vec![false; shots.len()];
    for (si, shot) in shots.iter().enumerate() {
        for hostile in hostiles.iter_mut() {
            if hostile.ship.health <= 0 {
                continue;
            }
            if !hits(shot.pos, hostile.ship.pos, hostile.ship.radius) {
                continue;
            }
            hostile.ship.health -= BULLET_DAMAGE_HOSTILE;
            spent[si] = true;
            if hostile.ship.health <= 0 {
                explosions.push(Explosion::new(hostile.ship.pos));
                if shot.owner == Owner::Player {
                    *score += KILL_SCORE;
                    if hostile.grants_token() {
                        *tokens += 1;
                    }
                }
            }
            break;
        }
    }

    let mut si = 0;
    shots.retain(|_| {
        let keep = !spent[si];
        si += 1;
        keep
    });
    hostiles.retain(|h| h.ship.health > 0);
}

/// Hostile bullets against the player. An active force field soaks the
/// bullet with no damage; otherwise the player takes damage. The tick checks
/// for the terminal transition afterward.
fn hostile_shots_vs_player(state: &mut GameState) {
    let GameState { hostile_shots, player, field_active, .. } = state;

    hostile_shots.retain(|shot| {
        if !hits(shot.pos, player.pos, player.radius) {
            return true;
        }
        if !*field_active {
            player.health -= BULLET_DAMAGE_FRIENDLY;
        }
        false
    });
}

/// Hostile bullets against drones. First drone hit wins per bullet; a dead
/// drone explodes but pays no score or tokens.
fn hostile_shots_vs_drones(state: &mut GameState) {
    let GameState { hostile_shots, drones, explosions, .. } = state;

    let mut spent = vec![false; hostile_shots.len()];
    for (si, shot) in hostile_shots.iter().enumerate() {
        for drone in drones.iter_mut() {
            if drone.health <= 0 {
                continue;
            }
            if !hits(shot.pos, drone.pos, drone.radius) {
                continue;
            }
            drone.health -= BULLET_DAMAGE_FRIENDLY;
            spent[si] = true;
            if drone.health <= 0 {
                explosions.push(Explosion::new(drone.pos));
            }
            break;
        }
    }

    let mut si = 0;
    hostile_shots.retain(|_| {
        let keep = !spent[si];
        si += 1;
        keep
    });
    drones.retain(|d| d.health > 0);
}
