//! Fixed timestep simulation tick
//!
//! One tick advances the spawn director, updates every live entity in
//! registration order, flushes the world if the player went down, and finally
//! runs the registry cleanup.

use glam::Vec2;

use super::collision;
use super::director;
use super::entity::{Entity, EntityKind};
use super::hazards;
use super::lifecycle::{destroy, flush};
use super::player;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Point to face (mouse/touch position); held for a while after release
    pub aim_target: Option<Vec2>,
    /// Thrust along the current heading
    pub boosting: bool,
    /// Trigger pull; one volley per tick it is set
    pub firing: bool,
    /// Device tilt relative to neutral, in degrees
    pub tilt: Option<Vec2>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Paused keeps every timer where it is; game over has nothing left to run
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    director::advance(state, dt);

    for id in state.registry.ids() {
        if state.is_game_over() {
            break;
        }
        let Some((mut entity, slot)) = state.registry.take(id) else {
            continue;
        };
        if entity.is_alive() {
            update_entity(state, &mut entity, input, dt);
        }
        state.registry.restore(entity, slot);
    }

    if state.is_game_over() {
        flush(state);
    }
    state.registry.cleanup();
}

fn update_entity(state: &mut GameState, entity: &mut Entity, input: &TickInput, dt: f32) {
    match entity.kind {
        EntityKind::Player(_) => player::update(state, entity, input, dt),
        EntityKind::Projectile => {
            drift(state, entity, dt);
            if collision::resolve(state, entity).is_some() {
                state.hits += 1;
            }
        }
        _ => {
            hazards::steer(state, entity, dt);
            drift(state, entity, dt);
        }
    }
}

/// Straight-line motion plus the leave-the-arena rule. An entity is only
/// removed for being out of bounds once it has been seen inside. Player shots
/// and rock fragments are born inside and start latched.
fn drift(state: &mut GameState, entity: &mut Entity, dt: f32) {
    entity.pos += entity.vel * dt;
    if entity.in_bounds(state.tuning.arena) {
        entity.can_destroy = true;
    } else if entity.can_destroy {
        destroy(state, entity);
    }
}
