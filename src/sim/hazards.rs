//! Hazard behaviors
//!
//! Per-kind steering while alive, and the hook each kind runs just before its
//! value is credited on destruction.

use rand::Rng;

use super::director::ufo_fire_delay;
use super::entity::{Entity, EntityKind};
use super::state::GameState;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::{bearing, heading_vector, normalize_angle};

/// Kind-specific work done before a hazard's value is credited. May spawn
/// fragments or change the value.
pub fn before_score(state: &mut GameState, entity: &mut Entity, in_bounds: bool) {
    match entity.kind {
        EntityKind::Asteroid { big: true } => {
            if in_bounds && !state.is_game_over() {
                fragment(state, entity);
            }
        }
        EntityKind::Comet { .. } => {
            if in_bounds {
                entity.value = COMET_HIT_VALUE;
            }
        }
        EntityKind::Ufo(_) => {
            if in_bounds {
                entity.value = UFO_HIT_VALUE;
            } else if !state.is_game_over() {
                state.director.schedule_ufo_respawn();
                log::debug!("UFO #{} escaped, respawn scheduled", entity.id);
            }
        }
        EntityKind::Upgrade => {
            if state.is_game_over() {
                return;
            }
            if in_bounds && state.power_level < MAX_POWER_LEVEL {
                state.power_level = state.earned_power_level().max(state.power_level);
                state.play(SoundEffect::UpgradeCollect);
                log::info!("Weapon upgraded to level {}", state.power_level);
            }
            state.director.upgrade_resolved(&mut state.rng);
        }
        _ => {}
    }
}

/// Split a big rock into two (sometimes three) smaller rocks that share its
/// lineage. Combined fragment radius stays within the parent's budget.
fn fragment(state: &mut GameState, parent: &Entity) {
    let tuning = state.tuning;
    let radius = (parent.radius / 2.0).max(tuning.unit * MIN_ROCK_RADIUS_RATIO);
    let budget = parent.radius * FRAGMENT_BUDGET_RATIO;

    let mut headings = vec![
        parent.heading + state.rng.random_range(FRAGMENT_CONE_MIN..FRAGMENT_CONE_MAX),
        parent.heading - state.rng.random_range(FRAGMENT_CONE_MIN..FRAGMENT_CONE_MAX),
    ];
    if state.score > THIRD_FRAGMENT_SCORE
        && radius * 3.0 <= budget
        && state.rng.random_bool(0.5)
    {
        headings.push(parent.heading + state.rng.random_range(-FRAGMENT_CONE_MIN..FRAGMENT_CONE_MIN));
    }

    for heading in headings {
        let mut rock = Entity::asteroid_sized(parent.pos, heading, radius, &tuning, &mut state.rng);
        rock.parent_id = Some(parent.id);
        // Only in-bounds rocks split, so fragments are already in play
        rock.can_destroy = true;
        state.spawn(rock);
    }
}

/// Cue for a hazard blown up in view
pub fn destroy_sound(entity: &Entity) -> Option<SoundEffect> {
    match entity.kind {
        EntityKind::Asteroid { big: true } => Some(SoundEffect::BoomBig),
        EntityKind::Asteroid { big: false } | EntityKind::EnemyProjectile => {
            Some(SoundEffect::BoomSmall)
        }
        EntityKind::Comet { .. } => Some(SoundEffect::CometBoom),
        EntityKind::Ufo(_) => Some(SoundEffect::UfoGone),
        _ => None,
    }
}

/// Per-tick heading changes: comets arc, UFOs hunt the player and shoot
pub fn steer(state: &mut GameState, entity: &mut Entity, dt: f32) {
    match &mut entity.kind {
        EntityKind::Comet { turn_rate } => {
            entity.heading = normalize_angle(entity.heading + *turn_rate);
            entity.vel = heading_vector(entity.heading) * entity.vel.length();
        }
        EntityKind::Ufo(ufo) => {
            if state.is_game_over() || !ufo.is_chasing() {
                ufo.fire_control.cancel();
                return;
            }

            // Bounded turn toward the player, never a snap
            let to_player = bearing(entity.pos, state.player_pos);
            let delta = normalize_angle(to_player - entity.heading);
            let turn = (delta * UFO_TURN_FACTOR).clamp(-UFO_MAX_TURN, UFO_MAX_TURN);
            entity.heading = normalize_angle(entity.heading + turn);
            entity.vel = heading_vector(entity.heading) * entity.vel.length();

            if ufo.fire_control.advance(dt) {
                let shot = Entity::enemy_projectile(entity.pos, to_player, entity.id, &state.tuning);
                state.spawn(shot);
                state.play(SoundEffect::UfoFire);
                ufo.fire_control.start(ufo_fire_delay(state.score));
            }

            ufo.chase_elapsed_ms += dt;
            if !ufo.is_chasing() {
                ufo.fire_control.cancel();
                log::debug!("UFO #{} disengaged", entity.id);
            }
        }
        _ => {}
    }
}
