//! Player craft: steering, weapon and movement

use std::f32::consts::PI;

use glam::Vec2;

use super::collision;
use super::entity::{Entity, EntityKind};
use super::state::GameState;
use super::tick::TickInput;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::{bearing, heading_vector};

/// One tick of player control, movement and collision
pub fn update(state: &mut GameState, player: &mut Entity, input: &TickInput, dt: f32) {
    let EntityKind::Player(ref mut control) = player.kind else {
        return;
    };

    // Aim target is held for a while after the last aim input
    if let Some(target) = input.aim_target {
        control.aim_target = Some(target);
        control.aim_hold.start(AIM_HOLD_MS);
    } else if control.aim_hold.advance(dt) {
        control.aim_target = None;
    }
    let aim_target = control.aim_target;

    let tilt = input
        .tilt
        .filter(|t| t.x.abs() > TILT_THRESHOLD || t.y.abs() > TILT_THRESHOLD);

    if let Some(target) = aim_target {
        player.heading = bearing(player.pos, target);
    } else if let Some(t) = tilt {
        player.heading = t.y.atan2(t.x);
    }

    if input.firing {
        fire(state, player);
        state.shots += 1;
    }

    let accel = state.tuning.player_accel;
    if let Some(t) = tilt {
        player.vel += t * accel * dt * TILT_SCALE;
    }
    if input.boosting {
        player.vel += heading_vector(player.heading) * accel * dt;
    }

    let max_speed = state.tuning.player_max_speed;
    player.vel.x = damp_axis(player.vel.x, PLAYER_FRICTION, max_speed, VELOCITY_FLOOR);
    player.vel.y = damp_axis(player.vel.y, PLAYER_FRICTION, max_speed, VELOCITY_FLOOR);

    // The player can never leave the arena
    player.pos = (player.pos + player.vel * dt).clamp(Vec2::ZERO, state.tuning.arena);
    state.player_pos = player.pos;

    collision::resolve(state, player);
}

/// Friction, speed clamp and residual snap for one velocity axis
pub fn damp_axis(v: f32, friction: f32, max: f32, floor: f32) -> f32 {
    let v = (v * (1.0 - friction)).clamp(-max, max);
    if v.abs() < floor { 0.0 } else { v }
}

/// Muzzle positions and headings for a weapon level.
///
/// Higher levels add projectiles and spread, never damage.
pub fn weapon_pattern(level: u8, pos: Vec2, heading: f32, unit: f32) -> Vec<(Vec2, f32)> {
    let side = Vec2::new(-heading.sin(), heading.cos()) * unit * SHOT_OFFSET_RATIO;
    match level {
        0 | 1 => vec![(pos, heading)],
        2 => vec![(pos + side, heading), (pos - side, heading)],
        3 => vec![
            (pos, heading),
            (pos, heading + PI / 16.0),
            (pos, heading - PI / 16.0),
        ],
        _ => vec![
            (pos + side * 3.0, heading + PI / 32.0),
            (pos + side, heading + PI / 128.0),
            (pos - side, heading - PI / 128.0),
            (pos - side * 3.0, heading - PI / 32.0),
        ],
    }
}

/// Launch the current weapon pattern
pub fn fire(state: &mut GameState, player: &Entity) {
    let tuning = state.tuning;
    for (pos, heading) in weapon_pattern(state.power_level, player.pos, player.heading, tuning.unit) {
        state.spawn(Entity::projectile(pos, heading, player.id, &tuning));
    }
    state.play(SoundEffect::Weapon);
}
