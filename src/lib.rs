//! Blasteroids - a fixed-timestep arcade shooter core
//!
//! Core modules:
//! - `sim`: Entity simulation (registry, collisions, spawn director, hazards)
//! - `driver`: Wall-clock frames to fixed simulation ticks
//! - `game`: Session shell tying the driver, input, audio and rendering together
//! - `render`: Renderer seam and per-entity drawing
//! - `audio`: Sound cue seam
//! - `hud`: Score readout and post-game rank
//! - `settings`: Configuration read once at session start

pub mod audio;
pub mod driver;
pub mod game;
pub mod hud;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use hud::{Hud, Rank};
pub use settings::{Platform, Settings, SettingsError, Tuning};

use glam::Vec2;

/// Game configuration constants
///
/// Distances are in pixels at scale 1.0, speeds in pixels per millisecond.
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (60 Hz)
    pub const TIME_STEP: Duration = Duration::from_nanos(16_666_667);
    /// Same timestep in milliseconds, for per-tick integration
    pub const TIME_STEP_MS: f32 = 1000.0 / 60.0;
    /// Ticks allowed in one frame before the accumulator is dropped
    pub const MAX_TICKS_PER_FRAME: u32 = 251;

    /// Default visible arena
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Player defaults (desktop); mobile values live in `Platform`
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_MAX_SPEED: f32 = 0.72;
    pub const PLAYER_ACCEL: f32 = 0.0012;
    /// Multiplicative velocity loss per tick
    pub const PLAYER_FRICTION: f32 = 0.02;
    /// Residual speed snapped to zero
    pub const VELOCITY_FLOOR: f32 = 0.001;
    /// How long an aim target is held after the last aim input
    pub const AIM_HOLD_MS: f32 = 1000.0;
    /// Tilt must exceed this on either axis to count
    pub const TILT_THRESHOLD: f32 = 3.0;
    /// Raw tilt degrees to acceleration units
    pub const TILT_SCALE: f32 = 1.0 / 90.0;

    /// Weapon
    pub const MAX_POWER_LEVEL: u8 = 4;
    pub const POINTS_PER_LEVEL: u32 = 75;
    /// Sideways spacing between parallel shots, as a fraction of player radius
    pub const SHOT_OFFSET_RATIO: f32 = 0.35;
    pub const PROJECTILE_SPEED: f32 = 1.0;
    /// Rendered trail length in milliseconds of travel
    pub const PROJECTILE_TRAIL_MS: f32 = 10.0;

    /// Hazard radii as multiples of the player radius
    pub const ROCK_RADIUS_RATIO: f32 = 2.0;
    pub const BIG_ROCK_RADIUS_RATIO: f32 = 4.0;
    pub const MIN_ROCK_RADIUS_RATIO: f32 = 1.0;
    pub const COMET_RADIUS_RATIO: f32 = 1.0;
    pub const UFO_RADIUS_RATIO: f32 = 1.5;
    pub const UPGRADE_RADIUS_RATIO: f32 = 2.5;

    /// Hazard speeds
    pub const ROCK_SPEED: f32 = 0.3;
    pub const COMET_SPEED: f32 = ROCK_SPEED * 2.0;
    pub const UFO_SPEED: f32 = ROCK_SPEED * 0.67;
    pub const UPGRADE_SPEED: f32 = 0.2;

    /// Score values
    pub const ROCK_VALUE: u32 = 1;
    pub const BIG_ROCK_VALUE: u32 = 3;
    pub const COMET_HIT_VALUE: u32 = 7;
    pub const UFO_HIT_VALUE: u32 = 8;
    pub const ENEMY_SHOT_VALUE: u32 = 1;

    /// Fragments of a big rock share this multiple of its radius
    pub const FRAGMENT_BUDGET_RATIO: f32 = 1.5;
    /// Divergence of the side fragments (radians)
    pub const FRAGMENT_CONE_MIN: f32 = std::f32::consts::PI / 6.0;
    pub const FRAGMENT_CONE_MAX: f32 = std::f32::consts::PI / 4.0;
    /// Score above which a third fragment may appear
    pub const THIRD_FRAGMENT_SCORE: u32 = 25;

    /// Comet arc: max turn per tick (radians)
    pub const COMET_TURN_RATE: f32 = 0.012;

    /// UFO pursuit
    pub const UFO_TURN_FACTOR: f32 = 0.05;
    pub const UFO_MAX_TURN: f32 = 0.1;
    pub const UFO_MIN_CHASE_MS: f32 = 3000.0;
    pub const UFO_CHASE_BASE_MS: f32 = 5000.0;
    pub const UFO_MIN_FIRE_MS: f32 = 1000.0;
    pub const UFO_FIRE_BASE_MS: f32 = 1500.0;

    /// Spawn cadence
    pub const FIRST_RUN_SPAWN_DELAY_MS: f32 = 3000.0;
    pub const SPAWN_DELAY_MS: f32 = 2000.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 1000.0;
    pub const DEBUG_MIN_SPAWN_INTERVAL_MS: f32 = 5000.0;
    /// Interval shrinks by max(this, score) per spawn
    pub const SPAWN_TIGHTEN_FLOOR: u32 = 25;
    pub const SPAWN_TIGHTEN_FACTOR: f32 = 1.0;
    pub const UPGRADE_COOLDOWN_MIN_MS: f32 = 5000.0;
    pub const UPGRADE_COOLDOWN_MAX_MS: f32 = 10000.0;

    /// Display colors (0xRRGGBB)
    pub const PLAYER_COLOR: u32 = 0xAAAAAA;
    pub const ROCK_COLOR: u32 = 0xFFFFFF;
    pub const COMET_COLOR: u32 = 0xFFDD00;
    pub const UFO_COLOR: u32 = 0xFF0000;
    pub const UPGRADE_COLOR: u32 = 0x00FF00;
    pub const SHAPE_FILL: u32 = 0x000000;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector pointing along `theta`
#[inline]
pub fn heading_vector(theta: f32) -> Vec2 {
    polar_to_cartesian(1.0, theta)
}

/// Angle of the line from `from` to `to`
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
