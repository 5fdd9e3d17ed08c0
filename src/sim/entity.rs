//! Entity model
//!
//! One `Entity` struct for every live object. Behavior is selected by the
//! closed `EntityKind` variant; what the collision filter cares about is the
//! `Tags` capability set, not the variant.

use bitflags::bitflags;
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shape::{self, Shape};
use super::timer::Countdown;
use crate::consts::*;
use crate::heading_vector;
use crate::settings::Tuning;

/// Stable entity handle, never reused within a session
pub type EntityId = u32;

bitflags! {
    /// Capabilities the collision filter looks at
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Tags: u8 {
        /// Can be hit by a probe (player, player projectile)
        const HAZARD = 0x01;
        /// Benign pickup: never destroys the probe that touches it
        const UPGRADE = 0x02;
    }
}

/// Player-only state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current aim point, held for a while after the last aim input
    pub aim_target: Option<Vec2>,
    pub aim_hold: Countdown,
}

/// UFO pursuit and fire-control state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UfoState {
    pub chase_elapsed_ms: f32,
    pub chase_limit_ms: f32,
    /// Next enemy shot
    pub fire_control: Countdown,
}

impl UfoState {
    /// Still hunting the player
    pub fn is_chasing(&self) -> bool {
        self.chase_elapsed_ms < self.chase_limit_ms
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Player(PlayerState),
    /// Player shot
    Projectile,
    /// Rock; a big one splits when destroyed in bounds
    Asteroid { big: bool },
    /// Fast rock drifting on an arc
    Comet { turn_rate: f32 },
    Ufo(UfoState),
    /// Weapon power-up
    Upgrade,
    /// UFO shot
    EnemyProjectile,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Player(_) => "player",
            EntityKind::Projectile => "projectile",
            EntityKind::Asteroid { big: false } => "asteroid",
            EntityKind::Asteroid { big: true } => "big asteroid",
            EntityKind::Comet { .. } => "comet",
            EntityKind::Ufo(_) => "ufo",
            EntityKind::Upgrade => "upgrade",
            EntityKind::EnemyProjectile => "enemy projectile",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Assigned by the registry on registration
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Direction × speed, px/ms
    pub vel: Vec2,
    pub radius: f32,
    /// Radians
    pub heading: f32,
    /// Set once by the destroy sequence
    pub destroyed: bool,
    /// Latched true the first time the entity is seen inside the arena
    pub can_destroy: bool,
    pub tags: Tags,
    /// Originator (not owner); exempts same-lineage collisions
    pub parent_id: Option<EntityId>,
    /// Score credited on destruction
    pub value: u32,
    pub shape: Shape,
    pub color: u32,
}

impl Entity {
    fn moving(kind: EntityKind, pos: Vec2, heading: f32, speed: f32, radius: f32) -> Self {
        Self {
            id: 0,
            kind,
            pos,
            vel: heading_vector(heading) * speed,
            radius,
            heading,
            destroyed: false,
            can_destroy: false,
            tags: Tags::empty(),
            parent_id: None,
            value: 0,
            shape: Shape::default(),
            color: ROCK_COLOR,
        }
    }

    fn hazard(mut self, value: u32, shape: Shape, color: u32) -> Self {
        self.tags |= Tags::HAZARD;
        self.value = value;
        self.shape = shape;
        self.color = color;
        self
    }

    /// Player craft, facing up
    pub fn player(pos: Vec2, tuning: &Tuning) -> Self {
        let mut player = Self::moving(
            EntityKind::Player(PlayerState::default()),
            pos,
            -std::f32::consts::FRAC_PI_2,
            0.0,
            tuning.unit,
        );
        player.can_destroy = true;
        player.shape = Shape::new(&shape::TRIANGLE);
        player.color = PLAYER_COLOR;
        player
    }

    pub fn projectile(pos: Vec2, heading: f32, parent: EntityId, tuning: &Tuning) -> Self {
        let mut shot = Self::moving(
            EntityKind::Projectile,
            pos,
            heading,
            PROJECTILE_SPEED * tuning.scale,
            0.0,
        );
        // Fired from a player clamped inside the arena
        shot.can_destroy = true;
        shot.parent_id = Some(parent);
        shot.color = PLAYER_COLOR;
        shot
    }

    /// Rock of an explicit radius
    pub fn asteroid_sized(
        pos: Vec2,
        heading: f32,
        radius: f32,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Self {
        Self::moving(
            EntityKind::Asteroid { big: false },
            pos,
            heading,
            ROCK_SPEED * tuning.scale,
            radius,
        )
        .hazard(
            ROCK_VALUE,
            Shape::jittered(&shape::OCTAGON, rng),
            ROCK_COLOR,
        )
    }

    pub fn asteroid(pos: Vec2, heading: f32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self::asteroid_sized(pos, heading, tuning.unit * ROCK_RADIUS_RATIO, tuning, rng)
    }

    pub fn big_asteroid(pos: Vec2, heading: f32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let mut rock = Self::asteroid_sized(
            pos,
            heading,
            tuning.unit * BIG_ROCK_RADIUS_RATIO,
            tuning,
            rng,
        );
        rock.kind = EntityKind::Asteroid { big: true };
        rock.value = BIG_ROCK_VALUE;
        rock
    }

    /// Comets are worth nothing unless shot down in view
    pub fn comet(pos: Vec2, heading: f32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let turn_rate = rng.random_range(-COMET_TURN_RATE..COMET_TURN_RATE);
        Self::moving(
            EntityKind::Comet { turn_rate },
            pos,
            heading,
            COMET_SPEED * tuning.scale,
            tuning.unit * COMET_RADIUS_RATIO,
        )
        .hazard(0, Shape::jittered(&shape::PENTAGON, rng), COMET_COLOR)
    }

    pub fn ufo(
        pos: Vec2,
        heading: f32,
        chase_limit_ms: f32,
        first_shot_ms: f32,
        tuning: &Tuning,
    ) -> Self {
        let state = UfoState {
            chase_elapsed_ms: 0.0,
            chase_limit_ms,
            fire_control: Countdown::started(first_shot_ms),
        };
        Self::moving(
            EntityKind::Ufo(state),
            pos,
            heading,
            UFO_SPEED * tuning.scale,
            tuning.unit * UFO_RADIUS_RATIO,
        )
        .hazard(0, Shape::new(&shape::DIAMOND), UFO_COLOR)
    }

    pub fn upgrade(pos: Vec2, heading: f32, tuning: &Tuning) -> Self {
        let mut upgrade = Self::moving(
            EntityKind::Upgrade,
            pos,
            heading,
            UPGRADE_SPEED * tuning.scale,
            tuning.unit * UPGRADE_RADIUS_RATIO,
        )
        .hazard(0, Shape::new(&shape::HEXAGON), UPGRADE_COLOR);
        upgrade.tags |= Tags::UPGRADE;
        upgrade
    }

    /// UFO shot; sized like the player so near misses still count
    pub fn enemy_projectile(pos: Vec2, heading: f32, parent: EntityId, tuning: &Tuning) -> Self {
        let mut shot = Self::moving(
            EntityKind::EnemyProjectile,
            pos,
            heading,
            PROJECTILE_SPEED * tuning.scale,
            tuning.unit,
        )
        .hazard(ENEMY_SHOT_VALUE, Shape::default(), UFO_COLOR);
        shot.parent_id = Some(parent);
        shot
    }

    pub fn is_hazard(&self) -> bool {
        self.tags.contains(Tags::HAZARD)
    }

    pub fn is_upgrade(&self) -> bool {
        self.tags.contains(Tags::UPGRADE)
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    /// Inside the arena, allowing the body's own radius past each edge
    pub fn in_bounds(&self, arena: Vec2) -> bool {
        let r = self.radius;
        -r <= self.pos.x && self.pos.x <= arena.x + r && -r <= self.pos.y && self.pos.y <= arena.y + r
    }

    /// Any timer owned by this entity still pending
    pub fn has_armed_timers(&self) -> bool {
        match &self.kind {
            EntityKind::Ufo(ufo) => ufo.fire_control.is_armed(),
            EntityKind::Player(player) => player.aim_hold.is_armed(),
            _ => false,
        }
    }

    pub fn cancel_timers(&mut self) {
        match &mut self.kind {
            EntityKind::Ufo(ufo) => ufo.fire_control.cancel(),
            EntityKind::Player(player) => player.aim_hold.cancel(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_capability_tags() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let rock = Entity::asteroid(Vec2::ZERO, 0.0, &tuning, &mut rng);
        let upgrade = Entity::upgrade(Vec2::ZERO, 0.0, &tuning);
        let shot = Entity::projectile(Vec2::ZERO, 0.0, 1, &tuning);
        assert!(rock.is_hazard() && !rock.is_upgrade());
        assert!(upgrade.is_hazard() && upgrade.is_upgrade());
        assert!(!shot.is_hazard());
    }

    #[test]
    fn test_velocity_is_heading_times_speed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let comet = Entity::comet(Vec2::ZERO, 1.0, &tuning, &mut rng);
        assert!((comet.vel.length() - COMET_SPEED).abs() < 1e-5);
        assert!((comet.vel.y.atan2(comet.vel.x) - 1.0).abs() < 1e-5);
        assert!(matches!(comet.kind, EntityKind::Comet { turn_rate } if turn_rate.abs() <= COMET_TURN_RATE));
    }

    #[test]
    fn test_big_asteroid_is_twice_a_rock() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let rock = Entity::asteroid(Vec2::ZERO, 0.0, &tuning, &mut rng);
        let big = Entity::big_asteroid(Vec2::ZERO, 0.0, &tuning, &mut rng);
        assert!((big.radius - 2.0 * rock.radius).abs() < 1e-5);
        assert_eq!(big.value, BIG_ROCK_VALUE);
    }

    #[test]
    fn test_in_bounds_allows_radius_margin() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut rock = Entity::asteroid(Vec2::new(-10.0, 100.0), 0.0, &tuning, &mut rng);
        assert!(rock.in_bounds(tuning.arena));
        rock.pos.x = -rock.radius - 1.0;
        assert!(!rock.in_bounds(tuning.arena));
    }

    #[test]
    fn test_ufo_owns_fire_timer() {
        let tuning = Tuning::default();
        let mut ufo = Entity::ufo(Vec2::ZERO, 0.0, 3000.0, 1500.0, &tuning);
        assert!(ufo.has_armed_timers());
        ufo.cancel_timers();
        assert!(!ufo.has_armed_timers());
    }
}
