//! Spawn director
//!
//! Decides what hazard comes next and when. The cadence tightens with every
//! spawn (faster at higher score) down to a floor. All of its delays are
//! `Countdown`s advanced from the tick, so pausing freezes them and game over
//! cancels them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::state::GameState;
use super::timer::Countdown;
use crate::audio::SoundEffect;
use crate::bearing;
use crate::consts::*;

/// What the director can put into play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnKind {
    Asteroid,
    BigAsteroid,
    Comet,
    Ufo,
    Upgrade,
}

/// Weighted hazard tables, strongest band first. Each entry is
/// (score must exceed, table).
const BANDS: &[(u32, &[(SpawnKind, u32)])] = &[
    (300, &[(SpawnKind::BigAsteroid, 1), (SpawnKind::Comet, 1), (SpawnKind::Ufo, 3)]),
    (
        200,
        &[
            (SpawnKind::Asteroid, 1),
            (SpawnKind::BigAsteroid, 1),
            (SpawnKind::Comet, 1),
            (SpawnKind::Ufo, 1),
        ],
    ),
    (150, &[(SpawnKind::Asteroid, 1), (SpawnKind::BigAsteroid, 2), (SpawnKind::Comet, 2)]),
    (100, &[(SpawnKind::Asteroid, 1), (SpawnKind::BigAsteroid, 2), (SpawnKind::Comet, 1)]),
    (50, &[(SpawnKind::Asteroid, 2), (SpawnKind::BigAsteroid, 3), (SpawnKind::Comet, 1)]),
    (3, &[(SpawnKind::Asteroid, 1), (SpawnKind::BigAsteroid, 1)]),
];

const BASELINE: &[(SpawnKind, u32)] = &[(SpawnKind::Asteroid, 1)];

/// Weighted table for a score
pub fn band_for(score: u32) -> &'static [(SpawnKind, u32)] {
    BANDS
        .iter()
        .find(|(above, _)| score > *above)
        .map(|(_, table)| *table)
        .unwrap_or(BASELINE)
}

/// Weighted random pick; single-entry tables never touch the RNG
pub fn pick_weighted(table: &[(SpawnKind, u32)], rng: &mut impl Rng) -> SpawnKind {
    if let [(only, _)] = table {
        return *only;
    }
    let total: u32 = table.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total.max(1));
    for (kind, weight) in table {
        if roll < *weight {
            return *kind;
        }
        roll -= weight;
    }
    SpawnKind::Asteroid
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Delay between scheduled spawns
    pub interval_ms: f32,
    pub min_interval_ms: f32,
    spawn_timer: Countdown,
    /// An upgrade is on screen or its respawn cooldown is running
    pub upgrade_in_play: bool,
    upgrade_cooldown: Countdown,
    /// UFOs that escaped and are due back
    ufo_respawns: Vec<Countdown>,
}

impl SpawnDirector {
    pub fn new(first_delay_ms: f32, min_interval_ms: f32) -> Self {
        let interval_ms = first_delay_ms.max(min_interval_ms);
        Self {
            interval_ms,
            min_interval_ms,
            spawn_timer: Countdown::started(interval_ms),
            upgrade_in_play: false,
            upgrade_cooldown: Countdown::default(),
            ufo_respawns: Vec::new(),
        }
    }

    /// Time until the next scheduled spawn
    pub fn next_spawn_in(&self) -> f32 {
        self.spawn_timer.remaining()
    }

    /// Shrink the interval after a spawn; never below the floor
    pub fn tighten(&mut self, score: u32) {
        let step = score.max(SPAWN_TIGHTEN_FLOOR) as f32 * SPAWN_TIGHTEN_FACTOR;
        self.interval_ms = (self.interval_ms - step).max(self.min_interval_ms);
    }

    /// Pick the next spawn. An upgrade wins when none is in play and the
    /// player's weapon trails the score.
    pub fn choose(&mut self, score: u32, power_level: u8, rng: &mut impl Rng) -> SpawnKind {
        let trailing = score / POINTS_PER_LEVEL >= power_level as u32;
        if !self.upgrade_in_play && power_level < MAX_POWER_LEVEL && trailing {
            self.upgrade_in_play = true;
            return SpawnKind::Upgrade;
        }
        pick_weighted(band_for(score), rng)
    }

    /// The upgrade in play was collected or flew off; hold the next one back
    pub fn upgrade_resolved(&mut self, rng: &mut impl Rng) {
        let delay = rng.random_range(UPGRADE_COOLDOWN_MIN_MS..UPGRADE_COOLDOWN_MAX_MS);
        self.upgrade_cooldown.start(delay);
    }

    pub fn upgrade_cooldown_remaining(&self) -> f32 {
        self.upgrade_cooldown.remaining()
    }

    /// Bring an escaped UFO back after the current interval
    pub fn schedule_ufo_respawn(&mut self) {
        self.ufo_respawns.push(Countdown::started(self.interval_ms));
    }

    pub fn pending_ufo_respawns(&self) -> usize {
        self.ufo_respawns.len()
    }

    /// Drop every pending delay (game over)
    pub fn cancel_all(&mut self) {
        self.spawn_timer.cancel();
        self.upgrade_cooldown.cancel();
        self.ufo_respawns.clear();
    }

    pub fn has_pending_timers(&self) -> bool {
        self.spawn_timer.is_armed() || self.upgrade_cooldown.is_armed() || !self.ufo_respawns.is_empty()
    }
}

/// Advance the director's timers by one tick and spawn whatever comes due
pub fn advance(state: &mut GameState, dt: f32) {
    if state.is_game_over() {
        return;
    }

    if state.director.upgrade_cooldown.advance(dt) {
        state.director.upgrade_in_play = false;
        log::debug!("Upgrade cooldown over");
    }

    let mut due_ufos = 0;
    state.director.ufo_respawns.retain_mut(|c| {
        if c.advance(dt) {
            due_ufos += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..due_ufos {
        spawn_kind(state, SpawnKind::Ufo);
    }

    if state.director.spawn_timer.advance(dt) {
        let kind = state
            .director
            .choose(state.score, state.power_level, &mut state.rng);
        spawn_kind(state, kind);
        state.director.tighten(state.score);
        let interval = state.director.interval_ms;
        state.director.spawn_timer.start(interval);
    }
}

/// Put one hazard of `kind` on a random edge point, aimed at the player
pub fn spawn_kind(state: &mut GameState, kind: SpawnKind) {
    let pos = state.random_edge_point();
    let heading = bearing(pos, state.player_pos);
    let tuning = state.tuning;
    let entity = match kind {
        SpawnKind::Asteroid => Entity::asteroid(pos, heading, &tuning, &mut state.rng),
        SpawnKind::BigAsteroid => Entity::big_asteroid(pos, heading, &tuning, &mut state.rng),
        SpawnKind::Comet => {
            state.play(SoundEffect::CometWhoosh);
            Entity::comet(pos, heading, &tuning, &mut state.rng)
        }
        SpawnKind::Ufo => {
            state.play(SoundEffect::UfoEngine);
            let chase_limit = UFO_MIN_CHASE_MS.max(UFO_CHASE_BASE_MS - state.director.interval_ms);
            Entity::ufo(pos, heading, chase_limit, ufo_fire_delay(state.score), &tuning)
        }
        SpawnKind::Upgrade => {
            state.play(SoundEffect::UpgradeSpawn);
            log::info!("Upgrade spawned at score {}", state.score);
            Entity::upgrade(pos, heading, &tuning)
        }
    };
    let id = state.spawn(entity);
    log::debug!(
        "Spawned {:?} #{} at ({:.0}, {:.0}), next in {:.0} ms",
        kind,
        id,
        pos.x,
        pos.y,
        state.director.interval_ms
    );
}

/// Delay between UFO shots; shortens as score climbs
pub fn ufo_fire_delay(score: u32) -> f32 {
    UFO_MIN_FIRE_MS.max(UFO_FIRE_BASE_MS - score as f32)
}
