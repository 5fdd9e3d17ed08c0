//! Game state and session-wide counters
//!
//! Exactly one `GameState` exists per run. Every system takes it by `&mut`;
//! there is no global world.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::director::SpawnDirector;
use super::entity::{Entity, EntityId};
use super::registry::Registry;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::settings::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ticks suspended; every timer keeps its remaining delay
    Paused,
    /// Player destroyed; the world has been flushed
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Trigger pulls
    pub shots: u32,
    /// Player projectiles that connected
    pub hits: u32,
    /// Weapon level, 1..=MAX_POWER_LEVEL
    pub power_level: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player_id: EntityId,
    /// Player position as of its last update
    pub player_pos: Vec2,
    pub registry: Registry,
    pub director: SpawnDirector,
    /// Cues raised since the last drain
    pub sounds: Vec<SoundEffect>,
}

impl GameState {
    /// New session with the player at the center of the arena. The first
    /// hazard arrives after `first_spawn_ms`.
    pub fn new(tuning: Tuning, seed: u64, first_spawn_ms: f32) -> Self {
        let mut registry = Registry::new();
        let center = tuning.arena * 0.5;
        let player_id = registry.register(Entity::player(center, &tuning));
        // Player is live from the first tick
        registry.cleanup();

        log::info!("New session, seed {}", seed);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            shots: 0,
            hits: 0,
            power_level: 1,
            time_ticks: 0,
            player_id,
            player_pos: center,
            registry,
            director: SpawnDirector::new(first_spawn_ms, tuning.min_spawn_interval_ms),
            sounds: Vec::new(),
        }
    }

    /// Register an entity; it goes live at the end of the current tick
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.registry.register(entity)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.registry.get(self.player_id)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Suspend or resume ticking. No effect once the game is over.
    pub fn set_paused(&mut self, paused: bool) {
        self.phase = match (self.phase, paused) {
            (GamePhase::Playing, true) => GamePhase::Paused,
            (GamePhase::Paused, false) => GamePhase::Playing,
            (phase, _) => phase,
        };
    }

    /// Transition to the terminal phase (once)
    pub fn end_game(&mut self) {
        if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {} shots {} hits {} after {} ticks",
                self.score,
                self.shots,
                self.hits,
                self.time_ticks
            );
        }
    }

    /// Queue a sound cue
    pub fn play(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    /// Weapon level the current score entitles the player to
    pub fn earned_power_level(&self) -> u8 {
        let level = self.score / POINTS_PER_LEVEL + 1;
        level.min(MAX_POWER_LEVEL as u32) as u8
    }

    /// Random point on the arena edge
    pub fn random_edge_point(&mut self) -> Vec2 {
        let arena = self.tuning.arena;
        if self.rng.random_bool(0.5) {
            let x = if self.rng.random_bool(0.5) { 0.0 } else { arena.x };
            Vec2::new(x, self.rng.random_range(0.0..arena.y))
        } else {
            let y = if self.rng.random_bool(0.5) { 0.0 } else { arena.y };
            Vec2::new(self.rng.random_range(0.0..arena.x), y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_live_player_at_center() {
        let tuning = Tuning::default();
        let state = GameState::new(tuning, 1, SPAWN_DELAY_MS);
        assert!(state.registry.contains(state.player_id));
        assert_eq!(state.player_pos, tuning.arena * 0.5);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.power_level, 1);
    }

    #[test]
    fn test_edge_points_lie_on_edge() {
        let mut state = GameState::new(Tuning::default(), 9, SPAWN_DELAY_MS);
        let arena = state.tuning.arena;
        for _ in 0..100 {
            let p = state.random_edge_point();
            let on_edge = p.x == 0.0 || p.x == arena.x || p.y == 0.0 || p.y == arena.y;
            assert!(on_edge, "{p:?} not on edge");
        }
    }

    #[test]
    fn test_earned_power_level_caps() {
        let mut state = GameState::new(Tuning::default(), 1, SPAWN_DELAY_MS);
        state.score = 74;
        assert_eq!(state.earned_power_level(), 1);
        state.score = 150;
        assert_eq!(state.earned_power_level(), 3);
        state.score = 10_000;
        assert_eq!(state.earned_power_level(), MAX_POWER_LEVEL);
    }

    #[test]
    fn test_pause_cannot_leave_game_over() {
        let mut state = GameState::new(Tuning::default(), 1, SPAWN_DELAY_MS);
        state.set_paused(true);
        assert!(state.is_paused());
        state.set_paused(false);
        assert_eq!(state.phase, GamePhase::Playing);
        state.end_game();
        state.set_paused(true);
        state.set_paused(false);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_end_game_is_sticky() {
        let mut state = GameState::new(Tuning::default(), 1, SPAWN_DELAY_MS);
        state.end_game();
        state.end_game();
        assert!(state.is_game_over());
    }
}
