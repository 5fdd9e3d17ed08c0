//! Destroy sequence shared by every entity
//!
//! `destroy` is idempotent: the `destroyed` flag guards it, so a second call
//! is a no-op with no score delta, no sound and no second removal.

use super::entity::{Entity, EntityId};
use super::hazards;
use super::state::GameState;

/// Destroy an entity that is not currently stored in the registry (taken out
/// for update, or a probe). Returns false if it was already destroyed.
pub fn destroy(state: &mut GameState, entity: &mut Entity) -> bool {
    if entity.destroyed {
        return false;
    }
    entity.destroyed = true;
    entity.cancel_timers();

    let in_bounds = entity.in_bounds(state.tuning.arena);
    if entity.is_player() {
        state.end_game();
    } else if entity.is_hazard() {
        hazards::before_score(state, entity, in_bounds);
        if !state.is_game_over() {
            state.score += entity.value;
            if in_bounds {
                if let Some(effect) = hazards::destroy_sound(entity) {
                    state.play(effect);
                }
            }
        }
    }

    log::trace!("Destroyed {} #{}", entity.kind.name(), entity.id);
    state.registry.deregister(entity.id);
    true
}

/// Destroy an entity by id. Returns the value it was worth when this call
/// destroyed it, or None if it was unknown or already gone.
pub fn destroy_id(state: &mut GameState, id: EntityId) -> Option<u32> {
    let (mut entity, slot) = state.registry.take(id)?;
    let destroyed = destroy(state, &mut entity);
    let value = entity.value;
    state.registry.restore(entity, slot);
    destroyed.then_some(value)
}

/// Game over: destroy everything still registered and drop every director
/// delay, so no timer outlives the session.
pub fn flush(state: &mut GameState) {
    let ids = state.registry.all_ids();
    let count = ids.len();
    for id in ids {
        destroy_id(state, id);
    }
    state.director.cancel_all();
    log::debug!("Flushed {} entities", count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Tuning;
    use glam::Vec2;

    fn session() -> GameState {
        GameState::new(Tuning::default(), 4, SPAWN_DELAY_MS)
    }

    #[test]
    fn test_destroy_twice_credits_once() {
        let mut state = session();
        let tuning = state.tuning;
        let mut rng = state.rng.clone();
        let id = state.spawn(Entity::asteroid(Vec2::new(100.0, 100.0), 0.0, &tuning, &mut rng));
        state.registry.cleanup();

        assert_eq!(destroy_id(&mut state, id), Some(ROCK_VALUE));
        let score = state.score;
        let sounds = state.sounds.len();
        assert_eq!(destroy_id(&mut state, id), None);
        assert_eq!(state.score, score);
        assert_eq!(state.sounds.len(), sounds);
        assert_eq!(state.registry.pending_removal(), &[id]);
    }

    #[test]
    fn test_destroy_unknown_id_is_noop() {
        let mut state = session();
        assert_eq!(destroy_id(&mut state, 4242), None);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_player_destroy_ends_game() {
        let mut state = session();
        let player = state.player_id;
        destroy_id(&mut state, player);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_no_score_after_game_over() {
        let mut state = session();
        let tuning = state.tuning;
        let mut rng = state.rng.clone();
        let id = state.spawn(Entity::asteroid(Vec2::new(50.0, 50.0), 0.0, &tuning, &mut rng));
        state.end_game();
        destroy_id(&mut state, id);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_flush_leaves_no_armed_timers() {
        let mut state = session();
        let tuning = state.tuning;
        state.spawn(Entity::ufo(Vec2::new(10.0, 10.0), 0.0, 4000.0, 1500.0, &tuning));
        state.registry.cleanup();
        // One more still staged
        state.spawn(Entity::ufo(Vec2::new(20.0, 10.0), 0.0, 4000.0, 1500.0, &tuning));
        state.director.schedule_ufo_respawn();

        state.end_game();
        flush(&mut state);

        assert!(state.registry.iter().all(|e| e.destroyed && !e.has_armed_timers()));
        assert!(state.registry.staged().all(|e| e.destroyed && !e.has_armed_timers()));
        assert!(!state.director.has_pending_timers());
        state.registry.cleanup();
        assert!(state.registry.is_empty());
    }
}
