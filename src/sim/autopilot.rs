//! Demo autopilot
//!
//! Produces the input a simple bot would give: face and shoot the nearest
//! threat, and go grab the upgrade when nothing dangerous is close.

use super::entity::Entity;
use super::state::GameState;
use super::tick::TickInput;

/// Ticks between trigger pulls
const FIRE_EVERY_TICKS: u64 = 20;
/// A threat closer than this many of its radii takes priority over the upgrade
const SAFE_DISTANCE_RADII: f32 = 6.0;

/// Input for the next tick
pub fn autopilot(state: &GameState) -> TickInput {
    let Some(player) = state.player().filter(|p| p.is_alive()) else {
        return TickInput::default();
    };
    let arena = state.tuning.arena;
    let visible = |e: &&Entity| e.is_alive() && e.is_hazard() && e.in_bounds(arena);

    let nearest_threat = state
        .registry
        .iter()
        .filter(visible)
        .filter(|e| !e.is_upgrade())
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .partial_cmp(&b.pos.distance_squared(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let upgrade = state.registry.iter().filter(visible).find(|e| e.is_upgrade());

    let threat_close = nearest_threat
        .is_some_and(|h| h.pos.distance(player.pos) < h.radius * SAFE_DISTANCE_RADII);

    let (target, chasing_upgrade) = match upgrade {
        Some(u) if !threat_close => (Some(u.pos), true),
        _ => (nearest_threat.map(|h| h.pos), false),
    };

    TickInput {
        aim_target: target,
        boosting: chasing_upgrade,
        firing: target.is_some() && state.time_ticks % FIRE_EVERY_TICKS == 0,
        tilt: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Tuning;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> GameState {
        GameState::new(Tuning::default(), 5, SPAWN_DELAY_MS)
    }

    #[test]
    fn test_idle_when_nothing_to_shoot() {
        let state = session();
        assert_eq!(autopilot(&state), TickInput::default());
    }

    #[test]
    fn test_aims_at_nearest_threat() {
        let mut state = session();
        let tuning = state.tuning;
        let mut rng = Pcg32::seed_from_u64(1);
        let near = state.player_pos + Vec2::new(200.0, 0.0);
        state.spawn(Entity::asteroid(Vec2::new(50.0, 50.0), 0.0, &tuning, &mut rng));
        state.spawn(Entity::asteroid(near, 0.0, &tuning, &mut rng));
        state.registry.cleanup();

        let input = autopilot(&state);
        assert_eq!(input.aim_target, Some(near));
        assert!(!input.boosting);
        // Tick counter starts at zero, so the first call pulls the trigger
        assert!(input.firing);
    }

    #[test]
    fn test_goes_for_upgrade_when_safe() {
        let mut state = session();
        let tuning = state.tuning;
        let mut rng = Pcg32::seed_from_u64(1);
        let upgrade = Vec2::new(300.0, 300.0);
        state.spawn(Entity::asteroid(Vec2::new(40.0, 700.0), 0.0, &tuning, &mut rng));
        state.spawn(Entity::upgrade(upgrade, 0.0, &tuning));
        state.registry.cleanup();

        let input = autopilot(&state);
        assert_eq!(input.aim_target, Some(upgrade));
        assert!(input.boosting);
    }

    #[test]
    fn test_close_threat_beats_upgrade() {
        let mut state = session();
        let tuning = state.tuning;
        let mut rng = Pcg32::seed_from_u64(1);
        let threat = state.player_pos + Vec2::new(0.0, 100.0);
        state.spawn(Entity::asteroid(threat, 0.0, &tuning, &mut rng));
        state.spawn(Entity::upgrade(Vec2::new(300.0, 300.0), 0.0, &tuning));
        state.registry.cleanup();
        state.time_ticks = 7;

        let input = autopilot(&state);
        assert_eq!(input.aim_target, Some(threat));
        assert!(!input.boosting);
        assert!(!input.firing);
    }
}
