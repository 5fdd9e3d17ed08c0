//! Renderer seam
//!
//! The core never touches a graphics API. It walks the live entities once per
//! frame and hands outlines to whatever implements `Renderer`.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Entity, EntityKind, GameState};

/// Pulse speed for highlighted entities, radians per tick
const PULSE_RATE: f32 = 0.1;

/// Drawing backend
pub trait Renderer {
    /// Start a new frame
    fn clear(&mut self);
    /// Closed outline, optionally filled
    fn draw_polygon(&mut self, points: &[Vec2], stroke: u32, fill: Option<u32>);
    /// Open polyline
    fn draw_points(&mut self, points: &[Vec2], stroke: u32);
}

/// Draw every live entity once
pub fn render(state: &GameState, renderer: &mut impl Renderer) {
    renderer.clear();
    let pulse = (state.time_ticks as f32 * PULSE_RATE).sin() * 0.5 + 0.5;
    for entity in state.registry.iter().filter(|e| e.is_alive()) {
        draw_entity(entity, pulse, renderer);
    }
}

fn draw_entity(entity: &Entity, pulse: f32, renderer: &mut impl Renderer) {
    match entity.kind {
        EntityKind::Projectile | EntityKind::EnemyProjectile => {
            let tail = entity.pos - entity.vel * PROJECTILE_TRAIL_MS;
            renderer.draw_points(&[entity.pos, tail], entity.color);
        }
        EntityKind::Ufo(_) | EntityKind::Upgrade => {
            let points = entity.shape.points(entity.pos, entity.radius, entity.heading);
            let fill = fade_color(entity.color, pulse);
            renderer.draw_polygon(&points, entity.color, Some(fill));
        }
        _ => {
            let points = entity.shape.points(entity.pos, entity.radius, entity.heading);
            renderer.draw_polygon(&points, entity.color, Some(SHAPE_FILL));
        }
    }
}

/// Blend from the background fill toward `color` by `t` (0..=1)
pub fn fade_color(color: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let c = ((color >> shift) & 0xFF) as f32;
        let base = ((SHAPE_FILL >> shift) & 0xFF) as f32;
        ((base + (c - base) * t).round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::tick::{TickInput, tick};

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        polygons: Vec<(usize, u32, Option<u32>)>,
        strokes: Vec<Vec<Vec2>>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self) {
            self.frames += 1;
            self.polygons.clear();
            self.strokes.clear();
        }
        fn draw_polygon(&mut self, points: &[Vec2], stroke: u32, fill: Option<u32>) {
            self.polygons.push((points.len(), stroke, fill));
        }
        fn draw_points(&mut self, points: &[Vec2], _stroke: u32) {
            self.strokes.push(points.to_vec());
        }
    }

    #[test]
    fn test_fade_color_endpoints() {
        assert_eq!(fade_color(0xFF8800, 0.0), SHAPE_FILL);
        assert_eq!(fade_color(0xFF8800, 1.0), 0xFF8800);
        assert_eq!(fade_color(0x00FF00, 0.5), 0x008000);
    }

    #[test]
    fn test_each_live_entity_drawn_once() {
        let mut state = GameState::new(Tuning::default(), 3, SPAWN_DELAY_MS);
        let tuning = state.tuning;
        state.spawn(Entity::upgrade(Vec2::new(100.0, 100.0), 0.0, &tuning));
        state.registry.cleanup();

        let mut recorder = Recorder::default();
        render(&state, &mut recorder);
        assert_eq!(recorder.frames, 1);
        // Player triangle and upgrade hexagon
        assert_eq!(recorder.polygons.len(), 2);
        assert!(recorder.polygons.iter().any(|p| p.0 == 3 && p.1 == PLAYER_COLOR));
        assert!(recorder.polygons.iter().any(|p| p.0 == 6 && p.1 == UPGRADE_COLOR));
    }

    #[test]
    fn test_projectile_drawn_as_trail() {
        let mut state = GameState::new(Tuning::default(), 3, SPAWN_DELAY_MS);
        let fire = TickInput {
            firing: true,
            ..Default::default()
        };
        tick(&mut state, &fire, TIME_STEP_MS);

        let mut recorder = Recorder::default();
        render(&state, &mut recorder);
        assert_eq!(recorder.strokes.len(), 1);
        let trail = &recorder.strokes[0];
        // Tail trails behind the head (the player faces up)
        assert!(trail[1].y > trail[0].y);
    }
}
