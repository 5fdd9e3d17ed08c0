//! Whole-session scenarios driven through `Game`

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use blasteroids::audio::{AudioSink, SoundEffect};
use blasteroids::consts::*;
use blasteroids::render::Renderer;
use blasteroids::sim::Entity;
use blasteroids::{Game, Platform, Settings, bearing, normalize_angle};

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<SoundEffect>>>);

impl AudioSink for Recorder {
    fn play(&mut self, effect: SoundEffect) {
        self.0.borrow_mut().push(effect);
    }
}

impl Recorder {
    fn count(&self, pred: impl Fn(&SoundEffect) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }
}

struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) {}
    fn draw_polygon(&mut self, _: &[Vec2], _: u32, _: Option<u32>) {}
    fn draw_points(&mut self, _: &[Vec2], _: u32) {}
}

fn is_jingle(e: &SoundEffect) -> bool {
    matches!(
        e,
        SoundEffect::RankD
            | SoundEffect::RankC
            | SoundEffect::RankB
            | SoundEffect::RankA
            | SoundEffect::RankS
    )
}

fn started_game(seed: u64) -> (Game, Recorder) {
    let recorder = Recorder::default();
    let mut game = Game::new(Settings::default(), seed, 0.0, Box::new(recorder.clone())).unwrap();
    game.toggle_pause(0.0);
    (game, recorder)
}

#[test]
fn collision_ends_game_and_ranks_once() {
    let (mut game, audio) = started_game(1);
    let state = game.state_mut();
    let tuning = state.tuning;
    let pos = state.player_pos;
    let mut rng = Pcg32::seed_from_u64(1);
    state.spawn(Entity::asteroid(pos, 0.0, &tuning, &mut rng));
    state.registry.cleanup();

    game.frame(20.0, &mut NullRenderer);
    assert!(game.is_game_over());
    assert!(game.state().registry.is_empty());
    assert!(!game.state().director.has_pending_timers());

    let hud = game.hud();
    assert!(hud.rank.is_some());
    assert_eq!(audio.count(is_jingle), 1);
    let lines = game.game_over_lines().unwrap();
    assert_eq!(lines[0], "GAME OVER");

    // Nothing more happens, and the jingle is not repeated
    let ticks = game.state().time_ticks;
    let last_id = game.state().registry.last_id();
    for i in 1..600 {
        game.frame(20.0 + i as f64 * 16.7, &mut NullRenderer);
    }
    assert_eq!(game.state().time_ticks, ticks);
    assert_eq!(game.state().registry.last_id(), last_id);
    assert_eq!(audio.count(is_jingle), 1);
}

#[test]
fn first_hazard_arrives_after_lead_in() {
    let (mut game, _audio) = started_game(2);
    game.restart(0.0);
    let player = game.state().player_id;

    game.frame(1900.0, &mut NullRenderer);
    assert_eq!(game.state().registry.last_id(), player);

    game.frame(2100.0, &mut NullRenderer);
    let hazards: Vec<_> = game
        .state()
        .registry
        .iter()
        .filter(|e| e.is_hazard())
        .collect();
    assert_eq!(hazards.len(), 1);
    // Launched straight at the player from the edge
    let rock = hazards[0];
    let to_player = bearing(rock.pos, game.state().player_pos);
    assert!(normalize_angle(rock.heading - to_player).abs() < 1e-3);
}

#[test]
fn pause_mid_game_freezes_everything() {
    let (mut game, audio) = started_game(3);
    let mut now = 0.0;
    for _ in 0..120 {
        now += 16.7;
        game.frame(now, &mut NullRenderer);
    }
    let ticks = game.state().time_ticks;
    let next_spawn = game.state().director.next_spawn_in();

    game.toggle_pause(now);
    assert!(game.is_paused());
    for _ in 0..3600 {
        now += 16.7;
        game.frame(now, &mut NullRenderer);
    }
    assert_eq!(game.state().time_ticks, ticks);
    assert_eq!(game.state().director.next_spawn_in(), next_spawn);

    game.toggle_pause(now);
    game.frame(now + 16.7, &mut NullRenderer);
    assert!(game.state().time_ticks <= ticks + 2);
    assert_eq!(audio.count(|e| *e == SoundEffect::Pause), 3);
}

#[test]
fn autopilot_session_keeps_invariants() {
    let (mut game, _audio) = started_game(4);
    game.set_autopilot(true);
    let arena = game.state().tuning.arena;
    let floor = game.state().tuning.min_spawn_interval_ms;

    let mut now = 0.0;
    let mut last_seen = 0;
    for _ in 0..20_000 {
        now += 16.7;
        game.frame(now, &mut NullRenderer);
        let state = game.state();

        // Nothing is left staged or queued between frames
        assert_eq!(state.registry.staged().count(), 0);
        assert!(state.registry.pending_removal().is_empty());
        assert!(state.registry.last_id() >= last_seen);
        last_seen = state.registry.last_id();

        assert!(state.director.interval_ms >= floor);
        assert!((1..=MAX_POWER_LEVEL).contains(&state.power_level));
        assert!(state.hits <= state.shots * MAX_POWER_LEVEL as u32);
        if let Some(player) = state.player() {
            assert!(player.pos.x >= 0.0 && player.pos.x <= arena.x);
            assert!(player.pos.y >= 0.0 && player.pos.y <= arena.y);
        }
        if game.is_game_over() {
            break;
        }
    }

    if game.is_game_over() {
        assert!(game.state().registry.is_empty());
        assert!(!game.state().director.has_pending_timers());
        assert!(game.hud().rank.is_some());
    } else {
        assert!(game.state().shots > 0);
    }
}

#[test]
fn mobile_settings_scale_the_player() {
    let settings = Settings::from_json(r#"{"platform": "Mobile", "seed": 9}"#).unwrap();
    assert_eq!(settings.platform, Platform::Mobile);
    let game = Game::new(settings, 9, 0.0, Box::new(Recorder::default())).unwrap();
    let player = game.state().player().unwrap();
    assert!((player.radius - 16.0).abs() < 1e-5);
    assert_eq!(game.state().tuning.unit, player.radius);
}
