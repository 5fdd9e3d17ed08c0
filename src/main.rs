//! Headless demo: the autopilot plays one game and the final HUD is printed
//! as JSON.
//!
//! Usage: `blasteroids [settings.json]`. Set `RUST_LOG=debug` to watch spawns
//! and sound cues.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use blasteroids::audio::LogAudio;
use blasteroids::consts::TIME_STEP_MS;
use blasteroids::render::Renderer;
use blasteroids::{Game, Settings};

/// Give up after this much simulated time
const MAX_DEMO_FRAMES: u64 = 60 * 60 * 30;

/// Renderer that only counts what it was asked to draw
#[derive(Debug, Default)]
struct CountingRenderer {
    frames: u64,
    shapes: u64,
}

impl Renderer for CountingRenderer {
    fn clear(&mut self) {
        self.frames += 1;
    }

    fn draw_polygon(&mut self, _points: &[Vec2], _stroke: u32, _fill: Option<u32>) {
        self.shapes += 1;
    }

    fn draw_points(&mut self, _points: &[Vec2], _stroke: u32) {
        self.shapes += 1;
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Demo run on {} with seed {}", settings.platform.as_str(), seed);

    let audio = Box::new(LogAudio::new(settings.muted));
    let mut game = Game::new(settings, seed, 0.0, audio)?;
    game.set_autopilot(true);
    game.toggle_pause(0.0);

    let mut renderer = CountingRenderer::default();
    let mut now = 0.0;
    for _ in 0..MAX_DEMO_FRAMES {
        now += f64::from(TIME_STEP_MS);
        game.frame(now, &mut renderer);
        if game.is_game_over() {
            break;
        }
    }

    log::info!(
        "Drew {} shapes over {} frames",
        renderer.shapes,
        renderer.frames
    );
    println!("{}", serde_json::to_string_pretty(&game.hud())?);
    if let Some(lines) = game.game_over_lines() {
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}
