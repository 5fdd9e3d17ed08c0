//! Session shell
//!
//! Ties one `GameState` to the loop driver, the current input, an audio sink
//! and a renderer. Platform code owns a `Game`, feeds it input and frame
//! timestamps, and never touches the simulation directly.

use rand::Rng;

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::driver::{FrameReport, LoopDriver};
use crate::hud::Hud;
use crate::render::{Renderer, render};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameState, TickInput, autopilot, tick};

/// Game instance holding all state
pub struct Game {
    settings: Settings,
    state: GameState,
    driver: LoopDriver,
    /// Input applied to the next tick; `firing` is cleared once consumed
    pub input: TickInput,
    audio: Box<dyn AudioSink>,
    /// Final readout, filled on the first frame after game over
    final_hud: Option<Hud>,
    autopilot: bool,
}

impl Game {
    /// First session of the process. Starts paused with a longer lead-in
    /// before the first hazard.
    pub fn new(
        settings: Settings,
        seed: u64,
        now_ms: f64,
        audio: Box<dyn AudioSink>,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut state = GameState::new(settings.tuning(), seed, FIRST_RUN_SPAWN_DELAY_MS);
        state.set_paused(true);
        let mut driver = LoopDriver::new(now_ms);
        driver.pause(now_ms);
        Ok(Self {
            settings,
            state,
            driver,
            input: TickInput::default(),
            audio,
            final_hud: None,
            autopilot: false,
        })
    }

    /// Let the demo bot drive the player
    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for debug tooling and scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Run the ticks owed at `timestamp_ms`, then draw once and play the
    /// cues the ticks raised
    pub fn frame(&mut self, timestamp_ms: f64, renderer: &mut impl Renderer) -> FrameReport {
        let Game {
            state,
            driver,
            input,
            autopilot: bot,
            ..
        } = self;
        let report = driver.frame(timestamp_ms, || {
            if *bot {
                *input = autopilot(state);
            }
            tick(state, input, TIME_STEP_MS);
            input.firing = false;
        });

        render(&self.state, renderer);

        for effect in self.state.drain_sounds() {
            self.audio.play(effect);
        }

        if self.state.is_game_over() && self.final_hud.is_none() {
            let mut hud = Hud::snapshot(&self.state);
            let rank = hud.judge(&mut self.state.rng);
            log::info!(
                "Final score {} ({} shots, {} hits), rank {}",
                hud.score,
                hud.shots,
                hud.hits,
                rank.as_str()
            );
            self.audio.play(rank.jingle());
            self.final_hud = Some(hud);
        }

        report
    }

    /// Pause or resume the driver and the simulation together
    pub fn toggle_pause(&mut self, now_ms: f64) {
        if self.state.is_game_over() {
            return;
        }
        if self.state.is_paused() {
            self.driver.resume(now_ms);
            self.state.set_paused(false);
            log::info!("Resumed");
        } else {
            self.driver.pause(now_ms);
            self.state.set_paused(true);
            log::info!("Paused");
        }
        self.audio.play(SoundEffect::Pause);
    }

    /// Throw the session away and start over. Ids restart with the fresh
    /// registry.
    pub fn restart(&mut self, now_ms: f64) {
        let seed = self.state.rng.random::<u64>();
        self.state = GameState::new(self.settings.tuning(), seed, SPAWN_DELAY_MS);
        self.driver = LoopDriver::new(now_ms);
        self.input = TickInput::default();
        self.final_hud = None;
    }

    /// Live readout, or the graded one once the game is over
    pub fn hud(&self) -> Hud {
        self.final_hud
            .clone()
            .unwrap_or_else(|| Hud::snapshot(&self.state))
    }

    /// End-of-game text, once available
    pub fn game_over_lines(&self) -> Option<Vec<String>> {
        self.final_hud
            .as_ref()
            .map(|hud| hud.game_over_lines(self.settings.platform))
    }
}
