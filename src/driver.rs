//! Fixed-timestep loop driver
//!
//! Turns wall-clock frame timestamps into a whole number of simulation ticks.
//! Time is accumulated as a `Duration` so the remainder carried between frames
//! is exact.
//!
//! The per-frame tick cap is a lossy safety valve: after a long stall the
//! backlog is dropped instead of drained, so the game stays responsive at the
//! cost of simulated time.

use std::time::Duration;

use crate::consts::{MAX_TICKS_PER_FRAME, TIME_STEP};

/// What one frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks: u32,
    /// The tick cap was hit and the backlog dropped
    pub bailed: bool,
}

#[derive(Debug, Clone)]
pub struct LoopDriver {
    accumulator: Duration,
    /// Timestamp of the last frame, in ms
    last_tick_ms: f64,
    paused_at: Option<f64>,
}

impl LoopDriver {
    pub fn new(now_ms: f64) -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_tick_ms: now_ms,
            paused_at: None,
        }
    }

    /// Time banked toward the next tick
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Run the ticks owed at `timestamp_ms`. Paused frames run nothing.
    pub fn frame(&mut self, timestamp_ms: f64, tick: impl FnMut()) -> FrameReport {
        if self.paused_at.is_some() {
            return FrameReport::default();
        }
        let elapsed_ms = (timestamp_ms - self.last_tick_ms).max(0.0);
        self.last_tick_ms = self.last_tick_ms.max(timestamp_ms);
        let elapsed = Duration::try_from_secs_f64(elapsed_ms / 1000.0).unwrap_or(Duration::MAX);
        self.advance(elapsed, tick)
    }

    /// Bank `elapsed` and drain it in whole timesteps
    pub fn advance(&mut self, elapsed: Duration, mut tick: impl FnMut()) -> FrameReport {
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let mut report = FrameReport::default();
        while self.accumulator >= TIME_STEP {
            if report.ticks >= MAX_TICKS_PER_FRAME {
                log::warn!(
                    "Fell {:?} behind after {} ticks, dropping backlog",
                    self.accumulator,
                    report.ticks
                );
                self.accumulator = Duration::ZERO;
                report.bailed = true;
                break;
            }
            tick();
            self.accumulator -= TIME_STEP;
            report.ticks += 1;
        }
        report
    }

    pub fn pause(&mut self, now_ms: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now_ms);
        }
    }

    /// Fold the time spent paused into the last frame time so resuming does
    /// not trigger a catch-up burst
    pub fn resume(&mut self, now_ms: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.last_tick_ms += (now_ms - paused_at).max(0.0);
        }
    }
}
