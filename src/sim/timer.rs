//! Owned countdown timers
//!
//! Every delayed action in the game (fire cadence, spawn cadence, upgrade
//! cooldown, aim hold) is a `Countdown` stored on its owner and advanced only
//! from inside a simulation tick. Nothing fires while the game is paused, and
//! nothing fires once the owner is gone.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: f32,
    armed: bool,
}

impl Countdown {
    /// A countdown already running
    pub fn started(ms: f32) -> Self {
        let mut countdown = Self::default();
        countdown.start(ms);
        countdown
    }

    /// (Re)arm with a fresh delay
    pub fn start(&mut self, ms: f32) {
        self.remaining_ms = ms.max(0.0);
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.remaining_ms = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Milliseconds left (0 when disarmed)
    pub fn remaining(&self) -> f32 {
        if self.armed { self.remaining_ms } else { 0.0 }
    }

    /// Advance by `dt_ms`. Returns true exactly once, on the tick the delay
    /// runs out; the countdown disarms itself when it fires.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining_ms -= dt_ms;
        if self.remaining_ms <= 0.0 {
            self.cancel();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut c = Countdown::started(50.0);
        assert!(!c.advance(20.0));
        assert!(!c.advance(20.0));
        assert!(c.advance(20.0));
        assert!(!c.is_armed());
        assert!(!c.advance(20.0));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut c = Countdown::started(10.0);
        c.cancel();
        assert!(!c.advance(100.0));
        assert_eq!(c.remaining(), 0.0);
    }

    #[test]
    fn test_not_advanced_means_frozen() {
        let mut c = Countdown::started(100.0);
        c.advance(40.0);
        // No ticks while paused: the remaining delay is kept as-is
        assert!((c.remaining() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_start_fires_next_advance() {
        let mut c = Countdown::started(-5.0);
        assert!(c.advance(0.0));
    }
}
