//! Sound cue seam
//!
//! The simulation only queues `SoundEffect`s; whatever owns an `AudioSink`
//! plays them after the frame. Playback is fire-and-forget.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player volley
    Weapon,
    /// Small rock or enemy shot blown up
    BoomSmall,
    /// Big rock blown up
    BoomBig,
    /// Comet entering
    CometWhoosh,
    /// Comet blown up
    CometBoom,
    /// UFO entering
    UfoEngine,
    /// UFO shot
    UfoFire,
    /// UFO blown up
    UfoGone,
    /// Upgrade entering
    UpgradeSpawn,
    /// Upgrade collected
    UpgradeCollect,
    /// Pause toggled
    Pause,
    /// End-of-game jingles, one per rank
    RankD,
    RankC,
    RankB,
    RankA,
    RankS,
}

impl SoundEffect {
    /// Asset name a platform backend would load
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Weapon => "weapon",
            SoundEffect::BoomSmall => "boom_small",
            SoundEffect::BoomBig => "boom_big",
            SoundEffect::CometWhoosh => "comet_whoosh",
            SoundEffect::CometBoom => "comet_boom",
            SoundEffect::UfoEngine => "ufo_engine",
            SoundEffect::UfoFire => "ufo_fire",
            SoundEffect::UfoGone => "ufo_gone",
            SoundEffect::UpgradeSpawn => "upgrade_spawn",
            SoundEffect::UpgradeCollect => "upgrade_collect",
            SoundEffect::Pause => "pause",
            SoundEffect::RankD => "rank_d",
            SoundEffect::RankC => "rank_c",
            SoundEffect::RankB => "rank_b",
            SoundEffect::RankA => "rank_a",
            SoundEffect::RankS => "rank_s",
        }
    }
}

/// Anything that can play a cue
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Headless sink: cues go to the log
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new(false)
    }
}

impl LogAudio {
    pub fn new(muted: bool) -> Self {
        Self {
            master_volume: 0.8,
            muted,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Cues actually played (muted ones are dropped)
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("Sound {} at volume {:.2}", effect.as_str(), vol);
    }
}
