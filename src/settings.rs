//! Session configuration
//!
//! Read once at session start (from a JSON file or string) and turned into a
//! `Tuning` that the simulation keeps for the whole run.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings JSON is malformed
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but describe an unplayable session
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Input/display profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Platform {
    #[default]
    Desktop,
    Mobile,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Desktop => "Desktop",
            Platform::Mobile => "Mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" | "pc" => Some(Platform::Desktop),
            "mobile" | "phone" => Some(Platform::Mobile),
            _ => None,
        }
    }

    /// Unscaled player radius
    pub fn player_radius(&self) -> f32 {
        match self {
            Platform::Desktop => PLAYER_RADIUS,
            Platform::Mobile => 20.0,
        }
    }

    /// Player top speed (px/ms)
    pub fn player_max_speed(&self) -> f32 {
        match self {
            Platform::Desktop => PLAYER_MAX_SPEED,
            Platform::Mobile => 0.9,
        }
    }

    /// Player acceleration (px/ms per ms)
    pub fn player_accel(&self) -> f32 {
        match self {
            Platform::Desktop => PLAYER_ACCEL,
            Platform::Mobile => 0.0036,
        }
    }

    /// Global draw/physics scale
    pub fn scale(&self) -> f32 {
        match self {
            Platform::Desktop => 1.0,
            Platform::Mobile => 0.8,
        }
    }
}

/// Game settings, read once at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub platform: Platform,
    /// Visible arena size in pixels
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Debug mode slows the spawn cadence way down
    pub debug: bool,
    /// Drop all sound cues
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            platform: Platform::Desktop,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            seed: None,
            debug: false,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({})",
            path.display(),
            settings.platform.as_str()
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let dims_ok = self.arena_width.is_finite()
            && self.arena_height.is_finite()
            && self.arena_width > 0.0
            && self.arena_height > 0.0;
        if !dims_ok {
            return Err(SettingsError::Invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        Ok(())
    }

    /// Derive simulation tuning for this profile
    pub fn tuning(&self) -> Tuning {
        let scale = self.platform.scale();
        Tuning {
            unit: self.platform.player_radius() * scale,
            scale,
            player_max_speed: self.platform.player_max_speed(),
            player_accel: self.platform.player_accel(),
            arena: Vec2::new(self.arena_width, self.arena_height),
            min_spawn_interval_ms: if self.debug {
                DEBUG_MIN_SPAWN_INTERVAL_MS
            } else {
                MIN_SPAWN_INTERVAL_MS
            },
        }
    }
}

/// Scaled numbers the simulation runs with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Player radius after scaling; hazard radii are multiples of it
    pub unit: f32,
    /// Speed multiplier
    pub scale: f32,
    pub player_max_speed: f32,
    pub player_accel: f32,
    /// Visible bounds (origin at top-left)
    pub arena: Vec2,
    /// Spawn interval never drops below this
    pub min_spawn_interval_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Settings::default().tuning()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse_from_empty_object() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.platform, Platform::Desktop);
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_partial_json_overrides() {
        let settings =
            Settings::from_json(r#"{"platform":"Mobile","seed":42,"debug":true}"#).unwrap();
        assert_eq!(settings.platform, Platform::Mobile);
        assert_eq!(settings.seed, Some(42));
        let tuning = settings.tuning();
        assert_eq!(tuning.min_spawn_interval_ms, DEBUG_MIN_SPAWN_INTERVAL_MS);
        assert!((tuning.unit - 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_arena_rejected() {
        let err = Settings::from_json(r#"{"arena_width":0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!(Platform::from_str("MOBILE"), Some(Platform::Mobile));
        assert_eq!(Platform::from_str("pc"), Some(Platform::Desktop));
        assert_eq!(Platform::from_str("console"), None);
    }
}
