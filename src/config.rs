//! Game tuning
//!
//! Defaults reproduce the classic feel. Overrides come from JSON kept in
//! LocalStorage on the web, or from a file named by an environment variable
//! when running natively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Playfield {width}x{height} cannot fit the player and asteroids")]
    PlayfieldTooSmall { width: f32, height: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("Asteroid speed range [{min}, {max}) is empty")]
    EmptySpeedRange { min: f32, max: f32 },

    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Tunable gameplay parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Pixels per tick
    pub player_speed: f32,
    /// Pixels per tick
    pub bullet_speed: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub spawn_interval_ticks: u32,
    /// Spawn cosmetic explosions when asteroids are shot
    pub explosions: bool,
    pub explosion_max_frames: u32,
    pub score_per_asteroid: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            player_speed: PLAYER_SPEED,
            bullet_speed: BULLET_SPEED,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            explosions: true,
            explosion_max_frames: EXPLOSION_MAX_FRAMES,
            score_per_asteroid: SCORE_PER_ASTEROID,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_width = PLAYER_WIDTH.max(ASTEROID_SIZE);
        if self.playfield_width < min_width || self.playfield_height < PLAYER_HEIGHT {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }

        for (name, value) in [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("asteroid_min_speed", self.asteroid_min_speed),
        ] {
            // NaN fails this check as well
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if !(self.asteroid_max_speed > self.asteroid_min_speed) {
            return Err(ConfigError::EmptySpeedRange {
                min: self.asteroid_min_speed,
                max: self.asteroid_max_speed,
            });
        }

        if self.spawn_interval_ticks == 0 {
            return Err(ConfigError::Zero("spawn_interval_ticks"));
        }
        if self.explosion_max_frames == 0 {
            return Err(ConfigError::Zero("explosion_max_frames"));
        }

        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "asteroid_dodge_config";

    /// Environment variable naming a JSON config file (native only)
    pub const CONFIG_ENV: &'static str = "ASTEROID_DODGE_CONFIG";

    /// Fall back to defaults when no override exists or it is invalid
    fn or_default(source: &str, result: Result<Self, ConfigError>) -> Self {
        match result {
            Ok(config) => {
                log::info!("Loaded config from {}", source);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config from {}: {}", source, e);
                Self::default()
            }
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::or_default("LocalStorage", Self::from_json(&json));
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from the file named by `ASTEROID_DODGE_CONFIG`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::CONFIG_ENV) else {
            log::info!("Using default config");
            return Self::default();
        };

        let result = std::fs::read_to_string(&path)
            .map_err(ConfigError::from)
            .and_then(|json| Self::from_json(&json));
        Self::or_default(&path, result)
    }
}
