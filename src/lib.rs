//! Asteroid Dodge - a small browser arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `renderer`: Draw list generation and the Canvas 2D backend
//! - `platform`: Keyboard state and fixed-timestep frame pacing
//! - `config`: Data-driven game tuning

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Horizontal speed (pixels per tick)
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Upward speed (pixels per tick)
    pub const BULLET_SPEED: f32 = 7.0;

    /// Asteroids are square
    pub const ASTEROID_SIZE: f32 = 30.0;
    /// Downward speed range [min, max) in pixels per tick
    pub const ASTEROID_MIN_SPEED: f32 = 2.0;
    pub const ASTEROID_MAX_SPEED: f32 = 4.0;
    /// Ticks between spawns (~1 second at 60 Hz)
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;

    /// Explosion lifetime in ticks
    pub const EXPLOSION_MAX_FRAMES: u32 = 15;
    /// Explosion diameter relative to the destroyed asteroid
    pub const EXPLOSION_SCALE: f32 = 1.5;

    /// Points per asteroid shot down
    pub const SCORE_PER_ASTEROID: u64 = 10;
}
