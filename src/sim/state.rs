//! Game state and core simulation types
//!
//! Everything the simulation step reads or writes lives in [`GameState`].

use glam::Vec2;

use super::collision::{Bounded, Rect};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Run ended (terminal until the host resets)
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
}

impl Player {
    /// Spawn horizontally at mid-field, resting on the bottom edge
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.playfield_width / 2.0,
                config.playfield_height - PLAYER_HEIGHT,
            ),
        }
    }

    /// Apply held movement keys, then clamp to the playfield
    pub fn steer(&mut self, left: bool, right: bool, speed: f32, playfield_width: f32) {
        if left {
            self.pos.x -= speed;
        }
        if right {
            self.pos.x += speed;
        }
        self.pos.x = self.pos.x.clamp(0.0, (playfield_width - PLAYER_WIDTH).max(0.0));
    }

    /// Horizontal center of the ship
    pub fn center_x(&self) -> f32 {
        self.pos.x + PLAYER_WIDTH / 2.0
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

/// A projectile travelling straight up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    /// Fire from the ship's nose
    pub fn fired_from(player: &Player) -> Self {
        Self {
            pos: Vec2::new(player.center_x(), player.pos.y),
        }
    }

    pub fn advance(&mut self, speed: f32) {
        self.pos.y -= speed;
    }

    /// Still below the top edge
    pub fn in_play(&self) -> bool {
        self.pos.y > 0.0
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// A falling rock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Downward speed in pixels per tick
    pub speed: f32,
}

impl Asteroid {
    /// Create an asteroid just above the top edge
    pub fn new(x: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, -ASTEROID_SIZE),
            speed,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    /// Top edge has not yet passed the bottom of the playfield
    pub fn in_play(&self, playfield_height: f32) -> bool {
        self.pos.y < playfield_height
    }
}

impl Bounded for Asteroid {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ASTEROID_SIZE, ASTEROID_SIZE)
    }
}

/// Cosmetic burst left behind by a destroyed asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    /// Top-left of the destroyed asteroid
    pub pos: Vec2,
    /// Base diameter
    pub size: f32,
    pub frame: u32,
    pub max_frames: u32,
}

impl Explosion {
    pub fn at(asteroid: &Asteroid, max_frames: u32) -> Self {
        Self {
            pos: asteroid.pos,
            size: ASTEROID_SIZE * EXPLOSION_SCALE,
            frame: 0,
            max_frames,
        }
    }

    /// Advance one frame. Returns false once the explosion has expired.
    pub fn advance(&mut self) -> bool {
        self.frame += 1;
        self.frame < self.max_frames
    }

    /// Animation progress in [0, 1)
    pub fn progress(&self) -> f32 {
        if self.max_frames == 0 {
            return 1.0;
        }
        self.frame as f32 / self.max_frames as f32
    }
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tuning this run was started with
    pub config: GameConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Score
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Player ship
    pub player: Player,
    /// Live bullets (unordered)
    pub bullets: Vec<Bullet>,
    /// Live asteroids (unordered)
    pub asteroids: Vec<Asteroid>,
    /// Visual explosions (not gameplay-affecting)
    pub explosions: Vec<Explosion>,
}

impl GameState {
    /// Create a fresh run
    pub fn new(config: GameConfig) -> Self {
        Self {
            player: Player::new(&config),
            config,
            phase: GamePhase::Running,
            score: 0,
            time_ticks: 0,
            bullets: Vec::new(),
            asteroids: Vec::new(),
            explosions: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
