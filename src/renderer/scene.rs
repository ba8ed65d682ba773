//! Draw list generation
//!
//! Turns a [`GameState`] into flat 2D primitives. Backend-agnostic so the
//! layout and explosion animation can be tested natively.

use glam::Vec2;
use std::fmt;

use crate::sim::{Bounded, Explosion, GameState, Rect};

/// RGBA color with a fractional alpha, as canvas fill styles take it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const PLAYER: Color = Color::rgb(0, 255, 0);
    pub const BULLET: Color = Color::rgb(255, 255, 255);
    pub const ASTEROID: Color = Color::rgb(255, 0, 0);
    pub const EXPLOSION_OUTER: Color = Color::rgb(255, 165, 0);
    pub const EXPLOSION_INNER: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// CSS `rgba()` string
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole playfield
    Clear { width: f32, height: f32 },
    /// Filled axis-aligned rectangle
    Rect { rect: Rect, color: Color },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// Build the draw list for one frame, back to front
pub fn build_scene(state: &GameState) -> Vec<DrawCmd> {
    let config = &state.config;
    let mut cmds = Vec::with_capacity(primitive_count(state));

    cmds.push(DrawCmd::Clear {
        width: config.playfield_width,
        height: config.playfield_height,
    });

    cmds.push(DrawCmd::Rect {
        rect: state.player.bounds(),
        color: Color::PLAYER,
    });

    cmds.extend(state.bullets.iter().map(|b| DrawCmd::Rect {
        rect: b.bounds(),
        color: Color::BULLET,
    }));

    cmds.extend(state.asteroids.iter().map(|a| DrawCmd::Rect {
        rect: a.bounds(),
        color: Color::ASTEROID,
    }));

    if config.explosions {
        for explosion in &state.explosions {
            cmds.extend(explosion_shapes(explosion));
        }
    }

    cmds
}

/// Two concentric discs that grow and fade over the explosion's lifetime
pub fn explosion_shapes(explosion: &Explosion) -> [DrawCmd; 2] {
    let t = explosion.progress();
    let alpha = 1.0 - t;
    let size = explosion.size * (1.0 + t);
    let center = explosion.pos + Vec2::splat(explosion.size / 2.0);

    [
        DrawCmd::Circle {
            center,
            radius: size / 2.0,
            color: Color::EXPLOSION_OUTER.with_alpha(alpha),
        },
        DrawCmd::Circle {
            center,
            radius: size / 4.0,
            color: Color::EXPLOSION_INNER.with_alpha(alpha),
        },
    ]
}

/// Total number of primitives a state will produce (for buffer sizing)
pub fn primitive_count(state: &GameState) -> usize {
    let explosions = if state.config.explosions {
        state.explosions.len() * 2
    } else {
        0
    };
    2 + state.bullets.len() + state.asteroids.len() + explosions
}
