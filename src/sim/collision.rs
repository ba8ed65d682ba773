//! Axis-aligned collision detection
//!
//! Every entity in the playfield is an upright rectangle with its origin at
//! the top-left corner (y grows downward), so collision is a strict interval
//! test on both axes.

use glam::Vec2;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (never negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test. Rectangles that only share an edge do not collide.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Anything that occupies a rectangle in the playfield
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Check whether two entities' bounding boxes overlap
#[inline]
pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}
