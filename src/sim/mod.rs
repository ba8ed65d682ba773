//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (and only in the spawner)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Bounded, Rect, collides};
pub use spawn::Spawner;
pub use state::{Asteroid, Bullet, Explosion, GamePhase, GameState, Player};
pub use tick::{BulletHits, TickInput, TickOutcome, resolve_bullet_hits, tick};
