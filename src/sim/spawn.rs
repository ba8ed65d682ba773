//! Asteroid spawner
//!
//! Stands in for the periodic spawn timer. It lives outside the game state and
//! hands asteroids to the tick as side input, so a seeded spawner plus a
//! recorded input stream replays a run exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Asteroid;
use crate::config::GameConfig;
use crate::consts::ASTEROID_SIZE;

/// Seeded periodic asteroid source
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    interval_ticks: u32,
    countdown: u32,
    playfield_width: f32,
    min_speed: f32,
    max_speed: f32,
}

impl Spawner {
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        let interval_ticks = config.spawn_interval_ticks.max(1);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            interval_ticks,
            countdown: interval_ticks,
            playfield_width: config.playfield_width,
            min_speed: config.asteroid_min_speed,
            max_speed: config.asteroid_max_speed,
        }
    }

    /// Call once per tick. Yields an asteroid every `interval_ticks` calls.
    pub fn poll(&mut self) -> Option<Asteroid> {
        self.countdown -= 1;
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.interval_ticks;
        Some(self.spawn())
    }

    /// Produce one asteroid at a random column with a random fall speed
    pub fn spawn(&mut self) -> Asteroid {
        let span = (self.playfield_width - ASTEROID_SIZE).max(0.0);
        let x = self.uniform(0.0, span);
        let speed = self.uniform(self.min_speed, self.max_speed);
        log::trace!("Spawning asteroid at x={:.1} speed={:.2}", x, speed);
        Asteroid::new(x, speed)
    }

    /// Sample `[low, high)`. Rounding can land `low + r * (high - low)` on
    /// `high` for `r` just below 1, so those draws are redrawn.
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if !(high > low) {
            return low;
        }
        loop {
            let value = low + self.rng.random::<f32>() * (high - low);
            if value < high {
                return value;
            }
        }
    }
}
