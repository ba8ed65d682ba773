//! Fixed timestep frame pacing
//!
//! `requestAnimationFrame` hands us variable timestamps; the simulation only
//! ever advances in whole `SIM_DT` ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (milliseconds) and get the number of ticks to run
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_ms = Some(now_ms);

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        // Drop whatever could not be caught up
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        steps
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
