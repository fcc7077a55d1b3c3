//! Monotonic frame clock

use std::time::Instant;

use crate::consts::MAX_FRAME_DT;

/// Measures elapsed time between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous call (clamped to [`MAX_FRAME_DT`])
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_FRAME_DT)
    }

    /// Drop whatever time passed since the last tick (used on resume)
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}
