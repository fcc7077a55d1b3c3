//! Score bookkeeping
//!
//! Tracks the running score and the best score seen so far. The best score
//! lives in the host's store; it is read back on every restart and submitted
//! whenever the running score passes it.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Current and best score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    current: u32,
    high: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points; submits a new high score to the host if beaten
    pub fn add_points(&mut self, points: u32, platform: &mut dyn Platform) {
        self.current = self.current.saturating_add(points);
        if self.current > self.high {
            self.high = self.current;
            platform.submit_high_score(self.high);
        }
    }

    /// Zero the running score and refresh the best score from the host
    pub fn on_restart(&mut self, platform: &mut dyn Platform) {
        self.current = 0;
        self.high = platform.read_high_score();
        log::info!("Score reset, high score {}", self.high);
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn high(&self) -> u32 {
        self.high
    }
}
