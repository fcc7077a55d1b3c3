//! Input intent snapshot
//!
//! The host translates its own pointer or key events into this snapshot;
//! the simulation only reads the latest values during an update.

use serde::{Deserialize, Serialize};

/// What the player currently wants the ship to do
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    /// Forward thrust, 0.0 or 1.0
    pub forward: f32,
    /// Turn axis: 1.0 turns left (counter-clockwise), -1.0 turns right
    pub hor_axis: f32,
    /// Fire button held
    pub shooting: bool,
    /// Teleport button held
    pub teleport: bool,
}

impl InputIntent {
    /// Thrust held
    pub fn thrust(mut self, on: bool) -> Self {
        self.forward = if on { 1.0 } else { 0.0 };
        self
    }

    /// Turn direction, clamped to [-1, 1]
    pub fn turn(mut self, axis: f32) -> Self {
        self.hor_axis = axis.clamp(-1.0, 1.0);
        self
    }

    pub fn fire(mut self, on: bool) -> Self {
        self.shooting = on;
        self
    }

    pub fn jump(mut self, on: bool) -> Self {
        self.teleport = on;
        self
    }

    /// Everything released (used when the level pauses)
    pub fn released() -> Self {
        Self::default()
    }
}
