//! Host bridge calls
//!
//! The simulation talks to persistence and haptics only through
//! [`Platform`]. Every method has a no-op default so a host that is not
//! attached yet behaves like [`NullPlatform`].

/// Calls out of the simulation into the embedding host
pub trait Platform {
    /// Last stored high score (0 when nothing is stored)
    fn read_high_score(&mut self) -> u32 {
        0
    }

    /// Hand a new high score to the host's store
    fn submit_high_score(&mut self, _score: u32) {}

    /// Fire-and-forget haptic pulse
    fn vibrate(&mut self) {}
}

/// Platform used before a host attaches
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlatform;

impl Platform for NullPlatform {}
