//! Platform abstraction layer
//!
//! Seams to the host the simulation is embedded in:
//! - Frame time (monotonic clock sampled once per tick)
//! - Input intent snapshot (filled by the host's pointer/key handling)
//! - Bridge calls (high-score persistence, haptics)

pub mod bridge;
pub mod input;
pub mod time;

pub use bridge::{NullPlatform, Platform};
pub use input::InputIntent;
pub use time::FrameClock;
