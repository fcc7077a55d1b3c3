//! Asteroids Sim - simulation core of a wrap-around arcade space shooter
//!
//! Core modules:
//! - `sim`: Entity model, collision engine and the frame orchestrator
//! - `platform`: Frame clock, input intent and host bridge seams
//! - `render`: Non-owning draw registry and viewport scaling
//! - `score`: Score bookkeeping and high-score hand-off
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod platform;
pub mod render;
pub mod score;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use score::Score;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Horizontal half-extent of the world (vertical half-extent is 1.0)
    pub const WORLD_RATIO: f32 = 16.0 / 9.0;
    pub const INVERSE_WORLD_RATIO: f32 = 9.0 / 16.0;
    /// Vertical half-extent of the world
    pub const WORLD_Y_MAX: f32 = 1.0;
    /// Wrap margin used before an entity knows its model radius
    pub const DEFAULT_MARGIN: f32 = 0.3;

    /// Collision pipeline switches
    pub const CONTINUOUS_COLLISIONS: bool = true;
    pub const REFINE_COLLISIONS: bool = true;

    /// Ship
    pub const VIBRATE_ON_DEATH: bool = true;
    pub const RESTART_AFTER_DEATH_SEC: f32 = 1.5;
    pub const SHIP_ROTATION_SPEED: f32 = 3.5;
    pub const SHIP_THROTTLE: f32 = 2.0;
    pub const SHIP_FRICTION: f32 = 1.0;
    pub const SHIP_SHOOTING_COOLDOWN: f32 = 0.3;
    pub const SHIP_TELEPORT_COOLDOWN: f32 = 0.5;

    /// Bullets
    pub const BULLET_SPEED_BASIC: f32 = 2.0;
    /// Fraction of the shooter's speed added to a fired bullet
    pub const BULLET_SPEED_INHERITED: f32 = 0.5;
    pub const BULLET_LIFETIME: f32 = 1.2;

    /// Asteroids
    pub const ASTEROID_SPAWN_ZONE: f32 = 0.7;
    pub const ASTEROID_SPEED: f32 = 0.45;
    /// Fraction of the hitting object's velocity passed to split halves
    pub const ASTEROID_BULLET_IMPACT: f32 = 0.25;
    /// Separation speed of split halves along the cut normal
    pub const ASTEROID_BLAST_IMPACT: f32 = 0.4;
    pub const ASTEROID_ANGLE_VARIANCE: f32 = PI / 18.0;
    pub const ASTEROID_BIG_RADIUS: f32 = 0.2;
    pub const ASTEROID_SMALL_RADIUS: f32 = 0.1;
    /// Probability that a generated vertex sits on the big radius
    pub const ASTEROID_RADIUS_DISTRIBUTION: f64 = 0.65;
    /// Vertex count of a large asteroid; anything below is a split half
    pub const ASTEROID_VERT_COUNT: usize = 12;

    /// Explosions
    pub const EXPLOSION_VERT_COUNT: usize = 12;
    pub const EXPLOSION_MAX_SCALE: f32 = 4.0;
    pub const EXPLOSION_LIFETIME: f32 = 0.6;
    pub const EXPLOSION_SPIKE_LEN: f32 = 0.015;

    /// UFO
    pub const UFO_SPEED: f32 = 0.4;
    pub const UFO_COOLDOWN: f32 = 2.5;
    /// Extra distance a UFO may travel past the edge before turning around
    pub const UFO_MARGIN: f32 = 0.1;
    /// Vertical band the UFO flies in
    pub const UFO_ZONE: f32 = 0.7;
    /// Maximum aim error on each axis
    pub const UFO_ACCURACY: f32 = 0.13;

    /// Wave bookkeeping (counted in whole large asteroids)
    pub const ASTEROID_TARGET_COUNT: u32 = 5;
    pub const ASTEROID_UFO_COUNT: u32 = 2;
    pub const ASTEROID_RESPAWN_COUNT: u32 = 1;

    /// Scoring
    pub const POINTS_TIME_INTERVAL: f32 = 5.0;
    pub const POINTS_FOR_TIME: u32 = 5;
    pub const POINTS_FOR_UFO: u32 = 40;
    pub const POINTS_FOR_SMALL: u32 = 20;
    pub const POINTS_FOR_LARGE: u32 = 10;

    /// Spawn offsets just outside the visible edge
    pub const ASTEROID_SPAWN_OFFSET: f32 = 0.2;
    pub const ASTEROID_SPAWN_Y: f32 = 1.2;
    pub const UFO_SPAWN_OFFSET: f32 = 0.12;

    /// Undrained game events kept before the oldest are discarded
    pub const MAX_PENDING_EVENTS: usize = 4096;

    /// Largest frame delta the clock will report (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    pub const BIG_NUMBER: f32 = 10000.0;
    pub const SMALL_NUMBER: f32 = 0.0001;
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(l: Vec2, r: Vec2) -> f32 {
    l.x * r.y - l.y * r.x
}

/// Wrap a coordinate into `[-half, half)`, congruent modulo `2 * half`
#[inline]
pub fn wrap_coord(value: f32, half: f32) -> f32 {
    if value >= -half && value < half {
        return value;
    }
    let extent = 2.0 * half;
    let wrapped = (value + half).rem_euclid(extent) - half;
    // rem_euclid may round up to `extent`
    if wrapped >= half { -half } else { wrapped }
}

/// Unit direction an angle faces (angle 0 faces +y)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(-angle.sin(), angle.cos())
}

/// Inverse of [`direction_from_angle`]
#[inline]
pub fn angle_from_direction(dir: Vec2) -> f32 {
    (-dir.x).atan2(dir.y)
}
