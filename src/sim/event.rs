//! Things that happened during a frame
//!
//! The simulation appends events as it goes; the frame owner drains them
//! once per frame (see [`World::drain_events`](super::World::drain_events))
//! and forwards them to the draw registry, audio, or logs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new entity joined the world
    EntitySpawned { id: EntityId, kind: EntityKind },
    /// An entity left the world (destruction sweep or restart)
    EntityDestroyed { id: EntityId, kind: EntityKind },
    /// A large asteroid was cut into two halves
    AsteroidSplit { id: EntityId },
    ShipDestroyed { pos: Vec2 },
    UfoSpawned { id: EntityId },
    UfoDestroyed { id: EntityId },
    /// Fresh asteroids entered from the edge
    WaveSpawned { count: u32 },
    PointsAwarded { points: u32, total: u32 },
    /// A restart countdown started
    RestartScheduled { delay: f32 },
    Restarted,
    Paused,
    Resumed,
}
