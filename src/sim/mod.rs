//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, so a seed and an input script replay exactly
//! - Stable iteration order (entity list order, spawn order for newcomers)
//! - No rendering or host dependencies beyond the [`Platform`](crate::platform::Platform) seam

pub mod collision;
pub mod context;
pub mod entity;
pub mod event;
pub mod model;
pub mod segment;
pub mod split;
pub mod transform;
pub mod world;

pub use context::SimContext;
pub use entity::{Body, Contact, Cooldown, Entity, EntityId, EntityKind};
pub use event::GameEvent;
pub use model::{Model, line_loop_indices};
pub use segment::{Segment, moving_segments_intersect, segments_intersect};
pub use split::{Split, split_polygon};
pub use transform::Transform;
pub use world::World;
