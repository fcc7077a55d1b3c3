//! Collision detection between entities
//!
//! Every frame each unordered pair of live entities goes through three
//! filters, cheapest first:
//! 1. Interest: at least one side's mask wants the other's kind and
//!    neither side is already flagged for destruction.
//! 2. Broad phase: bounding circles overlap. In continuous mode the
//!    circles are inflated by the distance both entities covered this frame.
//! 3. Narrow phase: some edge of A crosses some edge of B, either at the
//!    end of the frame or (continuous mode) at any time during it.

use super::entity::Entity;
use crate::tuning::Tuning;

/// Whether the pair should be tested at all
pub fn wants_collision(a: &Entity, b: &Entity) -> bool {
    !(a.is_destruction_requested() || b.is_destruction_requested())
        && (a.collision_mask(b.kind()) || b.collision_mask(a.kind()))
}

/// Bounding-circle test
pub fn broad_phase(a: &Entity, b: &Entity, dt: f32, continuous: bool) -> bool {
    let dist = (a.position() - b.position()).length();
    let mut reach = a.radius() + b.radius();
    if continuous {
        reach += (a.vel.length() + b.vel.length()) * dt;
    }
    dist < reach
}

/// Edge-against-edge test on the transformed polygons
///
/// Both shapes already sit at their end-of-frame pose, so the swept test
/// runs them backwards at their negated velocities.
pub fn narrow_phase(a: &Entity, b: &Entity, dt: f32, continuous: bool) -> bool {
    let back_a = -a.vel;
    let back_b = -b.vel;

    a.model().edges().any(|edge_a| {
        b.model().edges().any(|edge_b| {
            if continuous {
                edge_a.intersects_moving(back_a, &edge_b, back_b, dt)
            } else {
                edge_a.intersects(&edge_b)
            }
        })
    })
}

/// Full pipeline for one pair (interest filter excluded)
pub fn detect(a: &Entity, b: &Entity, dt: f32, tuning: &Tuning) -> bool {
    if !broad_phase(a, b, dt, tuning.continuous_collisions) {
        return false;
    }
    if !tuning.refine_collisions {
        return true;
    }
    narrow_phase(a, b, dt, tuning.continuous_collisions)
}
