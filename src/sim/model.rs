//! Polygon shapes shared by collision and drawing
//!
//! A model is a list of local-space vertices plus a list of index pairs,
//! each pair being one edge. The same edges are drawn as lines and tested
//! in the narrow phase. The bounding radius (distance from the local origin
//! to the farthest vertex) drives the broad phase and the wrap margin.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::segment::Segment;
use super::transform::Transform;
use crate::consts::*;

/// Visual and collision shape of an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    verts: Vec<Vec2>,
    /// World-space copy of `verts`, refreshed by [`Model::apply_transform`]
    transformed: Vec<Vec2>,
    /// Edge list: `indices[2k]..indices[2k + 1]` is edge `k`
    indices: Vec<u16>,
    radius: f32,
    draw: bool,
}

impl Model {
    /// Build a model from vertices and an explicit edge list
    ///
    /// Panics if there are no vertices, the edge list has an odd length, or
    /// an index points past the vertex list.
    pub fn new(verts: Vec<Vec2>, indices: Vec<u16>) -> Self {
        assert!(!verts.is_empty(), "model needs at least one vertex");
        assert!(indices.len() % 2 == 0, "edge list must hold index pairs");
        assert!(
            indices.iter().all(|&i| (i as usize) < verts.len()),
            "edge index out of range"
        );

        let radius = verts
            .iter()
            .map(|v| v.length_squared())
            .fold(0.0_f32, f32::max)
            .sqrt();

        Self {
            transformed: verts.clone(),
            verts,
            indices,
            radius,
            draw: true,
        }
    }

    /// Closed polygon through the vertices in order
    pub fn polygon(verts: Vec<Vec2>) -> Self {
        let indices = line_loop_indices(verts.len());
        Self::new(verts, indices)
    }

    /// Recompute world-space vertices for a new transform
    pub fn apply_transform(&mut self, t: &Transform) {
        for (out, local) in self.transformed.iter_mut().zip(&self.verts) {
            *out = t.apply(*local);
        }
    }

    pub fn verts(&self) -> &[Vec2] {
        &self.verts
    }

    pub fn transformed(&self) -> &[Vec2] {
        &self.transformed
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn vert_count(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_draw(&mut self, draw: bool) {
        self.draw = draw;
    }

    pub fn draw(&self) -> bool {
        self.draw
    }

    /// World-space edges, one per index pair
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.indices.chunks_exact(2).map(|pair| {
            Segment::between(
                self.transformed[pair[0] as usize],
                self.transformed[pair[1] as usize],
            )
        })
    }

    // === Default shapes ===

    pub fn ship() -> Self {
        Self::polygon(vec![
            Vec2::new(0.0, 0.065),
            Vec2::new(0.05, -0.065),
            Vec2::new(0.017, -0.03),
            Vec2::new(-0.017, -0.03),
            Vec2::new(-0.05, -0.065),
        ])
    }

    /// Engine flame drawn behind the ship while thrusting
    pub fn ship_engine() -> Self {
        Self::new(
            vec![
                Vec2::new(0.0, -0.05),
                Vec2::new(0.017, -0.03),
                Vec2::new(-0.017, -0.03),
            ],
            vec![0, 1, 0, 2],
        )
    }

    /// Jagged rock: vertices walk around a circle with angular jitter,
    /// each landing on either the big or the small radius
    pub fn asteroid(rng: &mut impl Rng, vert_count: usize) -> Self {
        let verts = (0..vert_count)
            .map(|i| {
                let angle = TAU * i as f32 / vert_count as f32
                    + rng.random_range(-ASTEROID_ANGLE_VARIANCE..=ASTEROID_ANGLE_VARIANCE);
                let radius = if rng.random_bool(ASTEROID_RADIUS_DISTRIBUTION) {
                    ASTEROID_BIG_RADIUS
                } else {
                    ASTEROID_SMALL_RADIUS
                };
                Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        Self::polygon(verts)
    }

    pub fn bullet() -> Self {
        Self::new(vec![Vec2::new(0.0, -0.02), Vec2::new(0.0, 0.02)], vec![0, 1])
    }

    pub fn ufo() -> Self {
        Self::new(
            vec![
                Vec2::new(-0.125, 0.0),
                Vec2::new(-0.05, 0.05),
                Vec2::new(-0.025, 0.1),
                Vec2::new(0.025, 0.1),
                Vec2::new(0.05, 0.05),
                Vec2::new(0.125, 0.0),
                Vec2::new(0.05, -0.05),
                Vec2::new(-0.05, -0.05),
            ],
            vec![0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 0, 0, 5, 1, 4],
        )
    }

    /// Starburst of short spikes at jittered angles
    pub fn explosion(rng: &mut impl Rng) -> Self {
        let mut verts = Vec::with_capacity(EXPLOSION_VERT_COUNT * 2);
        for i in 0..EXPLOSION_VERT_COUNT {
            let angle = TAU * i as f32 / EXPLOSION_VERT_COUNT as f32
                + rng.random_range(-ASTEROID_ANGLE_VARIANCE..=ASTEROID_ANGLE_VARIANCE);
            let dist = rng.random_range(EXPLOSION_SPIKE_LEN / 3.0..=EXPLOSION_SPIKE_LEN);
            let dir = Vec2::new(angle.cos(), angle.sin());
            verts.push(dir * dist);
            verts.push(dir * (dist + EXPLOSION_SPIKE_LEN));
        }
        Self::polygon(verts)
    }
}

/// Edge list closing a polygon: `[0,1, 1,2, ..., n-1,0]`
pub fn line_loop_indices(n: usize) -> Vec<u16> {
    (0..n)
        .flat_map(|k| [k as u16, ((k + 1) % n) as u16])
        .collect()
}
