//! Vertex types for line rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{Entity, EntityKind};

/// 2D line vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a vertex buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` inside a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();
}

/// Colors for game elements
pub mod colors {
    pub const SHIP: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
    pub const ENGINE: [f32; 4] = [1.0, 0.6, 0.2, 1.0];
    pub const ASTEROID: [f32; 4] = [0.75, 0.7, 0.65, 1.0];
    pub const UFO: [f32; 4] = [0.4, 1.0, 0.5, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ENEMY_BULLET: [f32; 4] = [1.0, 0.35, 0.35, 1.0];
    pub const EXPLOSION: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.02, 1.0];
}

/// Line color for an entity's main model
pub fn color_for(entity: &Entity) -> [f32; 4] {
    match entity.kind() {
        EntityKind::Ship => colors::SHIP,
        EntityKind::Asteroid => colors::ASTEROID,
        EntityKind::Ufo => colors::UFO,
        EntityKind::Bullet if entity.fired_by_player() => colors::PLAYER_BULLET,
        EntityKind::Bullet => colors::ENEMY_BULLET,
        EntityKind::Explosion => colors::EXPLOSION,
    }
}
