//! Position, rotation and scale in the wrap-around world
//!
//! The world spans `[-WORLD_RATIO, WORLD_RATIO)` horizontally and
//! `[-1, 1)` vertically. Each transform carries a margin (usually the
//! radius of its model) that lets its owner slide fully off-screen before
//! re-entering on the opposite side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MARGIN, WORLD_RATIO, WORLD_Y_MAX};
use crate::wrap_coord;

/// Placement of an entity in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transform {
    pos: Vec2,
    angle: f32,
    sin: f32,
    cos: f32,
    scale: Vec2,
    margin: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }
}

impl Transform {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        let mut t = Self {
            pos: Vec2::ZERO,
            angle: 0.0,
            sin: 0.0,
            cos: 1.0,
            scale: Vec2::ONE,
            margin: DEFAULT_MARGIN,
        };
        t.set_angle(angle);
        t.set_pos(pos);
        t
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), 0.0)
    }

    /// Set the position, immediately wrapping it into the world
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.wrap();
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Set the rotation and refresh the cached sine/cosine
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        let (sin, cos) = angle.sin_cos();
        self.sin = sin;
        self.cos = cos;
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn sin(&self) -> f32 {
        self.sin
    }

    #[inline]
    pub fn cos(&self) -> f32 {
        self.cos
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Unit vector the transform faces, derived from the angle alone
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::new(-self.sin, self.cos)
    }

    /// Change how far past the world edge the owner may travel; re-wraps
    pub fn set_margin(&mut self, margin: f32) {
        self.margin = margin;
        self.wrap();
    }

    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Horizontal half-extent including margin
    #[inline]
    pub fn half_width(&self) -> f32 {
        WORLD_RATIO + self.margin
    }

    /// Vertical half-extent including margin
    #[inline]
    pub fn half_height(&self) -> f32 {
        WORLD_Y_MAX + self.margin
    }

    fn wrap(&mut self) {
        self.pos.x = wrap_coord(self.pos.x, self.half_width());
        self.pos.y = wrap_coord(self.pos.y, self.half_height());
    }

    /// Map a local-space point into world space (scale, rotate, translate)
    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let a = self.cos * self.scale.x;
        let b = self.sin * self.scale.x;
        let c = self.sin * self.scale.y;
        let d = self.cos * self.scale.y;
        Vec2::new(
            local.x * a - local.y * b + self.pos.x,
            local.x * c + local.y * d + self.pos.y,
        )
    }
}
