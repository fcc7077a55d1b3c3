//! Surface-to-world scaling
//!
//! The world is `2 * WORLD_RATIO` wide and 2 tall. A surface wider than
//! that keeps the full height and pillarboxes the sides; a narrower one
//! keeps the full width and letterboxes top and bottom. HUD elements only
//! correct for the surface aspect.

use glam::Vec2;

use crate::consts::{INVERSE_WORLD_RATIO, WORLD_RATIO};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    world_scale: Vec2,
    hud_scale: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        let mut viewport = Self {
            width: 1,
            height: 1,
            world_scale: Vec2::ONE,
            hud_scale: Vec2::ONE,
        };
        viewport.resize(width, height);
        viewport
    }

    /// Recompute scale factors for a new surface size
    ///
    /// A zero-sized surface (minimized window) keeps the previous factors.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring zero-sized surface {width}x{height}");
            return;
        }
        self.width = width;
        self.height = height;

        let aspect = self.aspect();
        self.world_scale = if aspect < WORLD_RATIO {
            Vec2::new(INVERSE_WORLD_RATIO, INVERSE_WORLD_RATIO * aspect)
        } else {
            Vec2::new(1.0 / aspect, 1.0)
        };
        self.hud_scale = Vec2::new(1.0 / aspect, 1.0);
        log::debug!(
            "Viewport {width}x{height}: world scale {:?}, hud scale {:?}",
            self.world_scale,
            self.hud_scale
        );
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn world_scale(&self) -> Vec2 {
        self.world_scale
    }

    pub fn hud_scale(&self) -> Vec2 {
        self.hud_scale
    }

    /// Map a world-space point to clip space
    #[inline]
    pub fn world_to_clip(&self, p: Vec2) -> Vec2 {
        p * self.world_scale
    }
}
