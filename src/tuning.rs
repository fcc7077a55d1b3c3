//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! tuning document only needs the keys it wants to override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Runtime-tunable gameplay configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Collision pipeline ===
    /// Sweep shapes over the frame instead of testing end-of-frame poses only
    pub continuous_collisions: bool,
    /// Run the polygon-edge narrow phase after the bounding-circle test
    pub refine_collisions: bool,

    // === Ship ===
    pub vibrate_on_death: bool,
    pub restart_after_death_sec: f32,
    pub ship_rotation_speed: f32,
    pub ship_throttle: f32,
    pub ship_friction: f32,
    pub ship_shooting_cooldown: f32,
    pub ship_teleport_cooldown: f32,

    // === Bullets ===
    pub bullet_speed_basic: f32,
    pub bullet_speed_inherited: f32,
    pub bullet_lifetime: f32,

    // === Asteroids ===
    pub asteroid_spawn_zone: f32,
    pub asteroid_speed: f32,
    pub asteroid_bullet_impact: f32,
    pub asteroid_blast_impact: f32,
    pub asteroid_vert_count: usize,

    // === Explosions ===
    pub explosion_max_scale: f32,
    pub explosion_lifetime: f32,

    // === UFO ===
    pub ufo_speed: f32,
    pub ufo_cooldown: f32,
    pub ufo_margin: f32,
    pub ufo_zone: f32,
    pub ufo_accuracy: f32,

    // === Waves (whole large asteroids) ===
    pub asteroid_target_count: u32,
    pub asteroid_ufo_count: u32,
    pub asteroid_respawn_count: u32,

    // === Scoring ===
    pub points_time_interval: f32,
    pub points_for_time: u32,
    pub points_for_ufo: u32,
    pub points_for_small: u32,
    pub points_for_large: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            continuous_collisions: CONTINUOUS_COLLISIONS,
            refine_collisions: REFINE_COLLISIONS,

            vibrate_on_death: VIBRATE_ON_DEATH,
            restart_after_death_sec: RESTART_AFTER_DEATH_SEC,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_throttle: SHIP_THROTTLE,
            ship_friction: SHIP_FRICTION,
            ship_shooting_cooldown: SHIP_SHOOTING_COOLDOWN,
            ship_teleport_cooldown: SHIP_TELEPORT_COOLDOWN,

            bullet_speed_basic: BULLET_SPEED_BASIC,
            bullet_speed_inherited: BULLET_SPEED_INHERITED,
            bullet_lifetime: BULLET_LIFETIME,

            asteroid_spawn_zone: ASTEROID_SPAWN_ZONE,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_bullet_impact: ASTEROID_BULLET_IMPACT,
            asteroid_blast_impact: ASTEROID_BLAST_IMPACT,
            asteroid_vert_count: ASTEROID_VERT_COUNT,

            explosion_max_scale: EXPLOSION_MAX_SCALE,
            explosion_lifetime: EXPLOSION_LIFETIME,

            ufo_speed: UFO_SPEED,
            ufo_cooldown: UFO_COOLDOWN,
            ufo_margin: UFO_MARGIN,
            ufo_zone: UFO_ZONE,
            ufo_accuracy: UFO_ACCURACY,

            asteroid_target_count: ASTEROID_TARGET_COUNT,
            asteroid_ufo_count: ASTEROID_UFO_COUNT,
            asteroid_respawn_count: ASTEROID_RESPAWN_COUNT,

            points_time_interval: POINTS_TIME_INTERVAL,
            points_for_time: POINTS_FOR_TIME,
            points_for_ufo: POINTS_FOR_UFO,
            points_for_small: POINTS_FOR_SMALL,
            points_for_large: POINTS_FOR_LARGE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults if it is missing or broken
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(TuningError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tuning at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("ship_shooting_cooldown", self.ship_shooting_cooldown),
            ("ship_teleport_cooldown", self.ship_teleport_cooldown),
            ("bullet_lifetime", self.bullet_lifetime),
            ("explosion_lifetime", self.explosion_lifetime),
            ("ufo_cooldown", self.ufo_cooldown),
            ("ufo_zone", self.ufo_zone),
            ("asteroid_spawn_zone", self.asteroid_spawn_zone),
            ("points_time_interval", self.points_time_interval),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    name,
                    value,
                    expected: "(0.0, inf)",
                });
            }
        }

        if self.asteroid_vert_count < 4 {
            return Err(TuningError::Invalid {
                name: "asteroid_vert_count",
                value: self.asteroid_vert_count as f32,
                expected: "[4, inf)",
            });
        }

        if self.asteroid_target_count == 0 {
            return Err(TuningError::Invalid {
                name: "asteroid_target_count",
                value: 0.0,
                expected: "[1, inf)",
            });
        }

        if self.asteroid_respawn_count >= self.asteroid_target_count {
            return Err(TuningError::Invalid {
                name: "asteroid_respawn_count",
                value: self.asteroid_respawn_count as f32,
                expected: "[0, asteroid_target_count)",
            });
        }

        Ok(())
    }
}
