//! World entities
//!
//! An entity is a transform, a velocity and a polygon model plus one of five
//! kind-specific bodies. The kind is fixed for the entity's lifetime. All
//! cross-entity effects (spawning, scoring, wave bookkeeping, restarts) go
//! through the [`SimContext`] passed into `update` and `on_collision`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::context::SimContext;
use super::event::GameEvent;
use super::model::Model;
use super::split::split_polygon;
use super::transform::Transform;
use crate::angle_from_direction;
use crate::consts::{WORLD_RATIO, WORLD_Y_MAX};
use crate::tuning::Tuning;

/// Unique per world, never reused
pub type EntityId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid,
    Ufo,
    Bullet,
    Explosion,
}

/// Repeating action gate
///
/// While the timer is positive it only counts down. Once it reaches zero the
/// next request fires the action and rearms the timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    timer: f32,
}

impl Cooldown {
    pub fn new(timer: f32) -> Self {
        Self { timer }
    }

    /// Returns true when the action fires this frame
    pub fn trigger(&mut self, wants: bool, dt: f32, period: f32) -> bool {
        if self.timer <= 0.0 {
            if wants {
                self.timer = period;
                return true;
            }
            false
        } else {
            self.timer -= dt;
            false
        }
    }

    pub fn remaining(&self) -> f32 {
        self.timer
    }
}

/// Kind-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Body {
    Ship {
        gun: Cooldown,
        teleport: Cooldown,
        /// Survival bonus timer
        survival: Cooldown,
        /// Flame drawn while thrusting; never collides
        engine: Model,
    },
    Asteroid,
    Ufo {
        gun: Cooldown,
    },
    Bullet {
        fired_by_player: bool,
        lifetime: f32,
    },
    Explosion {
        lifetime: f32,
    },
}

/// Snapshot of the other side of a collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub fired_by_player: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    pub vel: Vec2,
    transform: Transform,
    model: Model,
    pending_destruction: bool,
    body: Body,
}

impl Entity {
    /// Build an entity with fresh kind state
    ///
    /// The wrap margin is set from the model radius (UFOs get a little
    /// extra) and the model is placed at the transform. World-level side
    /// effects such as wave counters happen in [`SimContext::create`].
    pub fn new(
        id: EntityId,
        kind: EntityKind,
        mut transform: Transform,
        mut model: Model,
        tuning: &Tuning,
    ) -> Self {
        let margin = match kind {
            EntityKind::Ufo => model.radius() + tuning.ufo_margin,
            _ => model.radius(),
        };
        transform.set_margin(margin);
        model.apply_transform(&transform);

        let body = match kind {
            EntityKind::Ship => {
                let mut engine = Model::ship_engine();
                engine.set_draw(false);
                engine.apply_transform(&transform);
                Body::Ship {
                    gun: Cooldown::default(),
                    teleport: Cooldown::default(),
                    survival: Cooldown::new(tuning.points_time_interval),
                    engine,
                }
            }
            EntityKind::Asteroid => Body::Asteroid,
            EntityKind::Ufo => Body::Ufo {
                gun: Cooldown::new(tuning.ufo_cooldown),
            },
            EntityKind::Bullet => Body::Bullet {
                fired_by_player: false,
                lifetime: tuning.bullet_lifetime,
            },
            EntityKind::Explosion => Body::Explosion {
                lifetime: tuning.explosion_lifetime,
            },
        };

        Self {
            id,
            vel: Vec2::ZERO,
            transform,
            model,
            pending_destruction: false,
            body,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        match self.body {
            Body::Ship { .. } => EntityKind::Ship,
            Body::Asteroid => EntityKind::Asteroid,
            Body::Ufo { .. } => EntityKind::Ufo,
            Body::Bullet { .. } => EntityKind::Bullet,
            Body::Explosion { .. } => EntityKind::Explosion,
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transform.pos()
    }

    /// Teleport to `pos` (wrapped) and move the model with it
    pub fn set_position(&mut self, pos: Vec2) {
        self.transform.set_pos(pos);
        self.sync_model();
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.transform.set_angle(angle);
        self.sync_model();
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.model.radius()
    }

    /// Ship engine flame, if this is a ship
    pub fn engine(&self) -> Option<&Model> {
        match &self.body {
            Body::Ship { engine, .. } => Some(engine),
            _ => None,
        }
    }

    /// Show or hide the main model
    pub fn set_visible(&mut self, visible: bool) {
        self.model.set_draw(visible);
    }

    /// Bullets remember who fired them; everything else reports false
    pub fn fired_by_player(&self) -> bool {
        matches!(
            self.body,
            Body::Bullet {
                fired_by_player: true,
                ..
            }
        )
    }

    pub fn set_fired_by_player(&mut self, by_player: bool) {
        if let Body::Bullet {
            fired_by_player, ..
        } = &mut self.body
        {
            *fired_by_player = by_player;
        }
    }

    /// Split halves have fewer vertices than a freshly generated rock
    pub fn is_small_asteroid(&self, large_vert_count: usize) -> bool {
        self.kind() == EntityKind::Asteroid && self.model.vert_count() < large_vert_count
    }

    /// Flag for removal at the end of the frame; cannot be undone
    pub fn request_destruction(&mut self) {
        self.pending_destruction = true;
    }

    #[inline]
    pub fn is_destruction_requested(&self) -> bool {
        self.pending_destruction
    }

    pub fn contact(&self) -> Contact {
        Contact {
            id: self.id,
            kind: self.kind(),
            pos: self.position(),
            vel: self.vel,
            fired_by_player: self.fired_by_player(),
        }
    }

    /// Which kinds this entity reacts to
    pub fn collision_mask(&self, other: EntityKind) -> bool {
        use EntityKind::*;
        match self.kind() {
            Ship => matches!(other, Asteroid | Bullet | Ufo),
            Asteroid => matches!(other, Ship | Bullet),
            Ufo => matches!(other, Bullet | Ship),
            Bullet => matches!(other, Asteroid | Ufo | Ship),
            Explosion => false,
        }
    }

    fn sync_model(&mut self) {
        self.model.apply_transform(&self.transform);
    }

    /// Drift along the velocity, wrapping at the world edge
    fn advance(&mut self, dt: f32) {
        let pos = self.transform.pos() + self.vel * dt;
        self.set_position(pos);
    }

    // === Per-frame update ===

    pub fn update(&mut self, dt: f32, ctx: &mut SimContext) {
        match self.body {
            Body::Ship { .. } => self.update_ship(dt, ctx),
            Body::Asteroid => self.advance(dt),
            Body::Ufo { .. } => self.update_ufo(dt, ctx),
            Body::Bullet { .. } => self.update_bullet(dt),
            Body::Explosion { .. } => self.update_explosion(dt, &ctx.tuning),
        }
    }

    fn update_ship(&mut self, dt: f32, ctx: &mut SimContext) {
        let input = ctx.input;
        let tuning = ctx.tuning;

        let angle = self.transform.angle() + tuning.ship_rotation_speed * dt * input.hor_axis;
        self.transform.set_angle(angle);
        let acc = self.transform.direction() * input.forward * tuning.ship_throttle
            - self.vel * tuning.ship_friction;
        self.vel += acc * dt;
        self.advance(dt);
        ctx.set_player_pos(self.position());

        let Body::Ship {
            gun,
            teleport,
            survival,
            ..
        } = &mut self.body
        else {
            return;
        };
        let fire = gun.trigger(input.shooting, dt, tuning.ship_shooting_cooldown);
        let jump = teleport.trigger(input.teleport, dt, tuning.ship_teleport_cooldown);
        let survived = survival.trigger(true, dt, tuning.points_time_interval);

        if fire {
            let dir = self.transform.direction();
            let origin = self.position() + dir * self.radius() * 0.5;
            let speed = tuning.bullet_speed_basic + self.vel.length() * tuning.bullet_speed_inherited;
            let bullet = ctx.create(
                EntityKind::Bullet,
                Transform::new(origin, self.transform.angle()),
                None,
            );
            bullet.vel = dir * speed;
            bullet.set_fired_by_player(true);
        }

        if jump {
            let x = ctx.rng.random_range(-WORLD_RATIO..=WORLD_RATIO);
            let y = ctx.rng.random_range(-WORLD_Y_MAX..=WORLD_Y_MAX);
            self.set_position(Vec2::new(x, y));
            self.vel = Vec2::ZERO;
            ctx.set_player_pos(self.position());
            log::debug!("Ship {} teleported to ({x:.2}, {y:.2})", self.id);
        }

        if survived {
            ctx.add_points(tuning.points_for_time);
        }

        if let Body::Ship { engine, .. } = &mut self.body {
            engine.set_draw(input.forward > 0.0);
            engine.apply_transform(&self.transform);
        }
    }

    fn update_ufo(&mut self, dt: f32, ctx: &mut SimContext) {
        let tuning = ctx.tuning;
        self.advance(dt);

        // Past the edge: pick a new lane and head back in
        let x = self.position().x;
        if WORLD_RATIO + self.radius() - x.abs() < 0.0 {
            let y = ctx.rng.random_range(-tuning.ufo_zone..=tuning.ufo_zone);
            self.set_position(Vec2::new(x, y));
            self.vel = Vec2::new(-x.signum() * self.vel.x.abs(), 0.0);
        }

        let Body::Ufo { gun } = &mut self.body else {
            return;
        };
        if !gun.trigger(true, dt, tuning.ufo_cooldown) {
            return;
        }

        let miss = Vec2::new(
            ctx.rng.random_range(-tuning.ufo_accuracy..=tuning.ufo_accuracy),
            ctx.rng.random_range(-tuning.ufo_accuracy..=tuning.ufo_accuracy),
        );
        let dir = (ctx.player_pos() + miss - self.position()).normalize_or_zero();
        let origin = self.position() + dir * self.radius() * 0.5;
        let bullet = ctx.create(
            EntityKind::Bullet,
            Transform::new(origin, angle_from_direction(dir)),
            None,
        );
        bullet.vel = dir * tuning.bullet_speed_basic;
        bullet.set_fired_by_player(false);
    }

    fn update_bullet(&mut self, dt: f32) {
        self.advance(dt);
        if let Body::Bullet { lifetime, .. } = &mut self.body {
            *lifetime -= dt;
            if *lifetime <= 0.0 {
                self.pending_destruction = true;
            }
        }
    }

    fn update_explosion(&mut self, dt: f32, tuning: &Tuning) {
        let Body::Explosion { lifetime } = &mut self.body else {
            return;
        };
        *lifetime -= dt;
        let progress = (1.0 - *lifetime / tuning.explosion_lifetime).max(0.0);
        let scale = 1.0 + progress.sqrt() * tuning.explosion_max_scale;
        if *lifetime <= 0.0 {
            self.pending_destruction = true;
        }
        self.transform.set_scale(Vec2::splat(scale));
        self.sync_model();
    }

    // === Collision responses ===

    /// React to touching `other`
    ///
    /// Called once per side for every detected pair, after both sides have
    /// been snapshotted, so each handler sees the other as it was before
    /// the collision.
    pub fn on_collision(&mut self, other: &Contact, ctx: &mut SimContext) {
        match self.kind() {
            EntityKind::Ship => self.ship_hit(other, ctx),
            EntityKind::Asteroid => self.asteroid_hit(other, ctx),
            EntityKind::Ufo => self.ufo_hit(other, ctx),
            EntityKind::Bullet => self.bullet_hit(other),
            EntityKind::Explosion => {}
        }
    }

    fn ship_hit(&mut self, other: &Contact, ctx: &mut SimContext) {
        match other.kind {
            EntityKind::Bullet if other.fired_by_player => return,
            EntityKind::Asteroid | EntityKind::Bullet | EntityKind::Ufo => {}
            _ => return,
        }

        self.explode(ctx);
        ctx.push_event(GameEvent::ShipDestroyed {
            pos: self.position(),
        });
        log::info!("Ship destroyed by {:?} {}", other.kind, other.id);
        if ctx.tuning.vibrate_on_death {
            ctx.vibrate();
        }
        ctx.request_restart(ctx.tuning.restart_after_death_sec);
    }

    fn asteroid_hit(&mut self, other: &Contact, ctx: &mut SimContext) {
        let tuning = ctx.tuning;
        let small = self.is_small_asteroid(tuning.asteroid_vert_count);
        match other.kind {
            EntityKind::Bullet => {
                if other.fired_by_player {
                    let points = if small {
                        tuning.points_for_small
                    } else {
                        tuning.points_for_large
                    };
                    ctx.add_points(points);
                }
            }
            EntityKind::Ship => {}
            _ => return,
        }

        if small {
            self.explode(ctx);
            ctx.asteroid_destroyed();
        } else {
            self.split(other, ctx);
            self.explode(ctx);
        }
    }

    /// Replace this rock with two halves cut near the impact
    fn split(&self, other: &Contact, ctx: &mut SimContext) {
        let tuning = ctx.tuning;
        let split = split_polygon(
            self.model.verts(),
            self.model.transformed(),
            other.pos,
            tuning.asteroid_blast_impact,
        );
        let vel = self.vel + other.vel * tuning.asteroid_bullet_impact;
        let [first, second] = split.halves;

        ctx.create(
            EntityKind::Asteroid,
            self.transform.clone(),
            Some(Model::polygon(first)),
        )
        .vel = vel - split.impulse;
        ctx.create(
            EntityKind::Asteroid,
            self.transform.clone(),
            Some(Model::polygon(second)),
        )
        .vel = vel + split.impulse;

        ctx.push_event(GameEvent::AsteroidSplit { id: self.id });
    }

    fn ufo_hit(&mut self, other: &Contact, ctx: &mut SimContext) {
        match other.kind {
            EntityKind::Bullet if !other.fired_by_player => return,
            EntityKind::Bullet | EntityKind::Ship => {}
            _ => return,
        }

        self.explode(ctx);
        ctx.ufo_destroyed(self.id);
        ctx.add_points(ctx.tuning.points_for_ufo);
    }

    fn bullet_hit(&mut self, other: &Contact) {
        let by_player = self.fired_by_player();
        let consumed = match other.kind {
            EntityKind::Asteroid => true,
            EntityKind::Ufo => by_player,
            EntityKind::Ship => !by_player,
            _ => false,
        };
        if consumed {
            self.request_destruction();
        }
    }

    /// Leave an explosion behind and flag self for removal
    fn explode(&mut self, ctx: &mut SimContext) {
        ctx.create(
            EntityKind::Explosion,
            Transform::new(self.position(), self.transform.angle()),
            None,
        );
        self.request_destruction();
    }
}
