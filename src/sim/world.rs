//! Frame orchestrator
//!
//! One call to [`World::step`] runs a full frame:
//! 1. Restart countdown (runs even while paused)
//! 2. Entity updates, in list order; entities spawned during the pass are
//!    updated in the same frame
//! 3. Collision pass over every unordered pair
//! 4. Destruction sweep
//!
//! [`World::update`] and [`World::run_frame`] add the hand-off: the frame's
//! events go to the draw batch, which is then rebuilt.
//!
//! Nothing is removed from the entity list until step 4, so every entity a
//! collision flags stays readable for the rest of the frame.

use glam::Vec2;

use super::collision;
use super::context::SimContext;
use super::entity::{Entity, EntityId, EntityKind};
use super::event::GameEvent;
use super::model::Model;
use super::transform::Transform;
use crate::platform::{FrameClock, InputIntent, NullPlatform, Platform};
use crate::render::{DrawBatch, Viewport};
use crate::score::Score;
use crate::tuning::Tuning;

pub struct World {
    entities: Vec<Entity>,
    ctx: SimContext,
    running: bool,
    clock: FrameClock,
    viewport: Viewport,
    frame: u64,
}

impl World {
    /// New world with a restart already due, so the first frame sets up
    /// the ship and the opening wave
    pub fn new(seed: u64, tuning: Tuning, platform: Box<dyn Platform>) -> Self {
        log::info!("Creating world (seed {seed})");
        let mut world = Self {
            entities: Vec::new(),
            ctx: SimContext::new(seed, tuning, platform),
            running: true,
            clock: FrameClock::new(),
            viewport: Viewport::default(),
            frame: 0,
        };
        world.request_restart(0.0);
        world
    }

    /// Default tuning, no host attached
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default(), Box::new(NullPlatform))
    }

    // === Frame ===

    /// Run one frame timed by the wall clock and hand it to `batch`
    pub fn update(&mut self, batch: &mut DrawBatch) -> Vec<GameEvent> {
        let dt = self.clock.tick();
        self.run_frame(dt, batch)
    }

    /// Step `dt`, forward the frame's events to `batch` and rebuild it
    ///
    /// Returns the events so the host can react to them as well.
    pub fn run_frame(&mut self, dt: f32, batch: &mut DrawBatch) -> Vec<GameEvent> {
        self.step(dt);
        let events = self.drain_events();
        batch.apply_events(&events);
        batch.assemble(self);
        events
    }

    /// Run one frame of `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.ctx.restart_due(dt, self.running) {
            self.restart();
        }

        if self.running {
            self.update_entities(dt);
            self.detect_collisions(dt);
            self.sweep_destroyed();
        }
        self.frame += 1;
    }

    fn update_entities(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.entities.len() {
            self.entities[i].update(dt, &mut self.ctx);
            self.ctx.merge_spawned(&mut self.entities);
            i += 1;
        }
    }

    fn detect_collisions(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.entities.len() {
            let mut j = i + 1;
            while j < self.entities.len() {
                let (head, tail) = self.entities.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];

                if collision::wants_collision(a, b) && collision::detect(a, b, dt, &self.ctx.tuning)
                {
                    log::trace!(
                        "Collision {:?} {} <-> {:?} {}",
                        a.kind(),
                        a.id(),
                        b.kind(),
                        b.id()
                    );
                    let (contact_a, contact_b) = (a.contact(), b.contact());
                    a.on_collision(&contact_b, &mut self.ctx);
                    b.on_collision(&contact_a, &mut self.ctx);
                    self.ctx.merge_spawned(&mut self.entities);
                }
                j += 1;
            }
            i += 1;
        }
    }

    fn sweep_destroyed(&mut self) {
        let ctx = &mut self.ctx;
        self.entities.retain(|e| {
            if e.is_destruction_requested() {
                ctx.push_event(GameEvent::EntityDestroyed {
                    id: e.id(),
                    kind: e.kind(),
                });
                false
            } else {
                true
            }
        });
    }

    /// Clear the world and start a new run
    fn restart(&mut self) {
        for e in self.entities.drain(..) {
            self.ctx.push_event(GameEvent::EntityDestroyed {
                id: e.id(),
                kind: e.kind(),
            });
        }
        self.ctx.reset_logic();
        self.ctx.create(EntityKind::Ship, Transform::default(), None);
        let opening = self.ctx.tuning.asteroid_target_count;
        self.ctx.spawn_asteroids(opening);
        self.ctx.merge_spawned(&mut self.entities);
        self.ctx.push_event(GameEvent::Restarted);
        log::info!("Level restarted (high score {})", self.ctx.score().high());
    }

    // === Lifecycle ===

    /// Freeze entities; the restart countdown keeps running
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            self.ctx.push_event(GameEvent::Paused);
            log::debug!("Paused");
        }
    }

    /// Unfreeze and drop the wall-clock time spent paused
    pub fn resume(&mut self) {
        if !self.running {
            self.running = true;
            self.clock.reset();
            self.ctx.push_event(GameEvent::Resumed);
            log::debug!("Resumed");
        }
    }

    /// Restart the level after `delay` seconds of running time
    pub fn request_restart(&mut self, delay: f32) {
        self.ctx.request_restart(delay);
    }

    pub fn on_resolution_change(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }

    /// Graphics context (re)created: recompute scale factors
    pub fn on_graphics_context_created(&mut self) {
        let (width, height) = self.viewport.size();
        self.viewport.resize(width, height);
        log::info!("Graphics context ready ({width}x{height})");
    }

    // === Host-facing access ===

    pub fn set_input(&mut self, input: InputIntent) {
        self.ctx.input = input;
    }

    pub fn input(&self) -> InputIntent {
        self.ctx.input
    }

    /// Add an entity right away
    pub fn create(
        &mut self,
        kind: EntityKind,
        transform: Transform,
        model: Option<Model>,
    ) -> &mut Entity {
        self.ctx.create(kind, transform, model);
        self.ctx.merge_spawned(&mut self.entities);
        let last = self.entities.len() - 1;
        &mut self.entities[last]
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.ctx.drain_events()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn ship(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind() == EntityKind::Ship)
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn score(&self) -> &Score {
        self.ctx.score()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.ctx.tuning
    }

    pub fn player_pos(&self) -> Vec2 {
        self.ctx.player_pos()
    }

    /// Live rock mass in half-asteroid units
    pub fn asteroid_count(&self) -> i32 {
        self.ctx.asteroid_count()
    }

    pub fn ufo_present(&self) -> bool {
        self.ctx.ufo_present()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn restart_pending(&self) -> bool {
        self.ctx.restart_timer().is_some()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WORLD_RATIO, WORLD_Y_MAX};
    use crate::platform::bridge::testing::RecordingPlatform;
    use crate::sim::entity::Body;

    const DT: f32 = 1.0 / 60.0;

    /// A started world holding nothing but the ship at the origin
    fn bare_world(tuning: Tuning) -> World {
        let mut world = World::new(42, tuning, Box::new(NullPlatform));
        world.step(0.0);
        world.entities.retain(|e| e.kind() == EntityKind::Ship);
        world.ctx.set_asteroid_count(0);
        world.drain_events();
        world
    }

    fn empty_world() -> World {
        bare_world(Tuning::default())
    }

    fn park_ship(world: &mut World, x: f32, y: f32) {
        let id = world.ship().unwrap().id();
        world.entity_mut(id).unwrap().set_position(Vec2::new(x, y));
    }

    /// Large rock standing still
    fn rock_at(world: &mut World, x: f32, y: f32) -> EntityId {
        let rock = world.create(EntityKind::Asteroid, Transform::at(x, y), None);
        rock.vel = Vec2::ZERO;
        rock.id()
    }

    /// Split half: a square that counts as small
    fn small_rock_at(world: &mut World, x: f32, y: f32) -> EntityId {
        let square = Model::polygon(vec![
            Vec2::new(-0.1, -0.1),
            Vec2::new(0.1, -0.1),
            Vec2::new(0.1, 0.1),
            Vec2::new(-0.1, 0.1),
        ]);
        world
            .create(EntityKind::Asteroid, Transform::at(x, y), Some(square))
            .id()
    }

    fn bullet_at(world: &mut World, x: f32, y: f32, vel: Vec2, by_player: bool) -> EntityId {
        let bullet = world.create(EntityKind::Bullet, Transform::at(x, y), None);
        bullet.vel = vel;
        bullet.set_fired_by_player(by_player);
        bullet.id()
    }

    #[test]
    fn test_first_frame_sets_up_level() {
        let mut world = World::with_seed(1);
        assert!(world.entities().is_empty());
        world.step(DT);

        assert_eq!(world.count_of(EntityKind::Ship), 1);
        assert_eq!(world.count_of(EntityKind::Asteroid), 5);
        assert_eq!(world.asteroid_count(), 10);
        assert!(!world.restart_pending());
        assert!(world.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_same_seed_same_world() {
        let mut a = World::with_seed(9);
        let mut b = World::with_seed(9);
        let input = InputIntent::default().thrust(true).turn(0.5).fire(true);
        a.set_input(input);
        b.set_input(input);
        for _ in 0..120 {
            a.step(DT);
            b.step(DT);
        }
        assert_eq!(a.entities().len(), b.entities().len());
        for (ea, eb) in a.entities().iter().zip(b.entities()) {
            assert_eq!(ea.id(), eb.id());
            assert_eq!(ea.position(), eb.position());
        }
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn test_ship_thrust_follows_engine_model() {
        let mut world = empty_world();
        world.set_input(InputIntent::default().thrust(true));
        world.step(0.1);

        let ship = world.ship().unwrap();
        // v' = v + (dir * throttle - v * friction) * dt with v = 0, dir = +y
        let expected = Vec2::new(0.0, world.tuning().ship_throttle * 0.1);
        assert!((ship.vel - expected).length() < 1e-6);
        assert!((ship.position() - expected * 0.1).length() < 1e-6);
        assert!(ship.engine().unwrap().draw());
    }

    #[test]
    fn test_ship_turns_and_coasts_with_friction() {
        let mut world = empty_world();
        world.set_input(InputIntent::default().turn(1.0));
        world.step(0.1);
        let ship = world.ship().unwrap();
        let rot = world.tuning().ship_rotation_speed * 0.1;
        assert!((ship.transform().angle() - rot).abs() < 1e-6);

        let id = ship.id();
        world.set_input(InputIntent::default());
        world.entity_mut(id).unwrap().vel = Vec2::new(1.0, 0.0);
        world.step(0.1);
        let ship = world.entity(id).unwrap();
        let friction = world.tuning().ship_friction;
        assert!((ship.vel.x - (1.0 - friction * 0.1)).abs() < 1e-6);
        assert!(!ship.engine().unwrap().draw());
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut world = empty_world();
        world.set_input(InputIntent::default().fire(true));

        world.step(DT);
        assert_eq!(world.count_of(EntityKind::Bullet), 1);
        let ship = world.ship().unwrap();
        let bullet = world
            .entities()
            .iter()
            .find(|e| e.kind() == EntityKind::Bullet)
            .unwrap();
        assert!(bullet.fired_by_player());
        assert!((bullet.vel.y - world.tuning().bullet_speed_basic).abs() < 1e-5);
        match ship.body() {
            Body::Ship { gun, .. } => {
                assert_eq!(gun.remaining(), world.tuning().ship_shooting_cooldown)
            }
            _ => unreachable!(),
        }

        // Still cooling down
        world.step(DT);
        world.step(DT);
        assert_eq!(world.count_of(EntityKind::Bullet), 1);

        for _ in 0..30 {
            world.step(DT);
        }
        assert_eq!(world.count_of(EntityKind::Bullet), 2);
    }

    #[test]
    fn test_bullet_expires() {
        let mut world = empty_world();
        let id = bullet_at(&mut world, 0.0, 0.9, Vec2::ZERO, false);
        // Lifetime is 1.2s
        for _ in 0..4 {
            world.step(0.25);
        }
        assert!(world.entity(id).is_some());
        world.step(0.25);
        assert!(world.entity(id).is_none());
    }

    #[test]
    fn test_large_split_yields_two_small_halves() {
        let mut world = empty_world();
        park_ship(&mut world, -1.5, -0.8);
        let rock = rock_at(&mut world, 0.5, 0.0);
        let before = world.asteroid_count();
        assert_eq!(before, 2);

        // Fast enough to pass through the rock's top edge within one frame
        bullet_at(&mut world, 0.5, 0.0, Vec2::new(0.0, 30.0), true);
        world.step(DT);

        assert!(world.entity(rock).is_none());
        let halves: Vec<_> = world
            .entities()
            .iter()
            .filter(|e| e.kind() == EntityKind::Asteroid)
            .collect();
        assert_eq!(halves.len(), 2);
        let verts: usize = halves.iter().map(|e| e.model().vert_count()).sum();
        assert_eq!(verts, world.tuning().asteroid_vert_count + 2);
        for half in &halves {
            assert!(half.is_small_asteroid(world.tuning().asteroid_vert_count));
        }
        // Halves inherit a share of the bullet's momentum
        let mean = (halves[0].vel + halves[1].vel) * 0.5;
        assert!((mean - Vec2::new(0.0, 7.5)).length() < 1e-4);

        // Splitting leaves the counter alone
        assert_eq!(world.asteroid_count(), before);
        assert_eq!(world.score().current(), world.tuning().points_for_large);
        assert_eq!(world.count_of(EntityKind::Explosion), 1);
        assert_eq!(world.count_of(EntityKind::Bullet), 0);
        assert!(world
            .drain_events()
            .contains(&GameEvent::AsteroidSplit { id: rock }));
    }

    #[test]
    fn test_small_asteroid_shatters_and_counts_down() {
        let mut world = empty_world();
        let rock = small_rock_at(&mut world, 0.5, 0.5);
        world.ctx.set_asteroid_count(8);

        // Straddles the square's top edge
        bullet_at(&mut world, 0.5, 0.6, Vec2::ZERO, true);
        world.step(DT);

        assert!(world.entity(rock).is_none());
        assert_eq!(world.count_of(EntityKind::Asteroid), 0);
        assert_eq!(world.asteroid_count(), 7);
        assert_eq!(world.score().current(), world.tuning().points_for_small);
    }

    #[test]
    fn test_last_rocks_bring_next_wave() {
        let mut world = empty_world();
        small_rock_at(&mut world, 0.5, 0.5);
        world.ctx.set_asteroid_count(3);

        bullet_at(&mut world, 0.5, 0.6, Vec2::ZERO, true);
        world.step(DT);

        let tuning = *world.tuning();
        let refill = tuning.asteroid_target_count - tuning.asteroid_respawn_count;
        assert_eq!(world.count_of(EntityKind::Asteroid), refill as usize);
        assert_eq!(world.asteroid_count(), 2 + 2 * refill as i32);
        assert!(world
            .drain_events()
            .contains(&GameEvent::WaveSpawned { count: refill }));
    }

    #[test]
    fn test_ufo_bullet_breaks_rocks_without_points() {
        let mut world = empty_world();
        park_ship(&mut world, -1.5, -0.8);
        let rock = rock_at(&mut world, 0.5, 0.0);
        bullet_at(&mut world, 0.5, 0.0, Vec2::new(0.0, 30.0), false);
        world.step(DT);

        assert!(world.entity(rock).is_none());
        assert_eq!(world.score().current(), 0);
    }

    #[test]
    fn test_player_bullet_passes_own_ship() {
        let mut world = empty_world();
        let id = bullet_at(&mut world, 0.0, -0.03, Vec2::ZERO, true);
        world.step(DT);
        assert!(world.entity(id).is_some());
        assert_eq!(world.count_of(EntityKind::Ship), 1);
        assert!(!world.restart_pending());
    }

    #[test]
    fn test_ship_death_schedules_restart() {
        let platform = RecordingPlatform::default();
        let calls = platform.calls.clone();
        let mut world = World::new(5, Tuning::default(), Box::new(platform));
        world.step(0.0);
        let ship = world.ship().unwrap().id();
        world.entities.retain(|e| e.kind() == EntityKind::Ship);

        // Enemy bullet across the ship's tail edge
        let bullet = bullet_at(&mut world, 0.0, -0.03, Vec2::ZERO, false);
        world.step(DT);

        assert!(world.entity(ship).is_none());
        assert!(world.entity(bullet).is_none());
        assert!(world.restart_pending());
        assert_eq!(calls.borrow().vibrations, 1);
        assert!(world
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::ShipDestroyed { .. })));

        // 1.5s delay, plus slack for float accumulation
        for _ in 0..17 {
            world.step(0.1);
        }
        assert_eq!(world.count_of(EntityKind::Ship), 1);
        assert!(!world.restart_pending());
        assert_eq!(world.score().current(), 0);
    }

    #[test]
    fn test_destruction_is_batched_to_frame_end() {
        let mut world = empty_world();
        let rock = small_rock_at(&mut world, 0.5, 0.5);
        world.ctx.set_asteroid_count(8);

        // Both bullets straddle the same edge; the first hit flags the rock,
        // so the second finds nothing left to hit
        bullet_at(&mut world, 0.5, 0.6, Vec2::ZERO, true);
        bullet_at(&mut world, 0.5, 0.6, Vec2::ZERO, true);
        world.step(DT);

        assert!(world.entity(rock).is_none());
        assert_eq!(world.count_of(EntityKind::Bullet), 1);
        assert_eq!(world.score().current(), world.tuning().points_for_small);
        assert_eq!(world.asteroid_count(), 7);
    }

    #[test]
    fn test_ufo_spawns_once_from_shattered_rock() {
        let mut world = empty_world();
        park_ship(&mut world, 1.0, 0.0);
        small_rock_at(&mut world, -0.5, 0.5);
        world.ctx.set_asteroid_count(5);

        bullet_at(&mut world, -0.5, 0.6, Vec2::ZERO, true);
        world.step(DT);

        assert_eq!(world.count_of(EntityKind::Ufo), 1);
        assert!(world.ufo_present());
        let ufo = world
            .entities()
            .iter()
            .find(|e| e.kind() == EntityKind::Ufo)
            .unwrap();
        // Player sits right, so the UFO comes in from the left
        assert!(ufo.position().x < 0.0);

        // Crossing the threshold again with the UFO alive adds nothing
        small_rock_at(&mut world, -0.5, -0.5);
        world.ctx.set_asteroid_count(5);
        bullet_at(&mut world, -0.5, -0.4, Vec2::ZERO, true);
        world.step(DT);
        assert_eq!(world.count_of(EntityKind::Ufo), 1);
    }

    #[test]
    fn test_ufo_dies_to_player_bullet() {
        let mut world = empty_world();
        park_ship(&mut world, -1.5, -0.8);
        let ufo = world
            .create(EntityKind::Ufo, Transform::at(0.5, 0.0), None)
            .id();
        assert!(world.ufo_present());

        // Across the UFO's waistline
        bullet_at(&mut world, 0.5, 0.0, Vec2::ZERO, true);
        world.step(DT);

        assert!(world.entity(ufo).is_none());
        assert!(!world.ufo_present());
        assert_eq!(world.score().current(), world.tuning().points_for_ufo);
    }

    #[test]
    fn test_ufo_fires_at_player() {
        let mut world = bare_world(Tuning {
            ufo_cooldown: 0.05,
            ..Tuning::default()
        });
        let ufo = world
            .create(EntityKind::Ufo, Transform::at(-1.0, 0.5), None)
            .id();
        world.step(0.1);
        assert_eq!(world.count_of(EntityKind::Bullet), 0);
        world.step(0.1);

        let bullet = world
            .entities()
            .iter()
            .find(|e| e.kind() == EntityKind::Bullet)
            .expect("UFO should have fired");
        assert!(!bullet.fired_by_player());
        let speed = world.tuning().bullet_speed_basic;
        assert!((bullet.vel.length() - speed).abs() < 1e-4);

        let from = world.entity(ufo).unwrap().position();
        let to_ship = (world.player_pos() - from).normalize();
        assert!(bullet.vel.normalize().dot(to_ship) > 0.9);
    }

    #[test]
    fn test_pause_freezes_but_countdown_advances() {
        let mut world = empty_world();
        let rock = rock_at(&mut world, 1.0, 0.5);
        world.entity_mut(rock).unwrap().vel = Vec2::new(0.3, 0.0);
        let before = world.entity(rock).unwrap().position();

        world.pause();
        world.request_restart(0.2);
        for _ in 0..5 {
            world.step(0.1);
        }
        assert_eq!(world.entity(rock).unwrap().position(), before);
        // Countdown ran out while paused; the restart waits for resume
        assert!(world.restart_pending());

        world.resume();
        world.step(0.1);
        assert!(world.entity(rock).is_none());
        assert!(!world.restart_pending());
        let events = world.drain_events();
        assert!(events.contains(&GameEvent::Paused));
        assert!(events.contains(&GameEvent::Resumed));
        assert!(events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_reads_high_score() {
        let platform = RecordingPlatform::with_high_score(300);
        let calls = platform.calls.clone();
        let mut world = World::new(3, Tuning::default(), Box::new(platform));
        world.step(DT);
        assert_eq!(world.score().high(), 300);
        assert_eq!(calls.borrow().reads, 1);
    }

    #[test]
    fn test_explosion_grows_then_vanishes() {
        let mut world = empty_world();
        let id = world
            .create(EntityKind::Explosion, Transform::at(0.5, 0.5), None)
            .id();
        let start = world.entity(id).unwrap().model().transformed()[0];
        world.step(0.3);
        let grown = world.entity(id).unwrap().transform().scale().x;
        assert!(grown > 1.0);
        assert!(grown < 1.0 + world.tuning().explosion_max_scale);
        assert_ne!(world.entity(id).unwrap().model().transformed()[0], start);

        world.step(0.3);
        world.step(0.3);
        assert!(world.entity(id).is_none());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut world = World::with_seed(0);
        world.on_resolution_change(1000, 1000);
        let narrow = world.viewport().world_scale();
        world.on_resolution_change(1920, 1080);
        let wide = world.viewport().world_scale();
        assert_ne!(narrow, wide);
        world.on_graphics_context_created();
        assert_eq!(world.viewport().world_scale(), wide);
    }

    #[test]
    fn test_teleport_lands_in_bounds_and_stops() {
        let mut world = empty_world();
        let id = world.ship().unwrap().id();
        world.entity_mut(id).unwrap().vel = Vec2::new(0.4, 0.0);
        world.set_input(InputIntent::default().jump(true));
        world.step(DT);

        let ship = world.entity(id).unwrap();
        let landed = ship.position();
        assert_eq!(ship.vel, Vec2::ZERO);
        assert!(landed.x.abs() <= WORLD_RATIO);
        assert!(landed.y.abs() <= WORLD_Y_MAX);
        assert_eq!(world.player_pos(), landed);
        match ship.body() {
            Body::Ship { teleport, .. } => {
                assert_eq!(teleport.remaining(), world.tuning().ship_teleport_cooldown)
            }
            _ => unreachable!(),
        }

        // Holding the button does nothing until the cooldown runs out
        for _ in 0..20 {
            world.step(DT);
        }
        assert_eq!(world.entity(id).unwrap().position(), landed);
        for _ in 0..15 {
            world.step(DT);
        }
        assert_ne!(world.entity(id).unwrap().position(), landed);
    }

    #[test]
    fn test_survival_points_every_interval() {
        let mut world = empty_world();
        let tuning = *world.tuning();
        let dt = tuning.points_time_interval / 10.0;

        for _ in 0..10 {
            world.step(dt);
        }
        assert_eq!(world.score().current(), 0);
        world.step(dt);
        assert_eq!(world.score().current(), tuning.points_for_time);
        assert!(world.drain_events().contains(&GameEvent::PointsAwarded {
            points: tuning.points_for_time,
            total: tuning.points_for_time,
        }));

        for _ in 0..10 {
            world.step(dt);
        }
        assert_eq!(world.score().current(), tuning.points_for_time);
        world.step(dt);
        assert_eq!(world.score().current(), tuning.points_for_time * 2);
    }

    #[test]
    fn test_ufo_turns_back_into_a_new_lane() {
        let mut world = empty_world();
        let id = world
            .create(EntityKind::Ufo, Transform::at(0.0, 0.9), None)
            .id();
        let ufo = world.entity_mut(id).unwrap();
        let edge = WORLD_RATIO + ufo.radius();
        ufo.set_position(Vec2::new(edge - 0.001, 0.9));
        ufo.vel = Vec2::new(0.5, 0.0);

        world.step(DT);
        let ufo = world.entity(id).unwrap();
        let zone = world.tuning().ufo_zone;
        assert!(ufo.position().x > edge);
        assert!(ufo.position().y.abs() <= zone);
        assert_eq!(ufo.vel, Vec2::new(-0.5, 0.0));

        // Heading back in; no second turn
        let turned_at = ufo.position();
        world.step(DT);
        let ufo = world.entity(id).unwrap();
        assert!(ufo.position().x < turned_at.x);
        assert_eq!(ufo.position().y, turned_at.y);
        assert_eq!(ufo.vel, Vec2::new(-0.5, 0.0));
    }

    #[test]
    fn test_ship_rams_large_asteroid() {
        let mut world = empty_world();
        let ship = world.ship().unwrap().id();
        let rock = rock_at(&mut world, 0.5, 0.0);
        let corner = world.entity(rock).unwrap().model().transformed()[0];
        park_ship(&mut world, corner.x, corner.y);
        world.step(DT);

        assert!(world.entity(ship).is_none());
        assert!(world.entity(rock).is_none());
        assert!(world.restart_pending());

        // The rock still splits, but ramming earns nothing
        let large = world.tuning().asteroid_vert_count;
        let halves: Vec<_> = world
            .entities()
            .iter()
            .filter(|e| e.kind() == EntityKind::Asteroid)
            .collect();
        assert_eq!(halves.len(), 2);
        assert!(halves.iter().all(|e| e.is_small_asteroid(large)));
        assert_eq!(world.asteroid_count(), 2);
        assert_eq!(world.score().current(), 0);
        assert_eq!(world.count_of(EntityKind::Explosion), 2);

        let events = world.drain_events();
        assert!(events.contains(&GameEvent::AsteroidSplit { id: rock }));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ShipDestroyed { .. })));
    }

    #[test]
    fn test_ship_rams_ufo() {
        let mut world = empty_world();
        let ship = world.ship().unwrap().id();
        let ufo = world
            .create(EntityKind::Ufo, Transform::at(0.5, 0.3), None)
            .id();
        world.entity_mut(ufo).unwrap().vel = Vec2::ZERO;
        let nose = world.entity(ufo).unwrap().model().transformed()[0];
        park_ship(&mut world, nose.x, nose.y);
        world.step(DT);

        assert!(world.entity(ship).is_none());
        assert!(world.entity(ufo).is_none());
        assert!(!world.ufo_present());
        assert!(world.restart_pending());
        assert_eq!(world.score().current(), world.tuning().points_for_ufo);
        assert!(world
            .drain_events()
            .contains(&GameEvent::UfoDestroyed { id: ufo }));
    }

    #[test]
    fn test_ufo_bullet_shatters_small_rock_without_points() {
        let mut world = empty_world();
        let rock = small_rock_at(&mut world, 0.5, 0.5);
        world.ctx.set_asteroid_count(8);
        let bullet = bullet_at(&mut world, 0.5, 0.6, Vec2::ZERO, false);
        world.step(DT);

        assert!(world.entity(rock).is_none());
        assert!(world.entity(bullet).is_none());
        assert_eq!(world.asteroid_count(), 7);
        assert_eq!(world.score().current(), 0);
        assert!(!world
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::PointsAwarded { .. })));
    }

    #[test]
    fn test_frames_hand_events_to_batch() {
        let mut world = World::with_seed(3);
        let mut batch = DrawBatch::new();

        let events = world.update(&mut batch);
        assert!(events.contains(&GameEvent::Restarted));
        assert_eq!(batch.len(), world.entities().len());
        assert!(!batch.vertices().is_empty());

        world.set_input(InputIntent::default().fire(true).turn(1.0));
        for _ in 0..600 {
            world.run_frame(DT, &mut batch);
            assert_eq!(world.ctx.pending_events(), 0);
        }
        assert_eq!(batch.len(), world.entities().len());
    }
}
