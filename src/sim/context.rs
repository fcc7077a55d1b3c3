//! Shared state entities reach while updating or colliding
//!
//! Owns the RNG, score, host bridge and wave counters, and acts as the
//! entity factory. New entities land in a staging list that the world
//! merges after each update or collision callback, so the world's entity
//! list is never mutated while it is being walked.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId, EntityKind};
use super::event::GameEvent;
use super::model::Model;
use super::transform::Transform;
use crate::consts::{
    ASTEROID_SPAWN_OFFSET, ASTEROID_SPAWN_Y, MAX_PENDING_EVENTS, UFO_SPAWN_OFFSET, WORLD_RATIO,
};
use crate::direction_from_angle;
use crate::platform::{InputIntent, Platform};
use crate::score::Score;
use crate::tuning::Tuning;

pub struct SimContext {
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Latest player intent, read by the ship each update
    pub input: InputIntent,
    score: Score,
    platform: Box<dyn Platform>,
    next_id: EntityId,
    spawned: Vec<Entity>,
    /// Bounded; the oldest events go first when nobody drains
    events: VecDeque<GameEvent>,
    dropped_events: usize,
    /// Live rock mass in half-asteroid units: a large rock counts 2 and
    /// each split half counts 1 when it finally breaks
    asteroid_count: i32,
    ufo_present: bool,
    player_pos: Vec2,
    restart_timer: Option<f32>,
}

impl SimContext {
    pub fn new(seed: u64, tuning: Tuning, platform: Box<dyn Platform>) -> Self {
        Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            input: InputIntent::default(),
            score: Score::new(),
            platform,
            next_id: 0,
            spawned: Vec::new(),
            events: VecDeque::new(),
            dropped_events: 0,
            asteroid_count: 0,
            ufo_present: false,
            player_pos: Vec2::ZERO,
            restart_timer: None,
        }
    }

    // === Factory ===

    /// Create an entity of `kind`, using the kind's default model when
    /// `model` is `None`
    ///
    /// Large asteroids get a random drift and add to the wave counter,
    /// UFOs start flying toward the screen and mark themselves present, and
    /// ships publish their position. The entity joins the world at the next
    /// merge point.
    pub fn create(
        &mut self,
        kind: EntityKind,
        transform: Transform,
        model: Option<Model>,
    ) -> &mut Entity {
        let model = match model {
            Some(model) => model,
            None => self.default_model(kind),
        };
        self.next_id += 1;
        let id = self.next_id;
        let mut entity = Entity::new(id, kind, transform, model, &self.tuning);

        match kind {
            EntityKind::Ship => self.player_pos = entity.position(),
            EntityKind::Asteroid
                if !entity.is_small_asteroid(self.tuning.asteroid_vert_count) =>
            {
                let heading = self.rng.random_range(0.0..TAU);
                entity.vel = direction_from_angle(heading) * self.tuning.asteroid_speed;
                self.asteroid_count += 2;
            }
            EntityKind::Ufo => {
                let inward = if entity.position().x > 0.0 { -1.0 } else { 1.0 };
                entity.vel = Vec2::new(inward * self.tuning.ufo_speed, 0.0);
                self.ufo_present = true;
                self.push_event(GameEvent::UfoSpawned { id });
                log::info!("UFO {id} entered at {:?}", entity.position());
            }
            _ => {}
        }

        self.push_event(GameEvent::EntitySpawned { id, kind });
        log::trace!("Spawned {kind:?} {id}");

        let slot = self.spawned.len();
        self.spawned.push(entity);
        &mut self.spawned[slot]
    }

    fn default_model(&mut self, kind: EntityKind) -> Model {
        match kind {
            EntityKind::Ship => Model::ship(),
            EntityKind::Asteroid => Model::asteroid(&mut self.rng, self.tuning.asteroid_vert_count),
            EntityKind::Ufo => Model::ufo(),
            EntityKind::Bullet => Model::bullet(),
            EntityKind::Explosion => Model::explosion(&mut self.rng),
        }
    }

    /// Move staged entities to the end of `out`
    pub(crate) fn merge_spawned(&mut self, out: &mut Vec<Entity>) {
        out.append(&mut self.spawned);
    }

    // === Waves ===

    /// Bring `count` large asteroids in from just past the edge
    pub fn spawn_asteroids(&mut self, count: u32) {
        for _ in 0..count {
            let transform = self.asteroid_spawn_transform();
            self.create(EntityKind::Asteroid, transform, None);
        }
        self.push_event(GameEvent::WaveSpawned { count });
        log::debug!(
            "Spawned {count} asteroids (count now {})",
            self.asteroid_count
        );
    }

    /// A small asteroid was shattered
    ///
    /// May bring in a UFO and may start the next wave.
    pub fn asteroid_destroyed(&mut self) {
        self.asteroid_count -= 1;

        let ufo_threshold = (self.tuning.asteroid_ufo_count * 2) as i32;
        if self.asteroid_count == ufo_threshold && !self.ufo_present {
            let transform = self.ufo_spawn_transform();
            self.create(EntityKind::Ufo, transform, None);
        }

        let respawn_threshold = (self.tuning.asteroid_respawn_count * 2) as i32;
        if self.asteroid_count <= respawn_threshold {
            let refill = self
                .tuning
                .asteroid_target_count
                .saturating_sub(self.tuning.asteroid_respawn_count);
            self.spawn_asteroids(refill);
        }
    }

    pub fn ufo_destroyed(&mut self, id: EntityId) {
        self.ufo_present = false;
        self.push_event(GameEvent::UfoDestroyed { id });
        log::info!("UFO {id} destroyed");
    }

    /// Spawn point on the edge away from the player's safe zone
    fn asteroid_spawn_transform(&mut self) -> Transform {
        let zone = self.tuning.asteroid_spawn_zone;
        let player = self.player_pos;
        let mut pos = Vec2::new(WORLD_RATIO + ASTEROID_SPAWN_OFFSET, ASTEROID_SPAWN_Y);

        let wide = player.x.abs() > zone;
        let tall = player.y.abs() > zone;
        if wide && !tall {
            pos.y = self.rng.random_range(-zone..=zone);
        } else if !wide && tall {
            pos.x = self.rng.random_range(-zone..=zone);
        } else if self.rng.random_bool(0.5) {
            pos.x = self.rng.random_range(-zone..=zone);
        } else {
            pos.y = self.rng.random_range(-zone..=zone);
        }
        Transform::new(pos, 0.0)
    }

    /// Just outside the edge farther from the player, in the UFO lane band
    fn ufo_spawn_transform(&mut self) -> Transform {
        let side = if self.player_pos.x > 0.0 { -1.0 } else { 1.0 };
        let y = self
            .rng
            .random_range(-self.tuning.ufo_zone..=self.tuning.ufo_zone);
        Transform::at((WORLD_RATIO + UFO_SPAWN_OFFSET) * side, y)
    }

    /// Zero the counters and reload the score for a new run
    pub(crate) fn reset_logic(&mut self) {
        self.asteroid_count = 0;
        self.ufo_present = false;
        self.restart_timer = None;
        self.score.on_restart(self.platform.as_mut());
    }

    // === Score, host and restart ===

    pub fn add_points(&mut self, points: u32) {
        self.score.add_points(points, self.platform.as_mut());
        self.push_event(GameEvent::PointsAwarded {
            points,
            total: self.score.current(),
        });
    }

    pub fn vibrate(&mut self) {
        self.platform.vibrate();
    }

    /// Schedule a restart `delay` seconds from now; a later request
    /// replaces the pending one
    pub fn request_restart(&mut self, delay: f32) {
        self.restart_timer = Some(delay);
        self.push_event(GameEvent::RestartScheduled { delay });
        log::debug!("Restart requested in {delay:.2}s");
    }

    /// Advance the restart countdown by `dt`
    ///
    /// Returns true once the countdown has run out and the level is
    /// running; the countdown keeps going while paused.
    pub(crate) fn restart_due(&mut self, dt: f32, running: bool) -> bool {
        match self.restart_timer {
            Some(timer) if timer <= 0.0 => running,
            Some(timer) => {
                self.restart_timer = Some(timer - dt);
                false
            }
            None => false,
        }
    }

    pub fn restart_timer(&self) -> Option<f32> {
        self.restart_timer
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            if self.dropped_events == 0 {
                log::warn!("Event queue full ({MAX_PENDING_EVENTS}), dropping oldest until drained");
            }
            self.events.pop_front();
            self.dropped_events += 1;
        }
        self.events.push_back(event);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        if self.dropped_events > 0 {
            log::debug!("{} events dropped before this drain", self.dropped_events);
            self.dropped_events = 0;
        }
        self.events.drain(..).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn set_player_pos(&mut self, pos: Vec2) {
        self.player_pos = pos;
    }

    pub fn player_pos(&self) -> Vec2 {
        self.player_pos
    }

    pub fn asteroid_count(&self) -> i32 {
        self.asteroid_count
    }

    pub fn ufo_present(&self) -> bool {
        self.ufo_present
    }
}

#[cfg(test)]
impl SimContext {
    pub(crate) fn set_asteroid_count(&mut self, count: i32) {
        self.asteroid_count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NullPlatform;

    fn ctx() -> SimContext {
        SimContext::new(11, Tuning::default(), Box::new(NullPlatform))
    }

    fn staged(ctx: &mut SimContext) -> Vec<Entity> {
        let mut out = Vec::new();
        ctx.merge_spawned(&mut out);
        out
    }

    #[test]
    fn test_ids_increase_and_never_repeat() {
        let mut ctx = ctx();
        let a = ctx.create(EntityKind::Bullet, Transform::default(), None).id();
        let b = ctx.create(EntityKind::Bullet, Transform::default(), None).id();
        assert!(b > a);
        staged(&mut ctx);
        ctx.reset_logic();
        let c = ctx.create(EntityKind::Bullet, Transform::default(), None).id();
        assert!(c > b);
    }

    #[test]
    fn test_large_asteroid_counts_twice_and_drifts() {
        let mut ctx = ctx();
        let speed = ctx.tuning.asteroid_speed;
        let rock = ctx.create(EntityKind::Asteroid, Transform::default(), None);
        assert!((rock.vel.length() - speed).abs() < 1e-5);
        assert_eq!(ctx.asteroid_count(), 2);

        // A split half neither counts nor drifts on its own
        let half = Model::polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y]);
        let half = ctx.create(EntityKind::Asteroid, Transform::default(), Some(half));
        assert_eq!(half.vel, Vec2::ZERO);
        assert_eq!(ctx.asteroid_count(), 2);
    }

    #[test]
    fn test_wave_refills_at_threshold() {
        let mut ctx = ctx();
        ctx.asteroid_count = 4;
        ctx.ufo_present = true;
        ctx.asteroid_destroyed();
        assert_eq!(ctx.asteroid_count(), 3);
        assert!(staged(&mut ctx).is_empty());

        ctx.asteroid_destroyed();
        let refill = staged(&mut ctx);
        assert_eq!(refill.len(), 4);
        assert!(refill.iter().all(|e| e.kind() == EntityKind::Asteroid));
        assert_eq!(ctx.asteroid_count(), 2 + 4 * 2);
    }

    #[test]
    fn test_ufo_appears_once_at_threshold() {
        let mut ctx = ctx();
        ctx.asteroid_count = 5;
        ctx.asteroid_destroyed();
        let first = staged(&mut ctx);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].kind(), EntityKind::Ufo);
        assert!(ctx.ufo_present());

        // Hitting the threshold again while the UFO lives spawns nothing
        ctx.asteroid_count = 5;
        ctx.asteroid_destroyed();
        assert!(staged(&mut ctx).is_empty());
    }

    #[test]
    fn test_ufo_spawns_on_far_side_heading_in() {
        let mut ctx = ctx();
        ctx.set_player_pos(Vec2::new(0.5, 0.0));
        let transform = ctx.ufo_spawn_transform();
        let ufo = ctx.create(EntityKind::Ufo, transform, None);
        assert!(ufo.position().x < -WORLD_RATIO);
        assert!(ufo.vel.x > 0.0);
        assert!(ufo.position().y.abs() <= crate::consts::UFO_ZONE + 1e-6);
    }

    #[test]
    fn test_asteroid_spawn_keeps_to_edge_lane() {
        let mut ctx = ctx();
        // Player out to the side, centred vertically
        ctx.set_player_pos(Vec2::new(1.2, 0.0));
        for _ in 0..20 {
            let t = ctx.asteroid_spawn_transform();
            assert!((t.pos().x - (WORLD_RATIO + ASTEROID_SPAWN_OFFSET)).abs() < 1e-5);
            assert!(t.pos().y.abs() <= ctx.tuning.asteroid_spawn_zone + 1e-6);
        }
    }

    #[test]
    fn test_restart_countdown() {
        let mut ctx = ctx();
        assert!(!ctx.restart_due(0.1, true));
        ctx.request_restart(0.15);
        assert!(!ctx.restart_due(0.1, true));
        assert!(!ctx.restart_due(0.1, true));
        // Timer is now below zero but the level is paused
        assert!(!ctx.restart_due(0.1, false));
        assert!(ctx.restart_due(0.1, true));
    }

    #[test]
    fn test_points_reach_score_and_events() {
        let mut ctx = ctx();
        ctx.add_points(20);
        ctx.add_points(10);
        assert_eq!(ctx.score().current(), 30);
        let events = ctx.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::PointsAwarded {
                points: 10,
                total: 30
            })
        );
        assert!(ctx.drain_events().is_empty());
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let mut ctx = ctx();
        for frame in 0..MAX_PENDING_EVENTS + 10 {
            ctx.push_event(GameEvent::PointsAwarded {
                points: 1,
                total: frame as u32,
            });
        }
        assert_eq!(ctx.pending_events(), MAX_PENDING_EVENTS);

        let events = ctx.drain_events();
        // Oldest went first
        assert_eq!(
            events.first(),
            Some(&GameEvent::PointsAwarded {
                points: 1,
                total: 10
            })
        );
        assert_eq!(ctx.pending_events(), 0);
    }
}
