//! Asteroids Sim headless runner
//!
//! Plays the game with a demo-mode autopilot at a fixed 60 Hz step and logs
//! what happens. Rendering hosts embed the library instead.
//!
//! Usage: `asteroids-sim [tuning.json] [frames] [seed]`
//! (`-` as the tuning path keeps the defaults)

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::f32::consts::{PI, TAU};

    use asteroids_sim::platform::{InputIntent, Platform};
    use asteroids_sim::render::DrawBatch;
    use asteroids_sim::sim::{EntityKind, GameEvent, World};
    use asteroids_sim::{Tuning, angle_from_direction};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_FRAMES: u64 = 60 * 60;
    const DEFAULT_SEED: u64 = 0x5eed;

    /// Keeps the high score for the lifetime of the process
    #[derive(Debug, Default)]
    struct SessionPlatform {
        high: u32,
        vibrations: u32,
    }

    impl Platform for SessionPlatform {
        fn read_high_score(&mut self) -> u32 {
            self.high
        }

        fn submit_high_score(&mut self, score: u32) {
            self.high = score;
        }

        fn vibrate(&mut self) {
            self.vibrations += 1;
            log::debug!("Vibrate ({} so far)", self.vibrations);
        }
    }

    /// Demo pilot: face the nearest threat, shoot when lined up, thrust when
    /// it is far away, teleport when it is about to hit
    fn autopilot(world: &World) -> InputIntent {
        let Some(ship) = world.ship() else {
            return InputIntent::released();
        };
        let pos = ship.position();

        let target = world
            .entities()
            .iter()
            .filter(|e| matches!(e.kind(), EntityKind::Asteroid | EntityKind::Ufo))
            .min_by(|a, b| {
                a.position()
                    .distance_squared(pos)
                    .total_cmp(&b.position().distance_squared(pos))
            });
        let Some(target) = target else {
            return InputIntent::released();
        };

        let to_target = target.position() - pos;
        let distance = to_target.length();
        let wanted = angle_from_direction(to_target);
        let error = (wanted - ship.transform().angle() + PI).rem_euclid(TAU) - PI;

        InputIntent::default()
            .turn(error * 4.0)
            .fire(error.abs() < 0.2)
            .thrust(distance > 0.8 && error.abs() < 0.5)
            .jump(distance < (target.radius() + ship.radius()) * 1.2)
    }

    pub fn run() {
        env_logger::init();
        log::info!("Asteroids Sim (headless) starting...");

        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) if path != "-" => Tuning::load(path),
            _ => Tuning::default(),
        };
        let frames = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEED);

        let mut world = World::new(seed, tuning, Box::new(SessionPlatform::default()));
        world.on_graphics_context_created();
        let mut batch = DrawBatch::new();

        let mut deaths = 0u32;
        let mut waves = 0u32;
        let mut ufos = 0u32;
        let mut peak_lines = 0usize;

        for _ in 0..frames {
            world.set_input(autopilot(&world));
            let events = world.run_frame(FRAME_DT, &mut batch);
            for event in &events {
                match event {
                    GameEvent::ShipDestroyed { pos } => {
                        deaths += 1;
                        log::info!(
                            "Frame {}: ship lost at ({:.2}, {:.2}), score {}",
                            world.frame(),
                            pos.x,
                            pos.y,
                            world.score().current()
                        );
                    }
                    GameEvent::WaveSpawned { .. } => waves += 1,
                    GameEvent::UfoSpawned { .. } => ufos += 1,
                    _ => {}
                }
            }
            peak_lines = peak_lines.max(batch.indices().len() / 2);
        }

        log::info!(
            "Ran {frames} frames: score {}, high {}, {deaths} deaths, {waves} waves, {ufos} UFOs, peak {peak_lines} lines",
            world.score().current(),
            world.score().high()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly
}
