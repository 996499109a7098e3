//! Per-frame advancement of the scene.
//!
//! One call to [`Simulator::step`] is one logical frame:
//! 1. the global rotation advances by the angular velocity,
//! 2. the frame timer advances by one frame interval,
//! 3. every snow flake falls and is recycled once it passes the wrap line.
//!
//! Light blinking is not stored; it is derived from the frame timer with
//! [`ParticleKind::is_lit`](crate::particle::ParticleKind::is_lit).

use crate::{
    config::{Config, MotionConfig, SnowConfig},
    particle::ParticleKind,
    scene::SceneState,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Advances rotation, time and snow.
#[derive(Debug)]
pub struct Simulator {
    motion: MotionConfig,
    snow: SnowConfig,
    rng: StdRng,
}

impl Simulator {
    pub fn new(cfg: &Config, rng: StdRng) -> Self {
        Self {
            motion: cfg.motion,
            snow: cfg.snow,
            rng,
        }
    }

    pub fn seeded(cfg: &Config, seed: u64) -> Self {
        Self::new(cfg, StdRng::seed_from_u64(seed))
    }

    /// Length of one logical frame in milliseconds.
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.motion.target_fps as f64
    }

    /// Advances `state` by one frame.
    pub fn step(&mut self, state: &mut SceneState) {
        state.angle += self.motion.angular_velocity;
        state.elapsed_ms += self.frame_ms();
        state.frame += 1;
        self.snow_phase(state);
    }

    /// Moves snow down and recycles flakes past the wrap line.
    ///
    /// A recycled flake restarts at `respawn_y` at a fresh whole-unit `x`;
    /// its depth is kept.
    fn snow_phase(&mut self, state: &mut SceneState) {
        let hx = self.snow.half_extents.0;
        for p in state
            .particles
            .iter_mut()
            .filter(|p| p.kind() == ParticleKind::Snow)
        {
            p.position.y += self.snow.fall_speed;
            if p.position.y > self.snow.wrap_y {
                let x = self.rng.random_range(-hx..=hx) as f32;
                p.reset_snow(x, self.snow.respawn_y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::SceneBuilder,
        color::Rgb,
        particle::{Category, Particle},
    };
    use glam::Vec3;

    fn snow_at(x: f32, y: f32, z: f32) -> Particle {
        Particle::new(Vec3::new(x, y, z), Rgb::WHITE, 2.0, ParticleKind::Snow)
    }

    #[test]
    fn step_advances_angle_time_and_frame() {
        let cfg = Config::default();
        let mut sim = Simulator::seeded(&cfg, 1);
        let mut state = SceneState::new(Vec::new());

        for _ in 0..3 {
            sim.step(&mut state);
        }

        assert!((state.angle - 0.03).abs() < 1e-6);
        assert!((state.elapsed_ms - 50.0).abs() < 1e-9);
        assert_eq!(state.frame, 3);
    }

    #[test]
    fn snow_falls_by_fall_speed() {
        let cfg = Config::default();
        let mut sim = Simulator::seeded(&cfg, 1);
        let mut state = SceneState::new(vec![snow_at(5.0, 10.0, 3.0)]);

        sim.step(&mut state);

        let p = &state.particles[0];
        assert_eq!(p.position, Vec3::new(5.0, 11.5, 3.0));
        assert_eq!(p.base_x(), 5.0);
    }

    #[test]
    fn snow_past_wrap_line_respawns_with_matching_base() {
        let cfg = Config::default();
        let mut sim = Simulator::seeded(&cfg, 9);
        let mut state = SceneState::new(vec![snow_at(123.0, 299.0, -40.0)]);

        sim.step(&mut state);

        let p = &state.particles[0];
        assert_eq!(p.position.y, -300.0);
        assert_eq!(p.position.x, p.base_x());
        assert!(p.position.x.abs() <= 400.0);
        assert_eq!(p.position.z, -40.0);
    }

    #[test]
    fn only_snow_moves() {
        let cfg = Config::default();
        let mut sim = Simulator::seeded(&cfg, 2);
        let original = vec![
            Particle::new(Vec3::new(1.0, 299.5, 2.0), Rgb::LEAF_GREEN, 2.0, ParticleKind::Leaf),
            Particle::new(Vec3::new(0.0, -220.0, 0.0), Rgb::GOLD, 3.0, ParticleKind::Star),
            Particle::new(
                Vec3::new(4.0, 0.0, 4.0),
                Rgb::RED_LIGHT,
                4.0,
                ParticleKind::Light { blink_phase: 1.0 },
            ),
        ];
        let mut state = SceneState::new(original.clone());

        for _ in 0..10 {
            sim.step(&mut state);
        }
        assert_eq!(state.particles, original);
    }

    #[test]
    fn snow_stays_within_bounds_for_many_frames() {
        let cfg = Config::default();
        let builder = SceneBuilder::new(&cfg).unwrap();
        let mut state = builder.build_seeded(42).unwrap();
        let mut sim = Simulator::seeded(&cfg, 42);

        let lower = -(cfg.snow.half_extents.1 as f32);
        let upper = cfg.snow.wrap_y;

        for _ in 0..1000 {
            let before: Vec<f32> = state.particles.iter().map(|p| p.position.y).collect();
            sim.step(&mut state);

            for (p, y0) in state.particles.iter().zip(before) {
                if p.category() != Category::Snow {
                    continue;
                }
                assert!(
                    (lower..=upper).contains(&p.position.y),
                    "flake at y = {}",
                    p.position.y
                );
                assert_eq!(p.position.x, p.base_x());
                if y0 + cfg.snow.fall_speed > upper {
                    assert_eq!(p.position.y, cfg.snow.respawn_y);
                }
            }
        }
    }

    #[test]
    fn blink_follows_simulated_time() {
        let cfg = Config::default();
        let mut sim = Simulator::seeded(&cfg, 0);
        let mut state = SceneState::new(Vec::new());
        let light = ParticleKind::Light { blink_phase: 0.0 };
        let freq = cfg.motion.blink_frequency;

        assert!(light.is_lit(state.elapsed_ms, freq));

        // 57 frames is ~950 ms; at 0.005 rad/ms that is in the off phase.
        for _ in 0..57 {
            sim.step(&mut state);
        }
        assert!(!light.is_lit(state.elapsed_ms, freq));
    }
}
