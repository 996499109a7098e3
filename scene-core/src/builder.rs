//! Procedural generation of the initial particle population.
//!
//! The shapes are fixed by configuration, the fine detail (ring jitter,
//! leaf shading, which leaves become lights, snow placement) comes from the
//! supplied random number generator, so a seeded rng reproduces a scene
//! exactly.

use crate::{
    color::Rgb,
    config::{Config, SnowConfig, StarConfig, TreeConfig},
    error::{Result, SceneError},
    particle::{Category, Particle, ParticleKind},
    scene::SceneState,
};
use glam::Vec3;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use std::f32::consts::TAU;

/// Blink phases are drawn uniformly from `[0, BLINK_PHASE_RANGE)`.
pub const BLINK_PHASE_RANGE: f32 = 100.0;

/// Builds the tree, star cluster and snow field from a validated [`Config`].
#[derive(Debug)]
pub struct SceneBuilder<'a> {
    tree: &'a TreeConfig,
    star: &'a StarConfig,
    snow: &'a SnowConfig,
    tree_particles: usize,
}

impl<'a> SceneBuilder<'a> {
    /// Validates `cfg` and returns a builder for it.
    ///
    /// ### Errors
    /// Returns [`SceneError::InvalidConfig`] naming the first bad field.
    pub fn new(cfg: &'a Config) -> Result<Self> {
        cfg.validate()?;
        let tree_particles = cfg.tree.particle_count()?;
        log::debug!(
            "scene config: {} layers, {} stars, {} snow flakes",
            cfg.tree.layers,
            cfg.star.count,
            cfg.snow.count
        );
        Ok(Self {
            tree: &cfg.tree,
            star: &cfg.star,
            snow: &cfg.snow,
            tree_particles,
        })
    }

    /// Number of particles on tree layer `i`.
    ///
    /// See [`TreeConfig::layer_count`]. Every layer of a validated tree fits
    /// the particle limit; counts past the last layer read as zero.
    pub fn layer_count(&self, i: usize) -> usize {
        if i >= self.tree.layers {
            return 0;
        }
        self.tree.layer_count(i).unwrap_or(0)
    }

    /// Total number of particles a build will produce.
    ///
    /// Each group is bounded by
    /// [`MAX_GROUP_PARTICLES`](crate::config::MAX_GROUP_PARTICLES), so the
    /// sum cannot overflow.
    pub fn population(&self) -> usize {
        self.tree_particles + self.star.count + self.snow.count
    }

    /// Generates the whole scene: tree first, then stars, then snow.
    ///
    /// ### Errors
    /// Returns [`SceneError::EmptyScene`] if the configuration yields no
    /// particles at all.
    pub fn build(&self, rng: &mut impl Rng) -> Result<SceneState> {
        let mut particles = Vec::with_capacity(self.population());
        self.push_tree(&mut particles, rng);
        self.push_star(&mut particles, rng);
        self.push_snow(&mut particles, rng);

        if particles.is_empty() {
            return Err(SceneError::EmptyScene(
                "every tree layer, the star and the snow field are empty".to_owned(),
            ));
        }

        let state = SceneState::new(particles);
        log::info!(
            "built scene: {} particles ({} leaves, {} lights, {} stars, {} snow)",
            state.len(),
            state.count(Category::Leaf),
            state.count(Category::Light),
            state.count(Category::Star),
            state.count(Category::Snow)
        );
        Ok(state)
    }

    /// Convenience wrapper around [`SceneBuilder::build`] with a [`StdRng`]
    /// seeded from `seed`.
    pub fn build_seeded(&self, seed: u64) -> Result<SceneState> {
        self.build(&mut StdRng::seed_from_u64(seed))
    }

    /// Conical spiral of leaves, some of which become lights.
    fn push_tree(&self, out: &mut Vec<Particle>, rng: &mut impl Rng) {
        let t = self.tree;
        let (jitter_lo, jitter_hi) = t.radius_jitter;

        for i in 0..t.layers {
            let y = t.y_top + i as f32 * t.layer_height;
            let radius = i as f32 * t.radius_step;
            let count = self.layer_count(i);

            for j in 0..count {
                let angle = (j as f32 / count as f32) * TAU + i as f32 * t.spiral_skew;
                let r = radius * rng.random_range(jitter_lo..=jitter_hi);
                let pos = Vec3::new(angle.cos() * r, y, angle.sin() * r);

                let green = rng.random_range(0..=t.leaf_green_jitter);
                let leaf_color = Rgb::new(
                    t.leaf_color.r,
                    t.leaf_color.g.saturating_add(green),
                    t.leaf_color.b,
                );
                let blink_phase = rng.random_range(0.0..BLINK_PHASE_RANGE);

                let particle = if rng.random_bool(t.light_probability) {
                    let color = t.light_palette.choose(rng).copied().unwrap_or(Rgb::GOLD);
                    Particle::new(pos, color, t.light_size, ParticleKind::Light { blink_phase })
                } else {
                    Particle::new(pos, leaf_color, t.leaf_size, ParticleKind::Leaf)
                };
                out.push(particle);
            }
        }
    }

    /// Cube of gold particles around the star center.
    fn push_star(&self, out: &mut Vec<Particle>, rng: &mut impl Rng) {
        let s = self.star;
        let h = s.half_extent;
        out.extend((0..s.count).map(|_| {
            let offset = Vec3::new(
                rng.random_range(-h..=h),
                rng.random_range(-h..=h),
                rng.random_range(-h..=h),
            );
            Particle::new(s.center + offset, Rgb::GOLD, s.size, ParticleKind::Star)
        }));
    }

    /// Snow flakes on whole-unit positions across the snow volume.
    fn push_snow(&self, out: &mut Vec<Particle>, rng: &mut impl Rng) {
        let s = self.snow;
        let (hx, hy, hz) = s.half_extents;
        let (size_lo, size_hi) = s.size_range;
        out.extend((0..s.count).map(|_| {
            let pos = Vec3::new(
                rng.random_range(-hx..=hx) as f32,
                rng.random_range(-hy..=hy) as f32,
                rng.random_range(-hz..=hz) as f32,
            );
            let size = rng.random_range(size_lo..=size_hi) as f32;
            Particle::new(pos, s.color, size, ParticleKind::Snow)
        }));
    }
}
