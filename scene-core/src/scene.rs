use crate::particle::{Category, Particle};

/// All mutable state of a running scene.
///
/// The particle population is fixed after generation; only positions of
/// snow, the global rotation and the frame timer change from frame to frame.
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    pub particles: Vec<Particle>,
    /// Global rotation about the vertical axis, in radians. Never wrapped.
    pub angle: f32,
    /// Simulated time since the scene started, in milliseconds.
    pub elapsed_ms: f64,
    /// Number of simulation steps taken.
    pub frame: u64,
}

impl SceneState {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self {
            particles,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn count(&self, category: Category) -> usize {
        self.particles
            .iter()
            .filter(|p| p.category() == category)
            .count()
    }
}
