use crate::color::Rgb;
use glam::Vec3;

/// What a particle is, with the data only that category needs.
///
/// The category decides both the projection branch (only snow carries its
/// own depth jitter) and how the particle is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleKind {
    Leaf,
    Star,
    Snow,
    /// A bulb on the tree that blinks on a phase-shifted sine wave.
    Light { blink_phase: f32 },
}

/// Payload-free category tag, for counting and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Leaf,
    Star,
    Snow,
    Light,
}

impl ParticleKind {
    pub fn category(&self) -> Category {
        match self {
            ParticleKind::Leaf => Category::Leaf,
            ParticleKind::Star => Category::Star,
            ParticleKind::Snow => Category::Snow,
            ParticleKind::Light { .. } => Category::Light,
        }
    }

    /// Whether a light is in its on phase at `elapsed_ms`.
    ///
    /// The bulb is on while `sin(elapsed_ms * frequency + blink_phase)` is
    /// non-negative, so the zero crossing itself counts as on. Every other
    /// kind is never lit.
    pub fn is_lit(&self, elapsed_ms: f64, frequency: f64) -> bool {
        match *self {
            ParticleKind::Light { blink_phase } => {
                (elapsed_ms * frequency + blink_phase as f64).sin() >= 0.0
            }
            ParticleKind::Leaf | ParticleKind::Star | ParticleKind::Snow => false,
        }
    }
}

/// A single point of the scene.
///
/// `position` is the current location; `base_x` and `base_z` are the
/// un-rotated horizontal reference that rotation is recomputed from every
/// frame, so the rotation never accumulates error.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    base_x: f32,
    base_z: f32,
    pub color: Rgb,
    pub size: f32,
    kind: ParticleKind,
}

impl Particle {
    pub fn new(position: Vec3, color: Rgb, size: f32, kind: ParticleKind) -> Self {
        Self {
            position,
            base_x: position.x,
            base_z: position.z,
            color,
            size,
            kind,
        }
    }

    #[inline]
    pub fn base_x(&self) -> f32 {
        self.base_x
    }

    #[inline]
    pub fn base_z(&self) -> f32 {
        self.base_z
    }

    #[inline]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Recycles a snow flake at a new horizontal position and height.
    ///
    /// `position.x` and `base_x` are written together; rotation reads only
    /// the base, so updating one without the other would draw the flake
    /// somewhere other than where it is.
    ///
    /// ### Panics
    /// Panics in debug builds if called on a non-snow particle.
    pub fn reset_snow(&mut self, x: f32, y: f32) {
        debug_assert_eq!(self.kind, ParticleKind::Snow, "only snow is recycled");
        self.position.x = x;
        self.base_x = x;
        self.position.y = y;
    }
}
