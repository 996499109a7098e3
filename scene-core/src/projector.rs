//! Perspective projection of particles onto the screen.
//!
//! Rotation happens about the vertical (y) axis, driven from each particle's
//! base position, followed by a simple pinhole divide:
//!
//! ```text
//! scale   = fov / (viewer_distance + rot_z)
//! screen  = (rot_x * scale + w/2, y * scale + h/2 - vertical_offset)
//! ```

use crate::{
    config::ViewConfig,
    particle::{Particle, ParticleKind},
};
use glam::{IVec2, Vec2};

/// Smallest magnitude the perspective denominator is allowed to take.
pub const NEAR_EPSILON: f32 = 1e-3;

/// Screen-space result of projecting one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Pixel position, truncated toward zero.
    pub screen: IVec2,
    /// Perspective factor; larger means closer.
    pub scale: f32,
    /// Rotated depth; larger means farther.
    pub depth: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Projector {
    half_size: Vec2,
    fov: f32,
    viewer_distance: f32,
    vertical_offset: f32,
}

impl Projector {
    pub fn new(view: &ViewConfig) -> Self {
        Self {
            half_size: Vec2::new(view.width as f32, view.height as f32) / 2.0,
            fov: view.fov,
            viewer_distance: view.viewer_distance,
            vertical_offset: view.vertical_offset,
        }
    }

    /// Projects `p` for the global rotation `angle`.
    ///
    /// Only snow adds its own `z` to the rotated depth, so falling flakes keep
    /// an independent depth jitter; every other category is placed purely
    /// from its base position. A denominator within [`NEAR_EPSILON`] of zero
    /// is replaced by `+NEAR_EPSILON`, so the result is always finite.
    pub fn project(&self, p: &Particle, angle: f32) -> Projection {
        let rotated = Vec2::from_angle(angle).rotate(Vec2::new(p.base_x(), p.base_z()));
        let rot_x = rotated.x;
        let rot_z = match p.kind() {
            ParticleKind::Snow => rotated.y + p.position.z,
            ParticleKind::Leaf | ParticleKind::Star | ParticleKind::Light { .. } => rotated.y,
        };

        let mut denom = self.viewer_distance + rot_z;
        if denom.abs() < NEAR_EPSILON {
            log::trace!("clamping near-singular projection (denominator {denom})");
            denom = NEAR_EPSILON;
        }
        let scale = self.fov / denom;

        let x = rot_x * scale + self.half_size.x;
        let y = p.position.y * scale + self.half_size.y - self.vertical_offset;

        Projection {
            screen: IVec2::new(x as i32, y as i32),
            scale,
            depth: rot_z,
        }
    }
}
