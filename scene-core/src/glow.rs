//! Soft luminous discs built from a solid core and additive halo layers.

use crate::{
    color::{Rgb, Rgba},
    config::GlowConfig,
    surface::{RenderTarget, Surface},
};
use glam::IVec2;

/// Largest core radius a glow is rendered at. Keeps the halo scratch
/// surface bounded for particles that end up next to the eye plane.
pub const MAX_GLOW_RADIUS: i32 = 128;

/// Draws glowing particles.
///
/// Holds a scratch [`Surface`] for the halo that is cleared and reused for
/// every call, so steady-state rendering does not allocate.
#[derive(Debug)]
pub struct GlowRenderer {
    outer_scale: f32,
    inner_scale: f32,
    halo: Surface,
}

impl GlowRenderer {
    pub fn new(cfg: &GlowConfig) -> Self {
        Self {
            outer_scale: cfg.outer_scale,
            inner_scale: cfg.inner_scale,
            halo: Surface::default(),
        }
    }

    /// Draws a glowing disc of `color` at `center`.
    ///
    /// The core is an opaque disc of `radius`. The halo is a wide layer at
    /// `outer_scale * radius` with alpha `base_intensity / 2`, overlaid by a
    /// tighter layer at `inner_scale * radius` with alpha `base_intensity`,
    /// added onto the target on top of the core.
    pub fn draw_glow<T: RenderTarget + ?Sized>(
        &mut self,
        target: &mut T,
        color: Rgb,
        center: IVec2,
        radius: i32,
        base_intensity: u8,
    ) {
        let radius = radius.clamp(0, MAX_GLOW_RADIUS);
        target.fill_circle(color, center, radius as f32);

        let outer = radius as f32 * self.outer_scale;
        let inner = radius as f32 * self.inner_scale;
        let half = outer.max(inner).ceil() as i32;
        let side = (2 * half + 1) as u32;

        self.halo.resize_clear(side, side, Rgba::TRANSPARENT);
        let mid = IVec2::splat(half);
        self.halo.fill_circle_rgba(color.with_alpha(base_intensity / 2), mid, outer);
        self.halo.fill_circle_rgba(color.with_alpha(base_intensity), mid, inner);

        target.blend_add(&self.halo, center.saturating_sub(mid));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> GlowRenderer {
        GlowRenderer::new(&GlowConfig::default())
    }

    #[test]
    fn core_is_solid_and_halo_brightens_surroundings() {
        let mut target = Surface::new(40, 40);
        target.fill(Rgb::new(0, 0, 0));

        let mut glow = renderer();
        glow.draw_glow(&mut target, Rgb::WHITE, IVec2::new(20, 20), 4, 100);

        // Core: opaque white plus the halo added on top, still white.
        assert_eq!(target.pixel(20, 20).map(|p| p.rgb()), Some(Rgb::WHITE));

        // Inside the inner layer (radius 6), full intensity: 255 * 100 / 255.
        assert_eq!(
            target.pixel(25, 20).map(|p| p.rgb()),
            Some(Rgb::new(100, 100, 100))
        );
        // Between inner and outer layers (radius 12), half intensity.
        assert_eq!(
            target.pixel(30, 20).map(|p| p.rgb()),
            Some(Rgb::new(50, 50, 50))
        );
        // Beyond the outer layer nothing changes.
        assert_eq!(target.pixel(33, 20).map(|p| p.rgb()), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn halo_adds_to_existing_pixels_instead_of_replacing() {
        let mut target = Surface::new(30, 30);
        target.fill(Rgb::new(10, 20, 30));

        let mut glow = renderer();
        glow.draw_glow(&mut target, Rgb::new(255, 0, 0), IVec2::new(15, 15), 2, 80);

        // Radius 2 core, inner halo to 3, outer to 6: pixel at dx = 5 only
        // receives the outer layer (alpha 40).
        assert_eq!(
            target.pixel(20, 15).map(|p| p.rgb()),
            Some(Rgb::new(10 + 40, 20, 30))
        );
    }

    #[test]
    fn scratch_halo_is_reused_and_sized_to_outer_layer() {
        let mut target = Surface::new(10, 10);
        let mut glow = renderer();

        glow.draw_glow(&mut target, Rgb::GOLD, IVec2::new(5, 5), 3, 80);
        assert_eq!(glow.halo.width(), 19);

        glow.draw_glow(&mut target, Rgb::GOLD, IVec2::new(5, 5), 1, 80);
        assert_eq!(glow.halo.width(), 7);
        assert_eq!(glow.halo.height(), 7);
    }

    #[test]
    fn huge_radius_is_capped() {
        let mut target = Surface::new(8, 8);
        let mut glow = renderer();

        glow.draw_glow(&mut target, Rgb::GOLD, IVec2::new(i32::MAX, 4), i32::MAX, 80);
        assert_eq!(
            glow.halo.width(),
            (2 * 3 * MAX_GLOW_RADIUS + 1) as u32
        );
    }
}
