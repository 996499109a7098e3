//! Painter's-algorithm compositing of a [`SceneState`].
//!
//! Each frame the compositor:
//! 1. clears the target to the background color,
//! 2. projects every particle into a [`DrawItem`],
//! 3. stable-sorts the items farthest first,
//! 4. draws them in that order with a category-specific style, so nearer
//!    particles overwrite farther ones.

use crate::{
    color::Rgb,
    config::{Config, GlowConfig},
    glow::GlowRenderer,
    particle::ParticleKind,
    projector::Projector,
    scene::SceneState,
    surface::RenderTarget,
    types::ParticleId,
};
use glam::IVec2;

/// One projected particle, ready to be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub depth: f32,
    pub particle: ParticleId,
    pub screen: IVec2,
    pub scale: f32,
}

/// Pixel radius for a particle of `size` at perspective `scale`.
///
/// Truncated toward zero and never below one pixel.
#[inline]
pub fn pixel_radius(size: f32, scale: f32) -> i32 {
    ((size * scale) as i32).max(1)
}

/// Depth-fogged leaf color: farther leaves (smaller scale) are dimmer.
#[inline]
pub fn fog_color(color: Rgb, scale: f32, fog: f32) -> Rgb {
    color.scaled(scale * fog)
}

#[derive(Debug)]
pub struct Compositor {
    projector: Projector,
    glow: GlowRenderer,
    style: GlowConfig,
    background: Rgb,
    blink_frequency: f64,
    draw_list: Vec<DrawItem>,
}

impl Compositor {
    pub fn new(cfg: &Config) -> Self {
        Self {
            projector: Projector::new(&cfg.view),
            glow: GlowRenderer::new(&cfg.glow),
            style: cfg.glow,
            background: cfg.view.background,
            blink_frequency: cfg.motion.blink_frequency,
            draw_list: Vec::new(),
        }
    }

    /// Items of the last composed frame, in draw order.
    pub fn draw_list(&self) -> &[DrawItem] {
        &self.draw_list
    }

    /// Renders one frame of `state` into `target`.
    pub fn compose<T: RenderTarget + ?Sized>(&mut self, state: &SceneState, target: &mut T) {
        target.fill(self.background);
        self.build_draw_list(state);

        for item in &self.draw_list {
            let p = &state.particles[item.particle];
            let radius = pixel_radius(p.size, item.scale);

            match p.kind() {
                ParticleKind::Leaf => {
                    let color = fog_color(p.color, item.scale, self.style.leaf_fog);
                    target.fill_circle(color, item.screen, radius as f32);
                }
                kind @ ParticleKind::Light { .. } => {
                    if kind.is_lit(state.elapsed_ms, self.blink_frequency) {
                        self.glow.draw_glow(
                            target,
                            p.color,
                            item.screen,
                            radius,
                            self.style.light_intensity,
                        );
                    } else {
                        target.fill_circle(self.style.light_off_color, item.screen, radius as f32);
                    }
                }
                ParticleKind::Star => {
                    self.glow.draw_glow(
                        target,
                        Rgb::GOLD,
                        item.screen,
                        radius.saturating_add(self.style.star_radius_bonus),
                        self.style.star_intensity,
                    );
                }
                ParticleKind::Snow => {
                    target.fill_circle(p.color, item.screen, radius as f32);
                }
            }
        }
    }

    /// Projects every particle and orders the result farthest first.
    ///
    /// The sort is stable, so particles at equal depth keep scene order.
    fn build_draw_list(&mut self, state: &SceneState) {
        self.draw_list.clear();
        self.draw_list
            .extend(state.particles.iter().enumerate().map(|(id, p)| {
                let proj = self.projector.project(p, state.angle);
                DrawItem {
                    depth: proj.depth,
                    particle: id,
                    screen: proj.screen,
                    scale: proj.scale,
                }
            }));
        self.draw_list.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }
}
