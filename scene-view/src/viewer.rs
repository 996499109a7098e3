//! Animated particle tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the scene state and the
//! simulation/compositing pipeline and implements [`eframe::App`] to show
//! the rendered canvas with its caption.

use eframe::App;
use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use scene_core::{
    Result,
    builder::SceneBuilder,
    clock::FrameClock,
    color::Rgb,
    compositor::Compositor,
    config::{CaptionConfig, Config},
    scene::SceneState,
    simulator::Simulator,
    surface::Surface,
};

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The scene core: [`SceneState`], [`Simulator`], [`Compositor`].
/// - A software [`Surface`] the compositor renders into, mirrored to an
///   egui texture every frame.
/// - A [`FrameClock`] that keeps the animation at its fixed frame rate.
///
/// The per-frame update is:
/// 1. Ask the clock how many simulation frames are due and step that often.
/// 2. Compose the scene into the canvas and upload it.
/// 3. Paint the canvas and the caption, then schedule the next repaint.
///
/// ### Fields
/// - `state` - Particles, rotation angle and frame timer.
/// - `simulator` - Advances rotation, time and snow.
/// - `compositor` - Depth-sorts and draws the scene.
/// - `clock` - Converts egui time into whole simulation frames.
///
/// - `canvas` - Software render target sized to the view.
/// - `bytes` - Reused RGBA staging buffer for the texture upload.
/// - `texture` - egui texture showing the canvas, created on first paint.
///
/// - `caption` - Text drawn over the bottom of the canvas.
pub struct Viewer {
    state: SceneState,
    simulator: Simulator,
    compositor: Compositor,
    clock: FrameClock,

    canvas: Surface,
    bytes: Vec<u8>,
    texture: Option<egui::TextureHandle>,

    caption: CaptionConfig,
}

impl Viewer {
    /// Generates the scene from `cfg` and sets up the pipeline.
    ///
    /// Scene generation and snow respawning share one rng seeded from
    /// `cfg.seed`, so the same seed replays the same animation.
    ///
    /// ### Returns
    /// A viewer ready to be passed to `eframe::run_native`, or the
    /// configuration error that prevented the scene from being built.
    pub fn new(cfg: Config) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let state = SceneBuilder::new(&cfg)?.build(&mut rng)?;

        Ok(Self {
            state,
            simulator: Simulator::new(&cfg, rng),
            compositor: Compositor::new(&cfg),
            clock: FrameClock::new(&cfg.motion),
            canvas: Surface::new(cfg.view.width, cfg.view.height),
            bytes: Vec::new(),
            texture: None,
            caption: cfg.caption,
        })
    }

    /// Size of the render canvas in pixels.
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    /// Runs every simulation frame that is due at `now` (seconds).
    ///
    /// ### Returns
    /// The number of frames stepped.
    fn advance(&mut self, now: f64) -> u32 {
        let due = self.clock.advance(now);
        for _ in 0..due {
            self.simulator.step(&mut self.state);
        }
        due
    }

    /// Composes the current state into the canvas.
    fn render(&mut self) {
        self.compositor.compose(&self.state, &mut self.canvas);
    }

    /// Converts a canvas pixel position to screen-space.
    ///
    /// The canvas is stretched over `rect`, so positions scale with the
    /// ratio between the rect and the canvas size.
    fn canvas_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let scale = Vec2::new(rect.width(), rect.height()) / self.canvas_size();
        egui::pos2(rect.min.x + p.x * scale.x, rect.min.y + p.y * scale.y)
    }

    /// Uploads the canvas into the egui texture, creating it on first use.
    fn upload(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.canvas.to_rgba_bytes(&mut self.bytes);
        let size = [self.canvas.width() as usize, self.canvas.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &self.bytes);

        match &mut self.texture {
            Some(texture) => {
                texture.set(image, egui::TextureOptions::NEAREST);
                texture.id()
            }
            None => {
                let texture = ctx.load_texture("scene", image, egui::TextureOptions::NEAREST);
                let id = texture.id();
                self.texture = Some(texture);
                id
            }
        }
    }

    /// Draws the caption centered near the bottom with an offset shadow.
    fn paint_caption(&self, painter: &egui::Painter, rect: egui::Rect) {
        let c = &self.caption;
        let font_scale = rect.height() / self.canvas_size().y;
        let font = egui::FontId::proportional(c.font_size * font_scale);
        let anchor = Vec2::new(self.canvas_size().x / 2.0, c.top);

        let layers = [
            (anchor + Vec2::splat(c.shadow_offset), c.shadow_color),
            (anchor, c.color),
        ];
        for (pos, color) in layers {
            painter.text(
                self.canvas_to_screen(pos, rect),
                egui::Align2::CENTER_TOP,
                &c.text,
                font.clone(),
                to_color32(color),
            );
        }
    }

    /// Builds the central panel showing the animated scene.
    fn ui_canvas(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.advance(now);
        self.render();
        let texture = self.upload(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                painter.image(
                    texture,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
                self.paint_caption(&painter, rect);
            });

        ctx.request_repaint_after(self.clock.frame_interval());
    }
}

fn to_color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

impl App for Viewer {
    /// eframe callback that advances and paints one frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_canvas(ctx);
    }
}
