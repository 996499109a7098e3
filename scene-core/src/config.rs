use crate::{
    color::Rgb,
    error::{Result, SceneError},
};
use glam::Vec3;

/// Upper bound on the particles any one group (tree, star, snow) may hold.
pub const MAX_GROUP_PARTICLES: usize = 1 << 20;

/// Screen and camera parameters used by the projector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub viewer_distance: f32,
    /// Pixels the whole scene is shifted up so the tree sits lower in frame.
    pub vertical_offset: f32,
    pub background: Rgb,
}

/// Shape of the conical tree body.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeConfig {
    pub layers: usize,
    pub y_top: f32,
    pub layer_height: f32,
    pub radius_step: f32,
    /// Particles per unit of ring radius.
    pub density: f32,
    pub min_count: usize,
    /// Angular offset added per layer so rings form a spiral.
    pub spiral_skew: f32,
    pub radius_jitter: (f32, f32),
    pub leaf_color: Rgb,
    /// Upper bound of the random boost applied to the leaf green channel.
    pub leaf_green_jitter: u8,
    pub leaf_size: f32,
    pub light_probability: f64,
    pub light_palette: Vec<Rgb>,
    pub light_size: f32,
}

/// The glowing cluster above the apex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarConfig {
    pub count: usize,
    pub center: Vec3,
    pub half_extent: f32,
    pub size: f32,
}

/// Snow volume and fall behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowConfig {
    pub count: usize,
    /// Half extents of the spawn volume, in whole units.
    pub half_extents: (i32, i32, i32),
    pub size_range: (u8, u8),
    pub color: Rgb,
    pub fall_speed: f32,
    /// A flake whose `y` exceeds this is recycled.
    pub wrap_y: f32,
    /// Height a recycled flake restarts from.
    pub respawn_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Radians added to the global rotation each frame.
    pub angular_velocity: f32,
    /// Blink phase advance per elapsed millisecond.
    pub blink_frequency: f64,
    pub target_fps: u32,
    /// Upper bound of simulation steps caught up in one rendered frame.
    pub max_catch_up_steps: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowConfig {
    pub outer_scale: f32,
    pub inner_scale: f32,
    pub light_intensity: u8,
    pub star_intensity: u8,
    pub star_radius_bonus: i32,
    /// Multiplier on the perspective scale used to dim distant leaves.
    pub leaf_fog: f32,
    pub light_off_color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaptionConfig {
    pub text: String,
    pub font_size: f32,
    /// Canvas row of the top of the caption.
    pub top: f32,
    pub color: Rgb,
    pub shadow_color: Rgb,
    pub shadow_offset: f32,
}

/// Complete configuration of the scene, its animation and its rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub view: ViewConfig,
    pub tree: TreeConfig,
    pub star: StarConfig,
    pub snow: SnowConfig,
    pub motion: MotionConfig,
    pub glow: GlowConfig,
    pub caption: CaptionConfig,
    pub seed: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov: 300.0,
            viewer_distance: 400.0,
            vertical_offset: 50.0,
            background: Rgb::BACKGROUND,
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            layers: 80,
            y_top: -200.0,
            layer_height: 5.0,
            radius_step: 2.5,
            density: 1.5,
            min_count: 5,
            spiral_skew: 0.5,
            radius_jitter: (0.8, 1.2),
            leaf_color: Rgb::LEAF_GREEN,
            leaf_green_jitter: 50,
            leaf_size: 2.0,
            light_probability: 0.08,
            light_palette: vec![Rgb::RED_LIGHT, Rgb::GOLD, Rgb::CYAN_LIGHT],
            light_size: 4.0,
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 50,
            center: Vec3::new(0.0, -220.0, 0.0),
            half_extent: 10.0,
            size: 3.0,
        }
    }
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: 200,
            half_extents: (400, 400, 200),
            size_range: (1, 3),
            color: Rgb::WHITE,
            fall_speed: 1.5,
            wrap_y: 300.0,
            respawn_y: -300.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            angular_velocity: 0.01,
            blink_frequency: 0.005,
            target_fps: 60,
            max_catch_up_steps: 4,
        }
    }
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            outer_scale: 3.0,
            inner_scale: 1.5,
            light_intensity: 50,
            star_intensity: 80,
            star_radius_bonus: 2,
            leaf_fog: 0.8,
            light_off_color: Rgb::LIGHT_OFF,
        }
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            text: "Merry Christmas".to_owned(),
            font_size: 40.0,
            top: 520.0,
            color: Rgb::CAPTION,
            shadow_color: Rgb::CAPTION_SHADOW,
            shadow_offset: 2.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            tree: TreeConfig::default(),
            star: StarConfig::default(),
            snow: SnowConfig::default(),
            motion: MotionConfig::default(),
            glow: GlowConfig::default(),
            caption: CaptionConfig::default(),
            seed: 42,
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::invalid(field, format!("must be > 0, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::invalid(field, format!("must be >= 0, got {value}")))
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::invalid(
                "view.size",
                format!("viewport {}x{} has no area", self.width, self.height),
            ));
        }
        positive("view.fov", self.fov)?;
        positive("view.viewer_distance", self.viewer_distance)?;
        finite("view.vertical_offset", self.vertical_offset)
    }
}

impl TreeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.layers == 0 {
            return Err(SceneError::invalid("tree.layers", "tree needs at least one layer"));
        }
        finite("tree.y_top", self.y_top)?;
        finite("tree.layer_height", self.layer_height)?;
        non_negative("tree.radius_step", self.radius_step)?;
        non_negative("tree.density", self.density)?;
        self.particle_count()?;
        finite("tree.spiral_skew", self.spiral_skew)?;

        let (lo, hi) = self.radius_jitter;
        non_negative("tree.radius_jitter", lo)?;
        finite("tree.radius_jitter", hi)?;
        if lo > hi {
            return Err(SceneError::invalid(
                "tree.radius_jitter",
                format!("range {lo}..{hi} is inverted"),
            ));
        }

        positive("tree.leaf_size", self.leaf_size)?;
        positive("tree.light_size", self.light_size)?;
        if !(0.0..=1.0).contains(&self.light_probability) {
            return Err(SceneError::invalid(
                "tree.light_probability",
                format!("{} is not a probability", self.light_probability),
            ));
        }
        if self.light_probability > 0.0 && self.light_palette.is_empty() {
            return Err(SceneError::invalid(
                "tree.light_palette",
                "lights are enabled but the palette is empty",
            ));
        }
        Ok(())
    }

    /// Particles on layer `i`, or `None` if the count does not fit a `usize`.
    ///
    /// Proportional to the ring radius so that outer rings are as densely
    /// packed as inner ones, plus a floor of `min_count`.
    pub fn layer_count(&self, i: usize) -> Option<usize> {
        let ring = i as f32 * self.radius_step * self.density;
        if !(0.0..usize::MAX as f32).contains(&ring) {
            return None;
        }
        (ring as usize).checked_add(self.min_count)
    }

    /// Total particles over all layers.
    ///
    /// ### Errors
    /// [`SceneError::InvalidConfig`] if the tree would exceed
    /// [`MAX_GROUP_PARTICLES`].
    pub fn particle_count(&self) -> Result<usize> {
        if self.layers > MAX_GROUP_PARTICLES {
            return Err(SceneError::invalid(
                "tree.layers",
                format!("{} layers exceed the limit of {MAX_GROUP_PARTICLES}", self.layers),
            ));
        }
        let floor = self
            .min_count
            .checked_mul(self.layers)
            .filter(|&n| n <= MAX_GROUP_PARTICLES);
        let field = if floor.is_none() {
            "tree.min_count"
        } else {
            "tree.radius_step"
        };
        (0..self.layers).try_fold(0usize, |total, i| {
            self.layer_count(i)
                .and_then(|n| total.checked_add(n))
                .filter(|&t| t <= MAX_GROUP_PARTICLES)
                .ok_or_else(|| {
                    SceneError::invalid(
                        field,
                        format!(
                            "{} layers at radius step {} with at least {} per layer \
                             exceed {MAX_GROUP_PARTICLES} particles",
                            self.layers, self.radius_step, self.min_count
                        ),
                    )
                })
        })
    }
}

fn group_size(field: &'static str, count: usize) -> Result<()> {
    if count <= MAX_GROUP_PARTICLES {
        Ok(())
    } else {
        Err(SceneError::invalid(
            field,
            format!("{count} exceeds the limit of {MAX_GROUP_PARTICLES}"),
        ))
    }
}

impl StarConfig {
    pub fn validate(&self) -> Result<()> {
        group_size("star.count", self.count)?;
        if !self.center.is_finite() {
            return Err(SceneError::invalid("star.center", "must be finite"));
        }
        non_negative("star.half_extent", self.half_extent)?;
        positive("star.size", self.size)
    }
}

impl SnowConfig {
    pub fn validate(&self) -> Result<()> {
        group_size("snow.count", self.count)?;
        let (hx, hy, hz) = self.half_extents;
        if hx < 0 || hy < 0 || hz < 0 {
            return Err(SceneError::invalid(
                "snow.half_extents",
                format!("({hx}, {hy}, {hz}) has a negative extent"),
            ));
        }
        let (lo, hi) = self.size_range;
        if lo == 0 || lo > hi {
            return Err(SceneError::invalid(
                "snow.size_range",
                format!("range {lo}..={hi} must be non-empty and start above 0"),
            ));
        }
        non_negative("snow.fall_speed", self.fall_speed)?;
        finite("snow.wrap_y", self.wrap_y)?;
        finite("snow.respawn_y", self.respawn_y)?;
        if self.wrap_y <= self.respawn_y {
            return Err(SceneError::invalid(
                "snow.wrap_y",
                format!(
                    "wrap threshold {} must be greater than respawn height {}",
                    self.wrap_y, self.respawn_y
                ),
            ));
        }
        Ok(())
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<()> {
        finite("motion.angular_velocity", self.angular_velocity)?;
        if !self.blink_frequency.is_finite() {
            return Err(SceneError::invalid("motion.blink_frequency", "must be finite"));
        }
        if self.target_fps == 0 {
            return Err(SceneError::invalid("motion.target_fps", "must be > 0"));
        }
        if self.max_catch_up_steps == 0 {
            return Err(SceneError::invalid("motion.max_catch_up_steps", "must be > 0"));
        }
        Ok(())
    }
}

impl GlowConfig {
    pub fn validate(&self) -> Result<()> {
        positive("glow.outer_scale", self.outer_scale)?;
        positive("glow.inner_scale", self.inner_scale)?;
        non_negative("glow.leaf_fog", self.leaf_fog)
    }
}

impl Config {
    /// Checks every section, reporting the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.view.validate()?;
        self.tree.validate()?;
        self.star.validate()?;
        self.snow.validate()?;
        self.motion.validate()?;
        self.glow.validate()
    }
}
