//! 8-bit color types and the scene palette.

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// 8-bit RGB color with straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    /// Near-black midnight blue used to clear the frame.
    pub const BACKGROUND: Rgb = Rgb::new(0, 0, 5);
    pub const GOLD: Rgb = Rgb::new(255, 223, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const LEAF_GREEN: Rgb = Rgb::new(34, 139, 34);
    pub const RED_LIGHT: Rgb = Rgb::new(255, 50, 50);
    pub const CYAN_LIGHT: Rgb = Rgb::new(50, 255, 255);
    /// Color of a light bulb in its off phase.
    pub const LIGHT_OFF: Rgb = Rgb::new(50, 50, 50);
    pub const CAPTION: Rgb = Rgb::new(255, 50, 50);
    pub const CAPTION_SHADOW: Rgb = Rgb::new(100, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiplies every channel by `factor`.
    ///
    /// Each product is truncated toward zero and clamped to `[0, 255]`, so
    /// negative or huge factors never wrap.
    pub fn scaled(self, factor: f32) -> Self {
        let channel = |c: u8| ((c as f32 * factor) as i32).clamp(0, 255) as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Channel-wise sum, saturating at 255.
    pub fn saturating_add(self, other: Rgb) -> Self {
        Self::new(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
        )
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// The color weighted by its own alpha, i.e. what it adds to a pixel
    /// under additive blending.
    pub fn premultiplied(self) -> Rgb {
        let weight = |c: u8| ((c as u16 * self.a as u16) / 255) as u8;
        Rgb::new(weight(self.r), weight(self.g), weight(self.b))
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_truncates_and_clamps() {
        let c = Rgb::new(100, 200, 3);

        assert_eq!(c.scaled(0.5), Rgb::new(50, 100, 1));
        assert_eq!(c.scaled(2.0), Rgb::new(200, 255, 6));
        // Negative factors (points behind the viewer) go to black.
        assert_eq!(c.scaled(-1.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn saturating_add_caps_each_channel() {
        let a = Rgb::new(200, 10, 255);
        let b = Rgb::new(100, 20, 1);
        assert_eq!(a.saturating_add(b), Rgb::new(255, 30, 255));
    }

    #[test]
    fn premultiplied_weights_by_alpha() {
        assert_eq!(Rgb::WHITE.with_alpha(0).premultiplied(), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::WHITE.with_alpha(255).premultiplied(), Rgb::WHITE);
        assert_eq!(
            Rgb::new(255, 100, 0).with_alpha(51).premultiplied(),
            Rgb::new(51, 20, 0)
        );
    }
}
