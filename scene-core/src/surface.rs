//! Drawing interface used by the compositor and a software implementation.

use crate::color::{Rgb, Rgba};
use glam::IVec2;

/// Minimal 2-D drawing surface the compositor paints into.
pub trait RenderTarget {
    /// Fills the whole target with one color.
    fn fill(&mut self, color: Rgb);

    /// Draws an opaque filled disc.
    fn fill_circle(&mut self, color: Rgb, center: IVec2, radius: f32);

    /// Adds `source` onto the target with its top-left corner at `offset`.
    ///
    /// Each source pixel contributes its color weighted by its alpha, summed
    /// with the destination and saturated per channel.
    fn blend_add(&mut self, source: &Surface, offset: IVec2);
}

/// An owned RGBA pixel buffer, row-major, origin at the top left.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Changes the dimensions and sets every pixel to `color`.
    ///
    /// The backing storage is reused, so shrinking or re-filling at the
    /// same size does not allocate.
    pub fn resize_clear(&mut self, width: u32, height: u32, color: Rgba) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, color);
    }

    /// Draws a filled disc, replacing covered pixels (alpha included).
    ///
    /// A pixel is covered when its offset `(dx, dy)` from `center`
    /// satisfies `dx² + dy² <= radius²`. Parts outside the surface are
    /// clipped.
    pub fn fill_circle_rgba(&mut self, color: Rgba, center: IVec2, radius: f32) {
        if radius.is_nan() || radius < 0.0 {
            return;
        }
        let r2 = radius * radius;
        let reach = radius.floor() as i32;

        let y0 = center.y.saturating_sub(reach).max(0);
        let y1 = center.y.saturating_add(reach).min(self.height as i32 - 1);
        for y in y0..=y1 {
            let dy = (y - center.y) as f32;
            let span2 = r2 - dy * dy;
            if span2 < 0.0 {
                continue;
            }
            let half = span2.sqrt().floor() as i32;
            let x0 = center.x.saturating_sub(half).max(0);
            let x1 = center.x.saturating_add(half).min(self.width as i32 - 1);
            if x0 > x1 {
                continue;
            }
            let row = y as usize * self.width as usize;
            self.pixels[row + x0 as usize..=row + x1 as usize].fill(color);
        }
    }

    /// Copies the surface out as tightly packed RGBA bytes.
    pub fn to_rgba_bytes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for p in &self.pixels {
            out.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }
}

impl RenderTarget for Surface {
    fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.into());
    }

    fn fill_circle(&mut self, color: Rgb, center: IVec2, radius: f32) {
        self.fill_circle_rgba(color.into(), center, radius);
    }

    fn blend_add(&mut self, source: &Surface, offset: IVec2) {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = offset.x.saturating_add(source.width as i32).min(self.width as i32);
        let y1 = offset.y.saturating_add(source.height as i32).min(self.height as i32);

        for y in y0..y1 {
            let sy = (y as i64 - offset.y as i64) as usize;
            for x in x0..x1 {
                let sx = (x as i64 - offset.x as i64) as usize;
                let src = source.pixels[sy * source.width as usize + sx];
                if src.a == 0 {
                    continue;
                }
                let d = &mut self.pixels[y as usize * self.width as usize + x as usize];
                let sum = d.rgb().saturating_add(src.premultiplied());
                *d = sum.with_alpha(d.a);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(c: Rgb) -> Option<Rgba> {
        Some(c.into())
    }

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(4, 3);

        assert_eq!(s.width(), 4);
        assert_eq!(s.height(), 3);
        assert_eq!(s.pixels().len(), 12);
        assert!(s.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
        assert_eq!(s.pixel(4, 0), None);
        assert_eq!(s.pixel(-1, 0), None);
    }

    #[test]
    fn fill_circle_covers_disc_and_clips() {
        let mut s = Surface::new(10, 10);
        s.fill(Rgb::BACKGROUND);
        s.fill_circle(Rgb::WHITE, IVec2::new(5, 5), 2.0);

        assert_eq!(s.pixel(5, 5), opaque(Rgb::WHITE));
        assert_eq!(s.pixel(7, 5), opaque(Rgb::WHITE));
        assert_eq!(s.pixel(5, 3), opaque(Rgb::WHITE));
        // (2, 2) offset has squared distance 8 > 4.
        assert_eq!(s.pixel(7, 7), opaque(Rgb::BACKGROUND));
        assert_eq!(s.pixel(8, 5), opaque(Rgb::BACKGROUND));

        // Mostly off-surface discs must not panic.
        s.fill_circle(Rgb::GOLD, IVec2::new(-2, 11), 4.0);
        s.fill_circle(Rgb::GOLD, IVec2::new(1000, 1000), 4.0);
        assert_eq!(s.pixel(0, 9), opaque(Rgb::GOLD));
    }

    #[test]
    fn radius_one_disc_is_a_plus_sign() {
        let mut s = Surface::new(3, 3);
        s.fill_circle(Rgb::WHITE, IVec2::new(1, 1), 1.0);

        let covered: Vec<bool> = s.pixels().iter().map(|p| p.a == 255).collect();
        assert_eq!(
            covered,
            vec![false, true, false, true, true, true, false, true, false]
        );
    }

    #[test]
    fn blend_add_sums_weighted_source_and_saturates() {
        let mut dst = Surface::new(3, 1);
        dst.fill(Rgb::new(200, 10, 0));

        let mut src = Surface::new(2, 1);
        src.resize_clear(2, 1, Rgb::new(255, 100, 0).with_alpha(51));

        dst.blend_add(&src, IVec2::new(1, 0));

        assert_eq!(dst.pixel(0, 0), opaque(Rgb::new(200, 10, 0)));
        assert_eq!(dst.pixel(1, 0), opaque(Rgb::new(251, 30, 0)));
        assert_eq!(dst.pixel(2, 0), opaque(Rgb::new(251, 30, 0)));

        dst.blend_add(&src, IVec2::new(1, 0));
        assert_eq!(dst.pixel(1, 0), opaque(Rgb::new(255, 50, 0)));
    }

    #[test]
    fn blend_add_ignores_transparent_and_out_of_bounds_pixels() {
        let mut dst = Surface::new(2, 2);
        dst.fill(Rgb::BACKGROUND);
        let src = Surface::new(4, 4);

        dst.blend_add(&src, IVec2::new(-1, -1));
        assert!(dst.pixels().iter().all(|p| p.rgb() == Rgb::BACKGROUND));
    }

    #[test]
    fn to_rgba_bytes_packs_channels() {
        let mut s = Surface::new(2, 1);
        s.fill(Rgb::new(1, 2, 3));

        let mut bytes = Vec::new();
        s.to_rgba_bytes(&mut bytes);
        assert_eq!(bytes, vec![1, 2, 3, 255, 1, 2, 3, 255]);
    }
}
