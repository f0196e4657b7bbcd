//! CPU implementation of [`Surface`] on top of an [`RgbaImage`].
//!
//! Everything is composited source-over in straight alpha, the same way a
//! 2D canvas does it. Nothing is cleared between frames: the translucent
//! background pass fades the previous frame instead, which leaves short
//! trails behind moving particles.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::error::HostError;
use crate::surface::{Color, Surface, SurfaceSize};

/// Cached per-pixel gradient colors, keyed by everything that shapes them.
struct GradientCache {
    key: (u32, u32, [f32; 3], [f32; 8]),
    pixels: Vec<Color>,
}

/// Software raster target.
pub struct Canvas {
    image: RgbaImage,
    scale: f32,
    gradient: Option<GradientCache>,
}

impl Canvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            image: RgbaImage::new(size.width, size.height),
            scale: size.scale,
            gradient: None,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Raw RGBA8 bytes, row-major, tightly packed.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), HostError> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Source-over blend of `color` with its alpha scaled by `coverage`.
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let sa = (color.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let [dr, dg, db, da] = dst.0.map(|c| c as f32 / 255.0);

        let out_a = sa + da * (1.0 - sa);
        let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
        let out = [mix(color.r, dr), mix(color.g, dg), mix(color.b, db), out_a];

        *dst = Rgba(out.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
    }

    /// Physical-pixel bounding box around a logical point, clipped to the image.
    fn bounds(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = (min.x * self.scale).floor().max(0.0);
        let y0 = (min.y * self.scale).floor().max(0.0);
        let x1 = (max.x * self.scale).ceil().min(w);
        let y1 = (max.y * self.scale).ceil().min(h);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for Canvas {
    fn configure(&mut self, size: SurfaceSize) {
        if size.width != self.image.width() || size.height != self.image.height() {
            self.image = RgbaImage::new(size.width, size.height);
            self.gradient = None;
        }
        if size.scale != self.scale {
            self.scale = size.scale;
            self.gradient = None;
        }
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        let (w, h) = self.image.dimensions();
        let key = (
            w,
            h,
            [center.x, center.y, radius],
            [inner.r, inner.g, inner.b, inner.a, outer.r, outer.g, outer.b, outer.a],
        );

        if self.gradient.as_ref().map(|g| g.key != key).unwrap_or(true) {
            let scale = self.scale;
            let pixels = (0..h)
                .flat_map(|y| (0..w).map(move |x| (x, y)))
                .map(|(x, y)| {
                    let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) / scale;
                    let t = if radius > 0.0 { p.distance(center) / radius } else { 1.0 };
                    inner.lerp(outer, t)
                })
                .collect();
            self.gradient = Some(GradientCache { key, pixels });
        }

        let Some(cache) = self.gradient.take() else {
            return;
        };
        for (i, color) in cache.pixels.iter().enumerate() {
            let i = i as u32;
            self.blend(i % w, i / w, *color, 1.0);
        }
        self.gradient = Some(cache);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let half = width * 0.5;
        let pad = Vec2::splat(half + 1.0 / self.scale);
        let Some((x0, y0, x1, y1)) = self.bounds(from.min(to) - pad, from.max(to) + pad) else {
            return;
        };

        // Coverage is computed in physical pixels so hairlines stay visible.
        let (a, b) = (from * self.scale, to * self.scale);
        let half_px = half * self.scale;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (half_px + 0.5 - segment_distance(p, a, b)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let pad = Vec2::splat(radius + 1.0 / self.scale);
        let Some((x0, y0, x1, y1)) = self.bounds(center - pad, center + pad) else {
            return;
        };

        let c = center * self.scale;
        let r = radius * self.scale;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (r + 0.5 - p.distance(c)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}
