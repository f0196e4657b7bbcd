//! Immediate-mode drawing surface.
//!
//! The field draws in logical pixels through the [`Surface`] trait and never
//! learns what backs it. The crate ships a CPU implementation
//! ([`Canvas`](crate::raster::Canvas)); tests use recording surfaces.

use glam::Vec2;

use crate::environment::Viewport;

/// Device pixel ratios above this are clamped; the extra resolution is not
/// worth the fill cost for a background.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Straight (non-premultiplied) RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// From 8-bit channels and a float alpha, like CSS `rgba()`.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Component-wise interpolation, `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Backing-store size for a viewport at a given pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Physical width in pixels.
    pub width: u32,
    /// Physical height in pixels.
    pub height: u32,
    /// Logical-to-physical scale applied to every draw call.
    pub scale: f32,
}

impl SurfaceSize {
    pub fn for_viewport(viewport: Viewport, device_pixel_ratio: f32) -> Self {
        let scale = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Self {
            width: (viewport.width * scale).floor().max(0.0) as u32,
            height: (viewport.height * scale).floor().max(0.0) as u32,
            scale,
        }
    }
}

/// A 2D drawing target.
///
/// Coordinates are logical pixels; implementations apply the scale from the
/// last [`configure`](Surface::configure) call.
pub trait Surface {
    /// Resize the backing store and set the coordinate scale.
    fn configure(&mut self, size: SurfaceSize);

    /// Cover the whole surface with a radial gradient from `inner` at
    /// `center` to `outer` at `radius` and beyond. Replaces existing content.
    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size_scales() {
        let size = SurfaceSize::for_viewport(Viewport::new(800.5, 600.0), 1.5);
        assert_eq!(size.width, 1200);
        assert_eq!(size.height, 900);
        assert_eq!(size.scale, 1.5);
    }

    #[test]
    fn test_surface_size_clamps_ratio() {
        let size = SurfaceSize::for_viewport(Viewport::new(100.0, 100.0), 3.0);
        assert_eq!(size.scale, MAX_PIXEL_RATIO);
        assert_eq!(size.width, 200);

        let size = SurfaceSize::for_viewport(Viewport::new(100.0, 100.0), 0.0);
        assert_eq!(size.scale, 1.0);

        let size = SurfaceSize::for_viewport(Viewport::new(100.0, 100.0), f32::NAN);
        assert_eq!(size.scale, 1.0);
    }

    #[test]
    fn test_color_lerp() {
        let a = Color::rgba8(0, 0, 0, 0.0);
        let b = Color::rgba8(255, 255, 255, 1.0);
        let mid = a.lerp(b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.a - 0.5).abs() < 1e-6);
        assert_eq!(a.lerp(b, 2.0), b);
    }
}
