//! Frame composition: background, links, nodes.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::environment::Viewport;
use crate::particle::Particle;
use crate::surface::{Color, Surface};

/// Background gradient at its focus.
pub const BACKGROUND_INNER: Color = Color::rgba8(31, 41, 55, 0.6);
/// Background gradient at its outer radius.
pub const BACKGROUND_OUTER: Color = Color::rgba8(17, 24, 39, 0.8);
/// Link stroke color; alpha is set per link.
pub const LINK_COLOR: Color = Color::rgba8(147, 197, 253, 1.0);
pub const NODE_COLOR: Color = Color::rgba8(209, 213, 219, 0.6);

pub const LINK_WIDTH: f32 = 0.6;
/// Peak link opacity, reached as the distance approaches zero.
pub const LINK_MAX_ALPHA: f32 = 0.25;
pub const NODE_RADIUS: f32 = 1.6;

/// Opacity of a link between two particles `distance` apart, or `None` if
/// they are too far apart to be linked.
pub fn link_alpha(distance: f32, threshold: f32) -> Option<f32> {
    if threshold <= 0.0 || distance.is_nan() || distance >= threshold {
        return None;
    }
    Some((1.0 - distance / threshold) * LINK_MAX_ALPHA)
}

pub fn draw_background<S: Surface + ?Sized>(surface: &mut S, viewport: Viewport) {
    surface.fill_radial_gradient(
        viewport.focus(),
        viewport.max_side(),
        BACKGROUND_INNER,
        BACKGROUND_OUTER,
    );
}

/// Links every unordered pair closer than `threshold`. Quadratic in the
/// particle count, which is why the count is capped.
pub fn draw_links<S: Surface + ?Sized>(surface: &mut S, particles: &[Particle], threshold: f32) {
    let threshold2 = threshold * threshold;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let d2 = a.position.distance_squared(b.position);
            if d2 >= threshold2 {
                continue;
            }
            if let Some(alpha) = link_alpha(d2.sqrt(), threshold) {
                surface.stroke_line(a.position, b.position, LINK_WIDTH, LINK_COLOR.with_alpha(alpha));
            }
        }
    }
}

pub fn draw_nodes<S: Surface + ?Sized>(surface: &mut S, particles: &[Particle]) {
    for p in particles {
        surface.fill_circle(p.position, NODE_RADIUS, NODE_COLOR);
    }
}

/// Draw a complete frame without touching simulation state.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    viewport: Viewport,
    config: &FieldConfig,
) {
    draw_background(surface, viewport);
    draw_links(surface, particles, config.link_distance);
    draw_nodes(surface, particles);
}

/// Draw call captured by [`Recording`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Configure { width: u32, height: u32, scale: f32 },
    Gradient { center: Vec2, radius: f32 },
    Line { from: Vec2, to: Vec2, color: Color },
    Circle { center: Vec2, radius: f32 },
}

/// Surface that records draw calls instead of rasterising them.
///
/// Useful for headless hosts and for asserting on what a frame would draw.
#[derive(Debug, Default)]
pub struct Recording {
    pub calls: Vec<DrawCall>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Circle { .. }))
    }

    /// Number of background passes, one per drawn frame.
    pub fn frames(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Gradient { .. }))
            .count()
    }
}

impl Surface for Recording {
    fn configure(&mut self, size: crate::surface::SurfaceSize) {
        self.calls.push(DrawCall::Configure {
            width: size.width,
            height: size.height,
            scale: size.scale,
        });
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, _inner: Color, _outer: Color) {
        self.calls.push(DrawCall::Gradient { center, radius });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, _width: f32, color: Color) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
        self.calls.push(DrawCall::Circle { center, radius });
    }
}
