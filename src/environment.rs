//! Host capabilities injected into the field.
//!
//! The field never probes its platform. Whatever the host knows about the
//! display (size, pixel density, motion preference, input model) is
//! collected once into an [`Environment`] and handed in.

use glam::Vec2;

/// Viewports at or below this width use [`DeviceClass::Compact`].
pub const COMPACT_MAX_WIDTH: f32 = 640.0;

/// Viewport size in logical (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn max_side(&self) -> f32 {
        self.width.max(self.height)
    }

    /// Focus of the background gradient and the autopilot orbit.
    ///
    /// Sits slightly above the geometric center.
    #[inline]
    pub fn focus(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.4)
    }

    /// Whether a point lies inside `[0, width] × [0, height]`.
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Coarse device class, used to thin out the field on small screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Phones and other narrow viewports.
    Compact,
    #[default]
    Standard,
}

impl DeviceClass {
    pub fn for_viewport(viewport: Viewport) -> Self {
        if viewport.width <= COMPACT_MAX_WIDTH {
            DeviceClass::Compact
        } else {
            DeviceClass::Standard
        }
    }

    /// Square pixels of viewport per particle, before density scaling.
    ///
    /// Higher divisor means fewer particles.
    pub fn density_divisor(&self) -> f32 {
        match self {
            DeviceClass::Compact => 26_000.0,
            DeviceClass::Standard => 15_000.0,
        }
    }
}

/// Which family of input events the host delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Unified pointer events (mouse, pen, touch as pointer).
    #[default]
    Pointer,
    /// Only raw touch events are available.
    Touch,
}

/// Everything the field needs to know about its host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub viewport: Viewport,
    pub device_pixel_ratio: f32,
    /// The user asked the system to minimise motion.
    pub reduced_motion: bool,
    pub device_class: DeviceClass,
    pub input_mode: InputMode,
}

impl Environment {
    /// Environment for a viewport, with the device class derived from its width.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            device_pixel_ratio: 1.0,
            reduced_motion: false,
            device_class: DeviceClass::for_viewport(viewport),
            input_mode: InputMode::Pointer,
        }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn with_device_class(mut self, class: DeviceClass) -> Self {
        self.device_class = class;
        self
    }

    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_class_from_width() {
        assert_eq!(
            DeviceClass::for_viewport(Viewport::new(390.0, 844.0)),
            DeviceClass::Compact
        );
        assert_eq!(
            DeviceClass::for_viewport(Viewport::new(640.0, 480.0)),
            DeviceClass::Compact
        );
        assert_eq!(
            DeviceClass::for_viewport(Viewport::new(1280.0, 720.0)),
            DeviceClass::Standard
        );
    }

    #[test]
    fn test_compact_divisor_is_larger() {
        assert!(DeviceClass::Compact.density_divisor() > DeviceClass::Standard.density_divisor());
    }

    #[test]
    fn test_focus() {
        let focus = Viewport::new(1000.0, 500.0).focus();
        assert_eq!(focus, Vec2::new(500.0, 200.0));
    }

    #[test]
    fn test_environment_builder() {
        let env = Environment::new(Viewport::new(1920.0, 1080.0))
            .with_reduced_motion(true)
            .with_input_mode(InputMode::Touch)
            .with_device_pixel_ratio(2.0);

        assert_eq!(env.device_class, DeviceClass::Standard);
        assert!(env.reduced_motion);
        assert_eq!(env.input_mode, InputMode::Touch);
        assert_eq!(env.device_pixel_ratio, 2.0);
    }
}
