//! Tuning parameters for the particle field.
//!
//! Every option is visual tuning only; none of them can put the simulation
//! into an invalid state. Configurations serialize to JSON so a host can
//! ship presets alongside the binary:
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_density(0.6)
//!     .with_link_distance(110.0);
//! config.save("calm.json")?;
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Named, optional tuning parameters for a [`ParticleField`](crate::ParticleField).
///
/// Missing fields in a JSON document fall back to their defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Multiplier on the area-derived particle count.
    pub density: f32,
    /// Hard cap on the particle count.
    pub max_particles: u32,
    /// Maximum pixel distance at which two particles are linked.
    pub link_distance: f32,
    /// Pixel radius of pointer repulsion.
    pub repel_radius: f32,
    /// Per-frame random velocity perturbation, per component.
    pub wander: f32,
    /// Velocity magnitude clamp, in pixels per frame.
    pub max_speed: f32,
    /// Per-frame velocity multiplier.
    pub friction: f32,
    /// Orbit a virtual pointer around the viewport when idle.
    pub auto_pilot: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            max_particles: 180,
            link_distance: 140.0,
            repel_radius: 120.0,
            wander: 0.008,
            max_speed: 1.25,
            friction: 0.985,
            auto_pilot: true,
        }
    }
}

impl FieldConfig {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_max_particles(mut self, max_particles: u32) -> Self {
        self.max_particles = max_particles;
        self
    }

    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.link_distance = distance;
        self
    }

    pub fn with_repel_radius(mut self, radius: f32) -> Self {
        self.repel_radius = radius;
        self
    }

    pub fn with_wander(mut self, wander: f32) -> Self {
        self.wander = wander;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_auto_pilot(mut self, enabled: bool) -> Self {
        self.auto_pilot = enabled;
        self
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}
